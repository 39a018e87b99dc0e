//! Feed builder behavior against mocked data sources: degradation,
//! clamping, and score stripping.

use std::sync::Arc;

use anyhow::anyhow;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use feed_ranking::{
    CandidateItem, CandidateSource, FeedBuilder, FeedConfig, FeedRequest, GeoPoint, RankingEngine,
    UserSignalSource, UserSignals,
};

mock! {
    pub Candidates {}

    #[async_trait::async_trait]
    impl CandidateSource for Candidates {
        async fn nearby(
            &self,
            center: GeoPoint,
            radius_km: f64,
            limit: usize,
        ) -> anyhow::Result<Vec<CandidateItem>>;
    }
}

mock! {
    pub Signals {}

    #[async_trait::async_trait]
    impl UserSignalSource for Signals {
        async fn signals_for(&self, user_id: Uuid) -> anyhow::Result<UserSignals>;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("feed_ranking=debug")
        .with_test_writer()
        .try_init();
}

fn center() -> GeoPoint {
    GeoPoint {
        lat: 31.5204,
        lng: 74.3587,
    }
}

fn rated_item(avg_rating: f64) -> CandidateItem {
    CandidateItem {
        id: Uuid::new_v4(),
        author_id: None,
        created_at: None,
        category_label: String::new(),
        reason_text: String::new(),
        avg_rating: Some(avg_rating),
        endorsement_count: 0,
        referral_count: 0,
        location: None,
        distance_km: None,
    }
}

fn builder(
    candidates: MockCandidates,
    signals: MockSignals,
    config: FeedConfig,
) -> FeedBuilder {
    FeedBuilder::new(
        Arc::new(candidates),
        Arc::new(signals),
        RankingEngine::new(),
        config,
    )
}

fn request(viewer: Option<Uuid>, limit: usize) -> FeedRequest {
    FeedRequest {
        viewer,
        center: center(),
        radius_km: None,
        limit,
    }
}

#[tokio::test]
async fn candidate_failure_yields_empty_page() {
    init_tracing();
    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .times(1)
        .returning(|_, _, _| Err(anyhow!("postgis timeout")));
    let signals = MockSignals::new();

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(None, 20))
        .await;

    assert!(page.items.is_empty());
    assert_eq!(page.total_candidates, 0);
    assert!(!page.has_more);
}

#[tokio::test]
async fn signal_failure_degrades_to_anonymous_ranking() {
    init_tracing();
    let viewer = Uuid::new_v4();

    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .times(1)
        .returning(|_, _, _| Ok(vec![rated_item(4.0), rated_item(2.0)]));

    let mut signals = MockSignals::new();
    signals
        .expect_signals_for()
        .with(eq(viewer))
        .times(1)
        .returning(|_| Err(anyhow!("redis connection refused")));

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(Some(viewer), 20))
        .await;

    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn anonymous_viewer_never_hits_the_signal_source() {
    init_tracing();
    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .times(1)
        .returning(|_, _, _| Ok(vec![rated_item(3.0)]));

    let mut signals = MockSignals::new();
    signals.expect_signals_for().never();

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(None, 20))
        .await;

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn limit_zero_short_circuits_without_fetching() {
    let mut candidates = MockCandidates::new();
    candidates.expect_nearby().never();
    let mut signals = MockSignals::new();
    signals.expect_signals_for().never();

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(Some(Uuid::new_v4()), 0))
        .await;

    assert!(page.items.is_empty());
    assert_eq!(page.total_candidates, 0);
}

#[tokio::test]
async fn page_is_ordered_and_scores_are_stripped() {
    init_tracing();
    let best = rated_item(5.0);
    let worst = rated_item(1.0);
    let middle = rated_item(3.0);
    let expected = vec![best.id, middle.id, worst.id];

    let mut candidates = MockCandidates::new();
    let fetched = vec![best, worst, middle];
    candidates
        .expect_nearby()
        .times(1)
        .returning(move |_, _, _| Ok(fetched.clone()));
    let signals = MockSignals::new();

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(None, 20))
        .await;

    let got: Vec<Uuid> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(got, expected);

    // The wire shape is the candidate item itself: no score field.
    let json = serde_json::to_value(&page).unwrap();
    assert!(json["items"][0].get("score").is_none());
    assert!(json["items"][0].get("avg_rating").is_some());
}

#[tokio::test]
async fn requested_limit_is_clamped_to_the_page_cap() {
    init_tracing();
    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .times(1)
        .returning(|_, _, _| Ok((0..10).map(|i| rated_item(i as f64 / 2.0)).collect()));
    let signals = MockSignals::new();

    let config = FeedConfig {
        max_page_size: 3,
        ..FeedConfig::default()
    };
    let page = builder(candidates, signals, config)
        .build(&request(None, 50))
        .await;

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total_candidates, 10);
    assert!(page.has_more);
}

#[tokio::test]
async fn missing_radius_falls_back_to_configured_default() {
    init_tracing();
    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .withf(|_, radius_km, limit| (radius_km - 25.0).abs() < 1e-9 && *limit == 200)
        .times(1)
        .returning(|_, _, _| Ok(vec![rated_item(4.0)]));
    let signals = MockSignals::new();

    let config = FeedConfig {
        default_radius_km: 25.0,
        ..FeedConfig::default()
    };
    let page = builder(candidates, signals, config)
        .build(&request(None, 10))
        .await;

    assert_eq!(page.items.len(), 1);
    assert!(!page.has_more);
}

#[tokio::test]
async fn explicit_radius_overrides_the_default() {
    init_tracing();
    let mut candidates = MockCandidates::new();
    candidates
        .expect_nearby()
        .withf(|_, radius_km, _| (radius_km - 2.5).abs() < 1e-9)
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));
    let signals = MockSignals::new();

    let mut req = request(None, 10);
    req.radius_km = Some(2.5);
    let page = builder(candidates, signals, FeedConfig::default())
        .build(&req)
        .await;

    assert!(page.items.is_empty());
    assert_eq!(page.total_candidates, 0);
    assert!(!page.has_more);
}

#[tokio::test]
async fn favorites_from_signals_influence_the_page_order() {
    init_tracing();
    let viewer = Uuid::new_v4();
    let plain = rated_item(3.0);
    let favored = rated_item(3.0);
    let favored_id = favored.id;

    let mut candidates = MockCandidates::new();
    let fetched = vec![plain.clone(), favored.clone()];
    candidates
        .expect_nearby()
        .times(1)
        .returning(move |_, _, _| Ok(fetched.clone()));

    let mut signals = MockSignals::new();
    signals
        .expect_signals_for()
        .with(eq(viewer))
        .times(1)
        .returning(move |_| {
            let mut s = UserSignals::anonymous();
            s.favorites.insert(feed_ranking::Favorite::post(favored_id));
            Ok(s)
        });

    let page = builder(candidates, signals, FeedConfig::default())
        .build(&request(Some(viewer), 10))
        .await;

    // Equal on every other term; the favorite bonus breaks the tie.
    assert_eq!(page.items[0].id, favored_id);
    assert_eq!(page.items[1].id, plain.id);
}
