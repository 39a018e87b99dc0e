use std::env;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("ranking weight {field} must be a finite non-negative number, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },
}

/// Term weights for the ranking blend.
///
/// The four base weights are expected to sum to 1.0 so the base score
/// stays in [0, 1]; the favorite bonus sits on top. Deviating sums are
/// allowed for experiments but logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub recency: f64,
    pub trust: f64,
    pub interest: f64,
    pub social: f64,
    pub favorite_bonus: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            recency: 0.4,
            trust: 0.3,
            interest: 0.2,
            social: 0.1,
            favorite_bonus: 0.1,
        }
    }
}

impl RankingWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("recency", self.recency),
            ("trust", self.trust),
            ("interest", self.interest),
            ("social", self.social),
            ("favorite_bonus", self.favorite_bonus),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { field, value });
            }
        }

        let base_sum = self.recency + self.trust + self.interest + self.social;
        if (base_sum - 1.0).abs() > 1e-6 {
            warn!(base_sum, "Base ranking weights do not sum to 1.0");
        }
        Ok(())
    }
}

/// Limits and defaults for feed assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedConfig {
    /// Candidates pulled from storage per request, before ranking.
    pub candidate_fetch_limit: usize,
    /// Hard cap on the page size a caller can request.
    pub max_page_size: usize,
    /// Search radius used when the request does not set one.
    pub default_radius_km: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            candidate_fetch_limit: 200,
            max_page_size: 100,
            default_radius_km: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub weights: RankingWeights,
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from the environment, with `.env` support.
    /// Unset variables keep their defaults; set-but-unparsable values are
    /// an error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = RankingWeights::default();
        let weights = RankingWeights {
            recency: env_f64("RANKING_WEIGHT_RECENCY", defaults.recency)?,
            trust: env_f64("RANKING_WEIGHT_TRUST", defaults.trust)?,
            interest: env_f64("RANKING_WEIGHT_INTEREST", defaults.interest)?,
            social: env_f64("RANKING_WEIGHT_SOCIAL", defaults.social)?,
            favorite_bonus: env_f64("RANKING_FAVORITE_BONUS", defaults.favorite_bonus)?,
        };
        weights.validate()?;

        let feed_defaults = FeedConfig::default();
        let feed = FeedConfig {
            candidate_fetch_limit: env_usize(
                "FEED_CANDIDATE_FETCH_LIMIT",
                feed_defaults.candidate_fetch_limit,
            )?,
            max_page_size: env_usize("FEED_MAX_PAGE_SIZE", feed_defaults.max_page_size)?,
            default_radius_km: env_f64("FEED_DEFAULT_RADIUS_KM", feed_defaults.default_radius_km)?,
        };

        Ok(Self { weights, feed })
    }
}

fn env_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidEnv { key, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

fn env_usize(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidEnv { key, value: raw }),
        },
        Err(_) => Ok(default),
    }
}
