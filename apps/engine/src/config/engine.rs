//! Engine configuration loaded from environment variables.

use std::env;

use time::Duration;

use crate::domain::rules::DEFAULT_TURN_DURATION;
use crate::error::AppError;

pub const TURN_SECONDS_VAR: &str = "BHABHI_TURN_SECONDS";
pub const IDLE_TTL_SECONDS_VAR: &str = "BHABHI_IDLE_TTL_SECONDS";
pub const SWEEP_INTERVAL_SECONDS_VAR: &str = "BHABHI_SWEEP_INTERVAL_SECONDS";
pub const SHUFFLE_SEED_VAR: &str = "BHABHI_SHUFFLE_SEED";

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::seconds(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Time each seat gets before its turn is skipped.
    pub turn_duration: Duration,
    /// Rooms untouched for longer than this are dropped. `None` disables eviction.
    pub idle_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    /// Base seed for reproducible deals; OS entropy when unset.
    pub shuffle_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_duration: DEFAULT_TURN_DURATION,
            idle_ttl: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            shuffle_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment. Unset variables fall back to
    /// their defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let turn_duration = match parse_var::<u32>(TURN_SECONDS_VAR)? {
            Some(0) => {
                return Err(AppError::config(format!(
                    "{TURN_SECONDS_VAR} must be at least 1"
                )))
            }
            Some(secs) => Duration::seconds(i64::from(secs)),
            None => defaults.turn_duration,
        };

        let idle_ttl = match parse_var::<u64>(IDLE_TTL_SECONDS_VAR)? {
            Some(0) | None => None,
            Some(secs) => Some(seconds(IDLE_TTL_SECONDS_VAR, secs)?),
        };

        let sweep_interval = match parse_var::<u64>(SWEEP_INTERVAL_SECONDS_VAR)? {
            Some(0) => {
                return Err(AppError::config(format!(
                    "{SWEEP_INTERVAL_SECONDS_VAR} must be at least 1"
                )))
            }
            Some(secs) => seconds(SWEEP_INTERVAL_SECONDS_VAR, secs)?,
            None => defaults.sweep_interval,
        };

        let shuffle_seed = parse_var::<u64>(SHUFFLE_SEED_VAR)?;

        Ok(Self {
            turn_duration,
            idle_ttl,
            sweep_interval,
            shuffle_seed,
        })
    }
}

/// `Ok(None)` when unset or blank.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| AppError::config(format!("{name} must be a non-negative integer, got '{raw}'")))
}

fn seconds(name: &str, secs: u64) -> Result<Duration, AppError> {
    i64::try_from(secs)
        .map(Duration::seconds)
        .map_err(|_| AppError::config(format!("{name} is out of range")))
}
