//! Command line configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bracket_engine::bracket::{
    ScheduleConfig,
    scheduler::{DEFAULT_MATCH_DURATION_MINUTES, DEFAULT_START_HOUR},
};
use chrono::{Local, NaiveDate, NaiveTime};

/// Longest contest slot accepted, in minutes
const MAX_MATCH_DURATION_MINUTES: u32 = 24 * 60;

/// Complete tool configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Scheduling defaults
    pub schedule: ScheduleDefaults,
    /// Seed for a reproducible draw
    pub rng_seed: Option<u64>,
}

/// Scheduling defaults
#[derive(Debug, Clone)]
pub struct ScheduleDefaults {
    /// Concurrent playing areas
    pub area_count: u32,
    /// Minutes per contest
    pub match_duration_minutes: u32,
    /// Competition day
    pub start_date: NaiveDate,
    /// First call of the day
    pub start_time: NaiveTime,
}

impl ScheduleDefaults {
    /// Engine scheduling parameters
    pub fn to_schedule_config(&self) -> ScheduleConfig {
        ScheduleConfig::new(self.area_count, self.match_duration_minutes, self.start_date)
            .with_start_time(self.start_time)
    }
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub area_count: Option<u32>,
    pub match_duration_minutes: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub rng_seed: Option<u64>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values parsed from command line flags
    ///
    /// # Returns
    ///
    /// * `Result<CliConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if a date or time variable is present but malformed
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let start_date = match overrides.start_date {
            Some(date) => date,
            None => match std::env::var("BRACKET_START_DATE") {
                Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
                    ConfigError::Invalid {
                        var: "BRACKET_START_DATE".to_string(),
                        reason: format!("Expected YYYY-MM-DD: {e}"),
                    }
                })?,
                Err(_) => Local::now().date_naive(),
            },
        };

        let start_time = match overrides.start_time {
            Some(time) => time,
            None => match std::env::var("BRACKET_START_TIME") {
                Ok(value) => parse_clock_time(&value).map_err(|e| ConfigError::Invalid {
                    var: "BRACKET_START_TIME".to_string(),
                    reason: format!("Expected HH:MM: {e}"),
                })?,
                Err(_) => NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0)
                    .unwrap_or(NaiveTime::MIN),
            },
        };

        let schedule = ScheduleDefaults {
            area_count: overrides
                .area_count
                .unwrap_or_else(|| parse_env_or("BRACKET_AREA_COUNT", 1)),
            match_duration_minutes: overrides.match_duration_minutes.unwrap_or_else(|| {
                parse_env_or(
                    "BRACKET_MATCH_DURATION_MINUTES",
                    DEFAULT_MATCH_DURATION_MINUTES,
                )
            }),
            start_date,
            start_time,
        };

        let rng_seed = overrides.rng_seed.or_else(|| {
            std::env::var("BRACKET_RNG_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
        });

        Ok(CliConfig { schedule, rng_seed })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.area_count == 0 {
            return Err(ConfigError::Invalid {
                var: "BRACKET_AREA_COUNT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.schedule.match_duration_minutes == 0 {
            return Err(ConfigError::Invalid {
                var: "BRACKET_MATCH_DURATION_MINUTES".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.schedule.match_duration_minutes > MAX_MATCH_DURATION_MINUTES {
            return Err(ConfigError::Invalid {
                var: "BRACKET_MATCH_DURATION_MINUTES".to_string(),
                reason: format!("Must be at most {MAX_MATCH_DURATION_MINUTES} (one day)"),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
