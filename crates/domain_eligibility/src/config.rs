//! Engine configuration

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::ReferenceDate;

/// Startup configuration for an eligibility session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Anchors all age computations
    pub reference_date: NaiveDate,
    /// Caps the number of supplementary insureds per session
    pub max_supplementary_count: usize,
    /// Log level for binaries embedding the engine
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 8, 9).unwrap_or_default(),
            max_supplementary_count: 10,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn new(reference_date: NaiveDate, max_supplementary_count: usize) -> Self {
        Self {
            reference_date,
            max_supplementary_count,
            ..Self::default()
        }
    }

    /// Loads configuration from `ELIGIBILITY_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("ELIGIBILITY").try_parsing(true))
    }

    /// Loads configuration from any `config` source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("reference_date", defaults.reference_date.to_string())?
            .set_default("max_supplementary_count", defaults.max_supplementary_count as u64)?
            .set_default("log_level", defaults.log_level)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn reference_date(&self) -> ReferenceDate {
        ReferenceDate::new(self.reference_date)
    }

    pub fn with_max_supplementary_count(mut self, max: usize) -> Self {
        self.max_supplementary_count = max;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }
}
