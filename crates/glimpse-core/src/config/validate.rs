//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// `sampling.iterations` and `aggregation.top_n` may be zero — both
    /// degrade to the empty-result path rather than erroring.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "sampling.timeout_ms must be > 0".into(),
            ));
        }
        if self.sampling.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "sampling.max_tokens must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.sampling.temperature) {
            return Err(ConfigError::ValidationError(
                "sampling.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.sampling.retry_delay_ms == 0 {
            return Err(ConfigError::ValidationError(
                "sampling.retry_delay_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
