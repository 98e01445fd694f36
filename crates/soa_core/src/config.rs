//! # Container Configuration
//!
//! Sizing knobs for a multi-array, loadable from TOML so that tools embedding
//! the container can tune it without recompiling.
//!
//! ```toml
//! initial_capacity = 4096
//! min_capacity = 64
//! ```

use serde::Deserialize;

use crate::error::{MultiArrayError, MultiArrayResult};

/// Default capacity of a freshly constructed container.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1;

/// Default floor for the capacity chosen by growth.
pub const DEFAULT_MIN_CAPACITY: usize = 1;

/// Sizing configuration for a [`MultiArray`](crate::MultiArray).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Number of slots allocated per column at construction.
    pub initial_capacity: usize,
    /// Lower bound on the capacity picked when the container grows.
    ///
    /// Growth doubles the capacity; this floor also lets a container built
    /// from zero rows grow at all.
    pub min_capacity: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            min_capacity: DEFAULT_MIN_CAPACITY,
        }
    }
}

impl ArrayConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::InvalidConfig`] on malformed TOML or on
    /// values rejected by [`ArrayConfig::validate`].
    pub fn from_toml_str(text: &str) -> MultiArrayResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| MultiArrayError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the growth floor.
    #[must_use]
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    /// Checks that both capacities are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`MultiArrayError::InvalidConfig`] naming the offending key.
    pub fn validate(&self) -> MultiArrayResult<()> {
        if self.initial_capacity == 0 {
            return Err(MultiArrayError::InvalidConfig(
                "initial_capacity must be greater than zero".to_owned(),
            ));
        }
        if self.min_capacity == 0 {
            return Err(MultiArrayError::InvalidConfig(
                "min_capacity must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArrayConfig::default();
        assert_eq!(config.initial_capacity, 1);
        assert_eq!(config.min_capacity, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full() {
        let config = ArrayConfig::from_toml_str("initial_capacity = 4096\nmin_capacity = 64\n")
            .unwrap();
        assert_eq!(
            config,
            ArrayConfig::default()
                .with_initial_capacity(4096)
                .with_min_capacity(64)
        );
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = ArrayConfig::from_toml_str("min_capacity = 16").unwrap();
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.min_capacity, 16);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = ArrayConfig::from_toml_str("growth_factor = 3").unwrap_err();
        assert!(matches!(err, MultiArrayError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_rejects_zero() {
        let err = ArrayConfig::from_toml_str("initial_capacity = 0").unwrap_err();
        assert_eq!(
            err,
            MultiArrayError::InvalidConfig("initial_capacity must be greater than zero".to_owned())
        );
    }
}
