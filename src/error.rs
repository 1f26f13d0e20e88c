//! Error types for the Retention Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only conditions that halt a computation live here; per-record data
//! problems are reported as [`DataQualityIssue`](crate::models::DataQualityIssue)
//! values and never surface as errors.

use thiserror::Error;

/// The main error type for the Retention Engine.
///
/// # Example
///
/// ```
/// use retention_engine::error::EngineError;
///
/// let error = EngineError::InvalidTargetYear {
///     value: "26".to_string(),
///     message: "expected a four-digit year".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid target year '26': expected a four-digit year");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The requested reporting year is not a four-digit calendar year.
    #[error("Invalid target year '{value}': {message}")]
    InvalidTargetYear {
        /// The value as supplied by the caller.
        value: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "days_per_year".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'days_per_year': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_target_year_displays_value_and_message() {
        let error = EngineError::InvalidTargetYear {
            value: "20x6".to_string(),
            message: "expected a four-digit year".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid target year '20x6': expected a four-digit year"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_year() -> EngineResult<()> {
            Err(EngineError::InvalidTargetYear {
                value: "0".to_string(),
                message: "out of range".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_year()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
