//! Configuration types for retention analytics.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from `engine.yaml`.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::ExitStatus;

/// Default label for members with no department.
pub const DEFAULT_UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Engine configuration.
///
/// Every field is optional in YAML and falls back to the values in
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grouping label for members with no department.
    pub unassigned_department: String,
    /// Length of a tenure year in days.
    pub days_per_year: Decimal,
    /// Exit statuses that count as a completed separation. Exit records in
    /// any other status are dropped before they reach the engine.
    pub terminal_exit_statuses: Vec<ExitStatus>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unassigned_department: DEFAULT_UNASSIGNED_DEPARTMENT.to_string(),
            days_per_year: Decimal::new(36525, 2),
            terminal_exit_statuses: vec![ExitStatus::Completed],
        }
    }
}

impl EngineConfig {
    /// Checks that the configuration can be used for computation.
    pub fn validate(&self) -> EngineResult<()> {
        if self.unassigned_department.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "unassigned_department".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.days_per_year <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "days_per_year".to_string(),
                message: format!("must be greater than zero, got {}", self.days_per_year),
            });
        }
        if self.terminal_exit_statuses.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "terminal_exit_statuses".to_string(),
                message: "at least one status is required".to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if an exit in `status` is a completed separation.
    pub fn is_terminal(&self, status: ExitStatus) -> bool {
        self.terminal_exit_statuses.contains(&status)
    }
}
