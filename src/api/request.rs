//! Request types for the Retention Engine API.
//!
//! This module defines the JSON request structure for the `/retention` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, ExitEvent, RetentionQuery, TargetYear};

/// A target year as sent by a client: a JSON integer, a string, or any
/// other value.
///
/// Kept loose at the JSON layer so that a badly formatted year is reported
/// as an `INVALID_TARGET_YEAR` validation error rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearInput {
    /// A numeric year, e.g. `2026`.
    Number(i64),
    /// A textual year, e.g. `"2026"`.
    Text(String),
    /// Anything else: fractions, out-of-range integers, `null`, objects.
    Other(serde_json::Value),
}

impl YearInput {
    /// Validates the input as a four-digit year.
    pub fn to_target_year(&self) -> EngineResult<TargetYear> {
        match self {
            YearInput::Number(year) => TargetYear::try_from(*year),
            YearInput::Text(text) => text.parse(),
            YearInput::Other(value) => Err(EngineError::InvalidTargetYear {
                value: value.to_string(),
                message: "expected a four-digit year".to_string(),
            }),
        }
    }
}

/// Request body for the `/retention` endpoint.
///
/// `employees` and `exits` may be omitted or `null`; both are then treated
/// as empty feeds. Exit records whose status is not configured as terminal
/// are dropped before analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionRequest {
    /// The year to measure.
    pub target_year: YearInput,
    /// Restrict the returned rows to one department.
    #[serde(default)]
    pub department: Option<String>,
    /// Measurement instant for tenure. Defaults to the time of the request.
    #[serde(default)]
    pub measured_at: Option<DateTime<Utc>>,
    /// The current active roster.
    #[serde(default)]
    pub employees: Option<Vec<EmployeeRecord>>,
    /// Exit records in any status.
    #[serde(default)]
    pub exits: Option<Vec<ExitEvent>>,
}

impl RetentionRequest {
    /// Builds the validated query for this request.
    pub fn query(&self) -> EngineResult<RetentionQuery> {
        let mut query = RetentionQuery::for_year(self.target_year.to_target_year()?);
        query.department = self.department.clone();
        Ok(query)
    }
}
