//! Exit (separation) feed models.
//!
//! An [`ExitEvent`] records one separation together with a snapshot of the
//! employee as captured at exit time. The snapshot is independent of the
//! current roster and may disagree with it.

use serde::{Deserialize, Serialize};

use super::FeedDate;
use super::employee::department_label;

/// Processing state of an exit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    /// Raised but not yet approved.
    Pending,
    /// Approved, separation not yet processed.
    Approved,
    /// Separation processed and final.
    Completed,
    /// Withdrawn before taking effect.
    Cancelled,
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitStatus::Pending => write!(f, "pending"),
            ExitStatus::Approved => write!(f, "approved"),
            ExitStatus::Completed => write!(f, "completed"),
            ExitStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The employee as captured when the exit was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSnapshot {
    /// Identifier of the departing employee.
    pub id: String,
    /// Join date as captured at exit time.
    #[serde(default)]
    pub join_date: Option<FeedDate>,
    /// Department as captured at exit time.
    #[serde(default)]
    pub department: Option<String>,
}

/// A historical separation.
///
/// # Example
///
/// ```
/// use retention_engine::models::{ExitEvent, ExitStatus};
///
/// let json = r#"{
///     "employee": {"id": "E2", "join_date": "2019-05-01", "department": "HR"},
///     "effective_date": "2026-06-15",
///     "status": "completed"
/// }"#;
/// let exit: ExitEvent = serde_json::from_str(json).unwrap();
/// assert_eq!(exit.status, ExitStatus::Completed);
/// assert_eq!(exit.department_or("Unassigned"), "HR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitEvent {
    /// The employee snapshot taken at exit.
    pub employee: ExitSnapshot,
    /// The date the separation took effect.
    #[serde(default)]
    pub effective_date: Option<FeedDate>,
    /// Processing state of the record.
    pub status: ExitStatus,
}

impl ExitEvent {
    /// Returns the captured department, or `fallback` when none was recorded.
    pub fn department_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        department_label(self.employee.department.as_deref(), fallback)
    }
}
