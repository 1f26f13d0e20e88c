//! Core data models for the Retention Engine.
//!
//! This module contains the input feed records, the reporting query and
//! the derived retention outputs.

mod employee;
mod exit_event;
mod feed_date;
mod query;
mod retention;

pub use employee::EmployeeRecord;
pub use exit_event::{ExitEvent, ExitSnapshot, ExitStatus};
pub use feed_date::FeedDate;
pub use query::{RetentionQuery, TargetYear};
pub use retention::{
    AggregateTotals, DataQualityIssue, FeedSource, IssueKind, MembershipFact, RetentionAnalysis,
    RetentionRow,
};
