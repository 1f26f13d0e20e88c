//! Retention analysis models.
//!
//! This module contains the derived per-member [`MembershipFact`], the
//! aggregated [`RetentionRow`] and [`AggregateTotals`] outputs, and the
//! [`DataQualityIssue`] records produced when individual feed entries
//! cannot be used.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TargetYear;
use crate::analytics::round_for_display;

/// Which input feed a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    /// The current active roster.
    Roster,
    /// The historical exit feed.
    Exits,
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Roster => write!(f, "roster"),
            FeedSource::Exits => write!(f, "exits"),
        }
    }
}

/// One member of the start-of-year population.
///
/// Built fresh for every report and discarded after aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipFact {
    /// Identifier of the member.
    pub employee_id: String,
    /// Department the member is counted under.
    pub department: String,
    /// Service in years from join date to the measurement instant (unrounded).
    #[serde(with = "rust_decimal::serde::str")]
    pub tenure_years: Decimal,
    /// True if the member did not leave during the target year.
    pub retained: bool,
    /// The feed the fact was derived from.
    pub source: FeedSource,
}

/// The kind of problem found with a feed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The record has no join date.
    MissingJoinDate,
    /// The join date could not be parsed.
    UnparseableJoinDate,
    /// The exit record has no effective date.
    MissingEffectiveDate,
    /// The exit effective date could not be parsed.
    UnparseableEffectiveDate,
    /// The identifier was already counted; this record was dropped.
    DuplicateIdentifier,
}

/// A feed record that was skipped while reconstructing the population.
///
/// Issues never halt a computation; they are reported alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityIssue {
    /// The feed the record came from.
    pub source: FeedSource,
    /// Identifier of the affected record.
    pub record_id: String,
    /// What was wrong with it.
    pub kind: IssueKind,
    /// Human-readable explanation.
    pub detail: String,
}

/// Retention statistics for one department.
///
/// # Example
///
/// ```
/// use retention_engine::models::RetentionRow;
/// use rust_decimal::Decimal;
///
/// let row = RetentionRow {
///     department: "IT".to_string(),
///     start_count: 3,
///     retained_count: 2,
///     retention_rate: Decimal::new(200, 0) / Decimal::new(3, 0),
///     average_tenure_years: Decimal::new(675, 2),
/// };
/// assert_eq!(row.display_rate(), "66.7%");
/// assert_eq!(row.display_tenure(), "6.8");
/// assert_eq!(row.display_cells(), ["IT", "3", "2", "66.7%", "6.8"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionRow {
    /// Department name, case preserved.
    pub department: String,
    /// Members present at the start of the year.
    pub start_count: u32,
    /// Of those, members still present.
    pub retained_count: u32,
    /// `retained_count / start_count * 100`, or zero for an empty group.
    #[serde(with = "rust_decimal::serde::str")]
    pub retention_rate: Decimal,
    /// Mean tenure of retained members, or zero when there are none.
    #[serde(with = "rust_decimal::serde::str")]
    pub average_tenure_years: Decimal,
}

impl RetentionRow {
    /// Column labels used by report renderers and exports.
    pub const COLUMN_HEADERS: [&'static str; 5] = [
        "Department",
        "Count (Start)",
        "Retained",
        "Retention %",
        "Avg Tenure",
    ];

    /// Retention rate rounded to one decimal place with a percent sign.
    pub fn display_rate(&self) -> String {
        format_rate(self.retention_rate)
    }

    /// Average tenure rounded to one decimal place.
    pub fn display_tenure(&self) -> String {
        format_tenure(self.average_tenure_years)
    }

    /// The row as display cells, in [`Self::COLUMN_HEADERS`] order.
    pub fn display_cells(&self) -> [String; 5] {
        [
            self.department.clone(),
            self.start_count.to_string(),
            self.retained_count.to_string(),
            self.display_rate(),
            self.display_tenure(),
        ]
    }
}

/// Whole-population rollup, computed from pooled counts and tenure samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// Members present at the start of the year, all departments.
    pub start_count: u32,
    /// Of those, members still present.
    pub retained_count: u32,
    /// Rate recomputed from the summed counts.
    #[serde(with = "rust_decimal::serde::str")]
    pub retention_rate: Decimal,
    /// Mean over every retained member's tenure.
    #[serde(with = "rust_decimal::serde::str")]
    pub average_tenure_years: Decimal,
}

impl AggregateTotals {
    /// Label used for the totals line in rendered reports.
    pub const LABEL: &'static str = "Total";

    /// Retention rate rounded to one decimal place with a percent sign.
    pub fn display_rate(&self) -> String {
        format_rate(self.retention_rate)
    }

    /// Average tenure rounded to one decimal place.
    pub fn display_tenure(&self) -> String {
        format_tenure(self.average_tenure_years)
    }

    /// The totals line as display cells, in [`RetentionRow::COLUMN_HEADERS`] order.
    pub fn display_cells(&self) -> [String; 5] {
        [
            Self::LABEL.to_string(),
            self.start_count.to_string(),
            self.retained_count.to_string(),
            self.display_rate(),
            self.display_tenure(),
        ]
    }
}

fn format_rate(rate: Decimal) -> String {
    format!("{}%", round_for_display(rate))
}

fn format_tenure(years: Decimal) -> String {
    round_for_display(years).to_string()
}

/// The complete output of one retention computation.
///
/// Deterministic for identical inputs; report identifiers and timestamps
/// are added by the HTTP layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionAnalysis {
    /// The year measured.
    pub target_year: TargetYear,
    /// The instant tenure was measured against.
    pub measured_at: NaiveDateTime,
    /// Department filter applied to `rows`, if any.
    pub department_filter: Option<String>,
    /// Per-department rows in order of first appearance.
    pub rows: Vec<RetentionRow>,
    /// Whole-population totals. Never affected by the department filter.
    pub totals: AggregateTotals,
    /// Records skipped during reconstruction.
    pub issues: Vec<DataQualityIssue>,
}
