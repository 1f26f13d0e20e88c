//! The retention pipeline entry point.
//!
//! Chains population reconstruction, tenure measurement and department
//! aggregation into one pure function: identical inputs always produce an
//! identical [`RetentionAnalysis`].

use chrono::NaiveDateTime;
use tracing::info;

use crate::config::EngineConfig;
use crate::models::{EmployeeRecord, ExitEvent, RetentionAnalysis, RetentionQuery};

use super::aggregation::{DepartmentAggregation, aggregate_by_department};
use super::population::reconstruct_population;

/// Computes department retention for the query's target year.
///
/// # Arguments
///
/// * `employees` - The current active roster
/// * `exits` - Completed exit records
/// * `query` - Target year and optional department filter
/// * `measured_at` - The instant tenure is measured against (normally "now")
/// * `config` - Engine configuration
///
/// # Behavior
///
/// A department filter narrows `rows` to the matching department only;
/// `totals` always cover the whole reconstructed population. Records with
/// unusable dates are reported in `issues` and otherwise ignored.
///
/// # Example
///
/// ```
/// use retention_engine::analytics::compute_retention;
/// use retention_engine::config::EngineConfig;
/// use retention_engine::models::{
///     EmployeeRecord, ExitEvent, ExitSnapshot, ExitStatus, FeedDate, RetentionQuery,
/// };
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| FeedDate::from(NaiveDate::from_ymd_opt(y, m, d).unwrap());
/// let roster = vec![EmployeeRecord {
///     id: "E1".to_string(),
///     join_date: Some(date(2020, 1, 1)),
///     department: Some("IT".to_string()),
/// }];
/// let exits = vec![ExitEvent {
///     employee: ExitSnapshot {
///         id: "E2".to_string(),
///         join_date: Some(date(2019, 5, 1)),
///         department: Some("HR".to_string()),
///     },
///     effective_date: Some(date(2026, 6, 15)),
///     status: ExitStatus::Completed,
/// }];
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
///
/// let analysis = compute_retention(
///     &roster,
///     &exits,
///     &RetentionQuery::new(2026)?,
///     now,
///     &EngineConfig::default(),
/// );
/// assert_eq!(analysis.rows.len(), 2);
/// assert_eq!(analysis.rows[0].display_rate(), "100.0%");
/// assert_eq!(analysis.rows[1].display_rate(), "0.0%");
/// assert_eq!(analysis.totals.display_rate(), "50.0%");
/// # Ok::<(), retention_engine::error::EngineError>(())
/// ```
pub fn compute_retention(
    employees: &[EmployeeRecord],
    exits: &[ExitEvent],
    query: &RetentionQuery,
    measured_at: NaiveDateTime,
    config: &EngineConfig,
) -> RetentionAnalysis {
    let snapshot = reconstruct_population(
        employees,
        exits,
        query.target_year,
        measured_at,
        config,
    );
    let DepartmentAggregation { rows, totals } = aggregate_by_department(&snapshot.facts);

    let rows = match query.department.as_deref() {
        Some(department) => rows
            .into_iter()
            .filter(|row| row.department == department)
            .collect(),
        None => rows,
    };

    info!(
        target_year = %query.target_year,
        start_count = totals.start_count,
        retained_count = totals.retained_count,
        rows = rows.len(),
        issues = snapshot.issues.len(),
        "Retention analysis computed"
    );

    RetentionAnalysis {
        target_year: query.target_year,
        measured_at,
        department_filter: query.department.clone(),
        rows,
        totals,
        issues: snapshot.issues,
    }
}
