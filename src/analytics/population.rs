//! Start-of-year population reconstruction.
//!
//! Rebuilds "who was present at 00:00 on January 1 of the target year" from
//! two present-tense feeds: the active roster and the exit records. Roster
//! members who joined before the year started were present then and are
//! still present now. Exits that took effect during the year, for members
//! who joined before it started, are the ones who were present and left.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{
    DataQualityIssue, EmployeeRecord, ExitEvent, FeedDate, FeedSource, IssueKind, MembershipFact,
    TargetYear,
};

use super::tenure::tenure_years;

/// The reconstructed start population and the records that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationSnapshot {
    /// Roster-derived facts first, then exit-derived facts, each in feed order.
    pub facts: Vec<MembershipFact>,
    /// Records excluded because of bad data or conflicting identifiers.
    pub issues: Vec<DataQualityIssue>,
}

impl PopulationSnapshot {
    fn skip(&mut self, source: FeedSource, record_id: &str, kind: IssueKind, detail: String) {
        debug!(
            record_id = %record_id,
            source = %source,
            reason = ?kind,
            "Skipping feed record"
        );
        self.issues.push(DataQualityIssue {
            source,
            record_id: record_id.to_string(),
            kind,
            detail,
        });
    }
}

enum DateCheck {
    Valid(NaiveDate),
    Missing,
    Unparseable(String),
}

fn check_date(value: Option<&FeedDate>) -> DateCheck {
    match value {
        None => DateCheck::Missing,
        Some(date) => match date.resolve() {
            Some(resolved) => DateCheck::Valid(resolved),
            None => DateCheck::Unparseable(date.as_text()),
        },
    }
}

/// Resolves a join date, recording an issue when it cannot be established.
fn eligible_join_date(
    snapshot: &mut PopulationSnapshot,
    source: FeedSource,
    record_id: &str,
    join_date: Option<&FeedDate>,
) -> Option<NaiveDate> {
    match check_date(join_date) {
        DateCheck::Valid(date) => Some(date),
        DateCheck::Missing => {
            snapshot.skip(
                source,
                record_id,
                IssueKind::MissingJoinDate,
                "join date is missing".to_string(),
            );
            None
        }
        DateCheck::Unparseable(raw) => {
            snapshot.skip(
                source,
                record_id,
                IssueKind::UnparseableJoinDate,
                format!("join date '{}' could not be parsed", raw),
            );
            None
        }
    }
}

/// Reconstructs the population present at the start of `target_year`.
///
/// # Arguments
///
/// * `employees` - The current active roster
/// * `exits` - Completed exit records; other statuses must already be removed
/// * `target_year` - The year being measured
/// * `measured_at` - The instant tenure is measured against
/// * `config` - Supplies the unassigned label and tenure year length
///
/// # Behavior
///
/// - A join date on or after January 1 excludes the record (strict less-than)
/// - An exit effective outside the target year excludes the record
/// - Missing or unparseable dates exclude the record and produce an issue
/// - An identifier kept from the exit feed suppresses the same identifier on
///   the roster; repeated identifiers within a feed keep the first occurrence
///
/// # Example
///
/// ```
/// use retention_engine::analytics::reconstruct_population;
/// use retention_engine::config::EngineConfig;
/// use retention_engine::models::{EmployeeRecord, FeedDate, TargetYear};
/// use chrono::NaiveDate;
///
/// let roster = vec![EmployeeRecord {
///     id: "E1".to_string(),
///     join_date: Some(FeedDate::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
///     department: Some("IT".to_string()),
/// }];
/// let year = TargetYear::try_from(2026).unwrap();
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
///
/// let snapshot = reconstruct_population(&roster, &[], year, now, &EngineConfig::default());
/// assert_eq!(snapshot.facts.len(), 1);
/// assert!(snapshot.facts[0].retained);
/// assert_eq!(snapshot.facts[0].department, "IT");
/// ```
pub fn reconstruct_population(
    employees: &[EmployeeRecord],
    exits: &[ExitEvent],
    target_year: TargetYear,
    measured_at: NaiveDateTime,
    config: &EngineConfig,
) -> PopulationSnapshot {
    let year_start = target_year.start();
    let mut snapshot = PopulationSnapshot::default();

    // Exits first so their identifiers take precedence over the roster.
    let mut exit_ids: HashSet<&str> = HashSet::new();
    let mut exit_facts = Vec::new();
    for exit in exits {
        let record_id = exit.employee.id.as_str();

        let effective_date = match check_date(exit.effective_date.as_ref()) {
            DateCheck::Valid(date) => date,
            DateCheck::Missing => {
                snapshot.skip(
                    FeedSource::Exits,
                    record_id,
                    IssueKind::MissingEffectiveDate,
                    "effective date is missing".to_string(),
                );
                continue;
            }
            DateCheck::Unparseable(raw) => {
                snapshot.skip(
                    FeedSource::Exits,
                    record_id,
                    IssueKind::UnparseableEffectiveDate,
                    format!("effective date '{}' could not be parsed", raw),
                );
                continue;
            }
        };
        if !target_year.contains(effective_date) {
            continue;
        }

        let Some(join_date) = eligible_join_date(
            &mut snapshot,
            FeedSource::Exits,
            record_id,
            exit.employee.join_date.as_ref(),
        ) else {
            continue;
        };
        if join_date >= year_start {
            continue;
        }

        if !exit_ids.insert(record_id) {
            snapshot.skip(
                FeedSource::Exits,
                record_id,
                IssueKind::DuplicateIdentifier,
                format!("identifier already has an exit in {}", target_year),
            );
            continue;
        }

        exit_facts.push(MembershipFact {
            employee_id: record_id.to_string(),
            department: exit.department_or(&config.unassigned_department).to_string(),
            tenure_years: tenure_years(join_date, measured_at, config.days_per_year),
            retained: false,
            source: FeedSource::Exits,
        });
    }

    let mut roster_ids: HashSet<&str> = HashSet::new();
    for employee in employees {
        let record_id = employee.id.as_str();

        let Some(join_date) = eligible_join_date(
            &mut snapshot,
            FeedSource::Roster,
            record_id,
            employee.join_date.as_ref(),
        ) else {
            continue;
        };
        if join_date >= year_start {
            continue;
        }

        if exit_ids.contains(record_id) {
            snapshot.skip(
                FeedSource::Roster,
                record_id,
                IssueKind::DuplicateIdentifier,
                format!(
                    "identifier also exited during {}; counted as an exit",
                    target_year
                ),
            );
            continue;
        }
        if !roster_ids.insert(record_id) {
            snapshot.skip(
                FeedSource::Roster,
                record_id,
                IssueKind::DuplicateIdentifier,
                "identifier appears more than once on the roster".to_string(),
            );
            continue;
        }

        snapshot.facts.push(MembershipFact {
            employee_id: record_id.to_string(),
            department: employee
                .department_or(&config.unassigned_department)
                .to_string(),
            tenure_years: tenure_years(join_date, measured_at, config.days_per_year),
            retained: true,
            source: FeedSource::Roster,
        });
    }

    snapshot.facts.extend(exit_facts);
    snapshot
}
