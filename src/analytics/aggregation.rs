//! Department aggregation.
//!
//! Rolls membership facts into one [`RetentionRow`] per department plus an
//! [`AggregateTotals`] computed from pooled counts and tenure samples (never
//! from averaging per-department figures).

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AggregateTotals, MembershipFact, RetentionRow};

/// Per-department rows and the whole-population totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentAggregation {
    /// One row per department, in order of first appearance.
    pub rows: Vec<RetentionRow>,
    /// Pooled totals across every department.
    pub totals: AggregateTotals,
}

#[derive(Debug, Clone, Copy, Default)]
struct GroupAccumulator {
    start_count: u32,
    retained_count: u32,
    retained_tenure_sum: Decimal,
}

impl GroupAccumulator {
    fn add(&mut self, fact: &MembershipFact) {
        self.start_count += 1;
        // Exited members contribute to the count but not to tenure.
        if fact.retained {
            self.retained_count += 1;
            self.retained_tenure_sum += fact.tenure_years;
        }
    }

    fn retention_rate(&self) -> Decimal {
        if self.start_count == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.retained_count) * Decimal::ONE_HUNDRED / Decimal::from(self.start_count)
    }

    fn average_tenure(&self) -> Decimal {
        if self.retained_count == 0 {
            return Decimal::ZERO;
        }
        self.retained_tenure_sum / Decimal::from(self.retained_count)
    }

    fn into_row(self, department: String) -> RetentionRow {
        RetentionRow {
            department,
            start_count: self.start_count,
            retained_count: self.retained_count,
            retention_rate: self.retention_rate(),
            average_tenure_years: self.average_tenure(),
        }
    }

    fn into_totals(self) -> AggregateTotals {
        AggregateTotals {
            start_count: self.start_count,
            retained_count: self.retained_count,
            retention_rate: self.retention_rate(),
            average_tenure_years: self.average_tenure(),
        }
    }
}

/// Groups facts by department and computes retention statistics.
///
/// Departments are compared by exact, case-sensitive string equality. An
/// empty input yields no rows and all-zero totals.
///
/// # Example
///
/// ```
/// use retention_engine::analytics::aggregate_by_department;
/// use retention_engine::models::{FeedSource, MembershipFact};
/// use rust_decimal::Decimal;
///
/// let facts = vec![
///     MembershipFact {
///         employee_id: "E1".to_string(),
///         department: "IT".to_string(),
///         tenure_years: Decimal::new(4, 0),
///         retained: true,
///         source: FeedSource::Roster,
///     },
///     MembershipFact {
///         employee_id: "E2".to_string(),
///         department: "IT".to_string(),
///         tenure_years: Decimal::new(9, 0),
///         retained: false,
///         source: FeedSource::Exits,
///     },
/// ];
///
/// let aggregation = aggregate_by_department(&facts);
/// assert_eq!(aggregation.rows.len(), 1);
/// assert_eq!(aggregation.rows[0].display_rate(), "50.0%");
/// assert_eq!(aggregation.rows[0].average_tenure_years, Decimal::new(4, 0));
/// assert_eq!(aggregation.totals.start_count, 2);
/// ```
pub fn aggregate_by_department(facts: &[MembershipFact]) -> DepartmentAggregation {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, GroupAccumulator> = HashMap::new();
    let mut pooled = GroupAccumulator::default();

    for fact in facts {
        let department = fact.department.as_str();
        groups
            .entry(department)
            .or_insert_with(|| {
                order.push(department);
                GroupAccumulator::default()
            })
            .add(fact);
        pooled.add(fact);
    }

    let rows = order
        .into_iter()
        .map(|department| {
            let group = groups.get(department).copied().unwrap_or_default();
            group.into_row(department.to_string())
        })
        .collect();

    DepartmentAggregation {
        rows,
        totals: pooled.into_totals(),
    }
}
