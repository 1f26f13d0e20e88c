//! Reporting query types.
//!
//! This module contains [`TargetYear`], the validated fiscal (calendar) year
//! being measured, and [`RetentionQuery`], which pairs it with an optional
//! department filter.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated four-digit calendar year.
///
/// # Example
///
/// ```
/// use retention_engine::models::TargetYear;
/// use chrono::NaiveDate;
///
/// let year: TargetYear = "2026".parse().unwrap();
/// assert_eq!(year.start(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(year.end(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
///
/// assert!("26".parse::<TargetYear>().is_err());
/// assert!(TargetYear::try_from(12026).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TargetYear(i32);

impl TargetYear {
    /// Smallest accepted year.
    pub const MIN: i32 = 1000;
    /// Largest accepted year.
    pub const MAX: i32 = 9999;

    /// Returns the year as an integer.
    pub fn value(self) -> i32 {
        self.0
    }

    /// January 1 of the year; the population snapshot instant.
    pub fn start(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 1, 1).expect("Four-digit years are representable")
    }

    /// December 31 of the year (inclusive end of the exit window).
    pub fn end(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 12, 31).expect("Four-digit years are representable")
    }

    /// Returns true if `date` falls within the year, inclusive of both ends.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }
}

impl TryFrom<i64> for TargetYear {
    type Error = EngineError;

    fn try_from(year: i64) -> EngineResult<Self> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&year) {
            return Err(EngineError::InvalidTargetYear {
                value: year.to_string(),
                message: format!("year must be between {} and {}", Self::MIN, Self::MAX),
            });
        }
        // Range check above guarantees the value fits.
        Ok(Self(year as i32))
    }
}

impl FromStr for TargetYear {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let trimmed = s.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::InvalidTargetYear {
                value: s.to_string(),
                message: "expected a four-digit year".to_string(),
            });
        }
        let year: i64 = trimmed.parse().map_err(|_| EngineError::InvalidTargetYear {
            value: s.to_string(),
            message: "expected a four-digit year".to_string(),
        })?;
        Self::try_from(year)
    }
}

impl From<TargetYear> for i64 {
    fn from(year: TargetYear) -> Self {
        i64::from(year.0)
    }
}

impl std::fmt::Display for TargetYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for one retention report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionQuery {
    /// The year being measured.
    pub target_year: TargetYear,
    /// When set, only this department's row is emitted. Totals always cover
    /// the whole population.
    #[serde(default)]
    pub department: Option<String>,
}

impl RetentionQuery {
    /// Creates an unfiltered query, validating the year.
    ///
    /// # Example
    ///
    /// ```
    /// use retention_engine::models::RetentionQuery;
    ///
    /// let query = RetentionQuery::new(2026)?.with_department("IT");
    /// assert_eq!(query.target_year.value(), 2026);
    /// assert_eq!(query.department.as_deref(), Some("IT"));
    /// # Ok::<(), retention_engine::error::EngineError>(())
    /// ```
    pub fn new(target_year: i64) -> EngineResult<Self> {
        Ok(Self::for_year(TargetYear::try_from(target_year)?))
    }

    /// Creates an unfiltered query for an already-validated year.
    pub fn for_year(target_year: TargetYear) -> Self {
        Self {
            target_year,
            department: None,
        }
    }

    /// Restricts the emitted rows to a single department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}
