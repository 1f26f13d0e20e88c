//! Current roster model.
//!
//! This module defines [`EmployeeRecord`], one entry of the present-tense
//! roster feed. Every record on that feed is a worker who is active at
//! report generation time.

use serde::{Deserialize, Serialize};

use super::FeedDate;

/// A worker on the current (active) roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Opaque unique identifier for the employee.
    pub id: String,
    /// The date the employee joined. `None` when the feed omits it.
    #[serde(default)]
    pub join_date: Option<FeedDate>,
    /// The department the employee currently belongs to, if any.
    #[serde(default)]
    pub department: Option<String>,
}

impl EmployeeRecord {
    /// Returns the department name, or `fallback` when none is assigned.
    ///
    /// An empty department name counts as unassigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use retention_engine::models::EmployeeRecord;
    ///
    /// let employee = EmployeeRecord {
    ///     id: "E1".to_string(),
    ///     join_date: None,
    ///     department: None,
    /// };
    /// assert_eq!(employee.department_or("Unassigned"), "Unassigned");
    /// ```
    pub fn department_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        department_label(self.department.as_deref(), fallback)
    }
}

/// Normalizes an optional department name to a grouping key.
pub(crate) fn department_label<'a>(department: Option<&'a str>, fallback: &'a str) -> &'a str {
    match department {
        Some(name) if !name.is_empty() => name,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "E1",
            "join_date": "2020-01-01",
            "department": "IT"
        }"#;

        let employee: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "E1");
        assert_eq!(
            employee.join_date.and_then(|d| d.resolve()),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(employee.department.as_deref(), Some("IT"));
    }

    #[test]
    fn test_deserialize_record_with_missing_fields() {
        let employee: EmployeeRecord = serde_json::from_str(r#"{"id": "E9"}"#).unwrap();
        assert!(employee.join_date.is_none());
        assert!(employee.department.is_none());
    }

    #[test]
    fn test_deserialize_null_department() {
        let json = r#"{"id": "E3", "join_date": "2018-03-01", "department": null}"#;
        let employee: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(employee.department_or("Unassigned"), "Unassigned");
    }

    #[test]
    fn test_empty_department_is_unassigned() {
        let employee = EmployeeRecord {
            id: "E4".to_string(),
            join_date: None,
            department: Some(String::new()),
        };
        assert_eq!(employee.department_or("Unassigned"), "Unassigned");
    }

    #[test]
    fn test_department_case_is_preserved() {
        let employee = EmployeeRecord {
            id: "E5".to_string(),
            join_date: None,
            department: Some("finance".to_string()),
        };
        assert_eq!(employee.department_or("Unassigned"), "finance");
    }
}
