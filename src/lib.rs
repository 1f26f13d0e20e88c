//! Cohort Retention Analytics Engine
//!
//! This crate reconstructs the workforce present at the start of a year from
//! the current roster and historical exit records, and computes
//! department-level retention rates and average tenure for that year.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
