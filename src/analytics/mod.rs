//! Retention analytics for the Retention Engine.
//!
//! This module contains the three pipeline stages, population
//! reconstruction, tenure calculation and department aggregation, together
//! with [`compute_retention`], which runs them in sequence.

mod aggregation;
mod pipeline;
mod population;
mod tenure;

pub use aggregation::{DepartmentAggregation, aggregate_by_department};
pub use pipeline::compute_retention;
pub use population::{PopulationSnapshot, reconstruct_population};
pub use tenure::{DISPLAY_PRECISION, round_for_display, tenure_years};
