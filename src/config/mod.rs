//! Configuration loading and management for the Retention Engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: the unassigned-department label, the length of a tenure year and
//! which exit statuses count as completed separations.
//!
//! # Example
//!
//! ```no_run
//! use retention_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/retention").unwrap();
//! println!("Tenure year: {} days", loader.config().days_per_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_UNASSIGNED_DEPARTMENT, EngineConfig};
