//! Application state for the Retention Engine API.
//!
//! Handlers share the loaded configuration and a clock. The clock supplies
//! the tenure measurement instant whenever a request does not pin one.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ConfigLoader;

type Clock = dyn Fn() -> DateTime<Utc> + Send + Sync;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    clock: Arc<Clock>,
}

impl AppState {
    /// Creates state that measures tenure against the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, Utc::now)
    }

    /// Creates state with a custom source for "now".
    ///
    /// # Example
    ///
    /// ```
    /// use retention_engine::api::AppState;
    /// use retention_engine::config::ConfigLoader;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let fixed = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    /// let state = AppState::with_clock(ConfigLoader::default(), move || fixed);
    /// assert_eq!(state.now(), fixed);
    /// ```
    pub fn with_clock<F>(config: ConfigLoader, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            config: Arc::new(config),
            clock: Arc::new(clock),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the current instant according to the state's clock.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_app_state_is_clone_and_shareable() {
        // axum requires Clone + Send + Sync state
        fn assert_state<T: Clone + Send + Sync + 'static>() {}
        assert_state::<AppState>();
    }

    #[test]
    fn test_clones_share_configuration() {
        let state = AppState::new(ConfigLoader::default());
        let clone = state.clone();
        assert!(std::ptr::eq(state.config(), clone.config()));
    }

    #[test]
    fn test_fixed_clock() {
        let fixed = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let state = AppState::with_clock(ConfigLoader::default(), move || fixed);
        assert_eq!(state.now(), fixed);
        assert_eq!(state.clone().now(), fixed);
    }
}
