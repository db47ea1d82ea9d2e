//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::{MemoizedCalendar, RuleCalendar};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and a holiday calendar that caches each year it
/// has resolved.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    calendar: Arc<MemoizedCalendar<RuleCalendar>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let calendar = MemoizedCalendar::new(config.calendar());
        Self {
            config: Arc::new(config),
            calendar: Arc::new(calendar),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared holiday calendar.
    pub fn calendar(&self) -> &MemoizedCalendar<RuleCalendar> {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::HolidayCalendar;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_calendar_cache() {
        let state = AppState::new(ConfigLoader::builtin().unwrap());
        let clone = state.clone();

        state.calendar().holidays_in_year(2025).unwrap();
        assert_eq!(clone.calendar().cached_years(), 1);
        assert_eq!(clone.calendar().region(), "BR-RJ");
    }
}
