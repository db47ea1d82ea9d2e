//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the region's payroll
//! configuration from YAML files: payroll policy, the social-contribution and
//! income-tax bracket schedules, and the holiday rules.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/br-rj").unwrap();
//! println!("Loaded region: {}", config.region().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Bracket, BracketSchedule, HolidayDate, HolidayDefinition, HolidaysConfig, OvertimePremiums,
    PayrollConfig, PayrollPolicy, RegionMetadata, YearRange,
};
