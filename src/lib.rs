//! Monthly payroll engine for Rio de Janeiro, Brazil
//!
//! This crate classifies the days of a month against the BR-RJ holiday
//! calendar and calculates overtime, weekly-rest compensation (DSR), the INSS
//! social contribution, IRRF withholding and net pay, with an audit trail of
//! every step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
