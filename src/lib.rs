//! Compensation Review Rollup Engine
//!
//! This crate resolves per-employee salary increases entered as merit and
//! promotion percentages, absolute amounts or proposed salaries, and rolls a
//! roster up against base-salary and stock budgets with per-level
//! breakdowns. Rosters can be saved as projects keyed by name and access
//! key, exported as CSV, and served over a small HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;
