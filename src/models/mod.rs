//! Core data models for the compensation rollup engine.
//!
//! This module contains all the domain models used throughout the engine.

mod budget;
mod employee;
mod lenient;
mod report;
mod roster;

pub use budget::BudgetSettings;
pub use employee::{Currency, EditedField, Employee};
pub use report::{
    AuditStep, AuditTrace, AuditWarning, BudgetCategory, BudgetStatus, CategoryBudget,
    FlaggedEmployee, LevelBreakdown, PromotedEmployee, Report, RosterTotals,
};
pub use roster::Roster;
