//! Core domain layer for Liftboard.
//!
//! Holds the workout-set data model, the keyword-based muscle-group
//! classifier, timestamp and calendar helpers, number formatting for the
//! dashboard, CLI settings and the shared error type used across crates.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
