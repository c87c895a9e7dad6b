//! Data ingestion layer for the workout dashboard.
//!
//! Responsible for discovering and parsing the CSV workout export,
//! classifying rows into muscle groups, aggregating the chart tables and
//! running the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use liftboard_core as core;
