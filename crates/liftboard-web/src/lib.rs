//! Web layer for the workout dashboard.
//!
//! Provides the page theme, plotly chart builders, server-side HTML
//! rendering, HTTP routes and the axum server that ties them together.

pub mod charts;
pub mod page;
pub mod routes;
pub mod server;
pub mod theme;

pub use liftboard_data as data;
