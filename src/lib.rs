//! Crime Dashboard - Monthly crime statistics loader & interactive trend viewer
//!
//! Loads a semicolon-delimited table of monthly crime figures, cleans it once,
//! and serves year/crime filtered views as a table and a line chart.

pub mod args;
pub mod charts;
pub mod data;
mod error;
pub mod gui;
pub mod stats;
pub mod view;

pub use args::Arguments;
pub use error::{DashboardError, DashboardResult};
