//! `quake-slider` library crate.
//!
//! The viewer binary is a thin wrapper around this library so the binning
//! and filtering logic can be tested without a window, and so the sample
//! generator shares the feed model.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
