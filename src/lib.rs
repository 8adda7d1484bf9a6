//! Hourly heat-demand profiles for residential and commercial buildings.
//!
//! Combines an hourly outdoor temperature series, a holiday calendar and
//! per-category building parameters into a table of hourly heat demand,
//! using the BDEW standard heat load profiles.

pub mod calendar;
pub mod config;
pub mod index;
pub mod io;
/// Temperature input, profile generation and export as one run.
pub mod pipeline;
pub mod profile;
pub mod reporting;
pub mod table;
pub mod weather;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
