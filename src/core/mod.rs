//! Core library: course catalog, recommendation engine and lesson assessment

pub mod advisor;
pub mod assessment;
pub mod catalog;
pub mod config;
pub mod models;

/// Returns the current version of the `pathway_advisor` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
