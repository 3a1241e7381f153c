//! Shared library for `pathway_advisor`
//!
//! Course pathway recommendations for Alberta high-school math and physics,
//! plus lesson knowledge checks and AI-generated practice questions. The CLI
//! in `src/cli` is a thin front end over these modules.

pub mod core;
pub mod logger;

pub use crate::core::{advisor, assessment, catalog, config, get_version, models};
