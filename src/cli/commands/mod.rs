//! CLI command handlers for `pathadvisor`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod advise;
pub mod catalog;
pub mod config;
pub mod question;
pub mod quiz;
pub mod wizard;

use pathway_advisor::advisor::Recommendation;
use std::io::{self, Write};

/// Print a recommendation as a titled block
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn write_recommendation(out: &mut impl Write, rec: &Recommendation) -> io::Result<()> {
    writeln!(out, "\n[{}] {}  ({})", rec.color, rec.title, rec.tier)?;
    writeln!(out, "  {}", rec.message)?;
    writeln!(out, "  Recommendation: {}", rec.recommendation)?;
    writeln!(out, "  Next step: {}", rec.action)
}
