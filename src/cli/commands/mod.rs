//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait. A command that returns
//! `Ok(())` exits with status 0; errors are reported by `main`.

pub mod report;

use std::io::Write;

use crate::error::Result;

pub use report::ReportCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing its output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<()>;
}
