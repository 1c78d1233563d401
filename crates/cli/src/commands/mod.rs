//! Subcommand implementations.

pub mod detect;
pub mod sum;
pub mod table;
