//! navroute CLI library.
//!
//! Command handlers and output formatting for the `navroute-cli` binary.
//! The binary only parses arguments and dispatches here.

pub mod commands;
pub mod output;
