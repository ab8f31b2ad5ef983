// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Command-line interface: argument parsing, console output and the `run` command.

/// CLI arguments.
pub mod args;

/// Console logging macros and verbosity.
pub mod logging;

/// The `run` command.
pub mod run;
