//! RPNC - command-line front end for the RPN calculator.
//!
//! Wires [`rpn_eval::Calculator`] to process arguments, script files and
//! interactive input.
//!
//! # Modules
//!
//! - `config`: `RunConfig` and long-flag parsing
//! - `session`: token routing, file loading, reporting
//! - `output`: where report lines go
//! - `logging`: `tracing` subscriber setup
//! - `errors`: fatal `RunError`s and their exit codes

mod config;
mod errors;
mod logging;
mod output;
mod session;

pub use config::{parse_args, Command, RunConfig, DEFAULT_EXTENSION, DEFAULT_MAX_DEPTH};
pub use errors::RunError;
pub use logging::init_tracing;
pub use output::OutputSink;
pub use session::Session;
