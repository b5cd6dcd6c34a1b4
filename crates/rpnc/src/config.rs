//! Run configuration and command-line parsing.
//!
//! Flags are long-only (`--quiet`, `--seed=42`). Single-dash arguments such as
//! `-` or `-5` are calculator tokens, never flags. A bare `--` ends flag
//! parsing so that later arguments are taken literally.

use rpn_eval::UnderflowPolicy;

use crate::errors::{usage, RunError};

/// Extension that marks a token as a file to load.
pub const DEFAULT_EXTENSION: &str = ".rpn";

/// Default limit on nested file loads.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for one calculator session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Report the top of the stack after every token.
    pub echo: bool,
    /// Underflow handling for the calculator.
    pub policy: UnderflowPolicy,
    /// Seed for `rand`/`irand`; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Token suffix that triggers a file load.
    pub extension: String,
    /// Maximum nesting of file loads.
    pub max_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            echo: true,
            policy: UnderflowPolicy::Lenient,
            seed: None,
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RunConfig {
    /// Whether `token` names a file to load rather than a calculator token.
    pub fn is_file_ref(&self, token: &str) -> bool {
        let ext = self.extension.as_str();
        token.len() > ext.len()
            && token
                .get(token.len() - ext.len()..)
                .is_some_and(|suffix| suffix.eq_ignore_ascii_case(ext))
    }
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Evaluate `inputs` (interactive when empty).
    Run {
        config: RunConfig,
        inputs: Vec<String>,
    },
    Help,
    Version,
}

/// Parse process arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, RunError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = RunConfig::default();
    let mut inputs = Vec::new();
    let mut literal = false;

    for arg in args {
        if literal || !arg.starts_with("--") {
            inputs.push(arg);
        } else if arg == "--" {
            literal = true;
        } else if arg == "--help" {
            return Ok(Command::Help);
        } else if arg == "--version" {
            return Ok(Command::Version);
        } else if arg == "--quiet" {
            config.echo = false;
        } else if arg == "--strict" {
            config.policy = UnderflowPolicy::Strict;
        } else if let Some(seed) = arg.strip_prefix("--seed=") {
            let seed = seed
                .parse()
                .map_err(|_| usage(format!("invalid seed '{seed}': expected an unsigned integer")))?;
            config.seed = Some(seed);
        } else if let Some(ext) = arg.strip_prefix("--ext=") {
            if ext.is_empty() {
                return Err(usage("file extension must not be empty"));
            }
            config.extension = ext.to_string();
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            config.max_depth = match depth.parse::<usize>() {
                Ok(0) => return Err(usage("max depth must be at least 1")),
                Ok(depth) => depth,
                Err(_) => {
                    return Err(usage(format!(
                        "invalid depth '{depth}': expected a positive integer"
                    )))
                }
            };
        } else {
            return Err(usage(format!("unknown option '{arg}'")));
        }
    }

    Ok(Command::Run { config, inputs })
}
