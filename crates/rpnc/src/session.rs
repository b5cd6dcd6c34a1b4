//! Calculator session: feeds tokens from arguments, files and interactive
//! input into one [`Calculator`] and reports what happened.
//!
//! The calculator's stack and variables persist across every source for the
//! lifetime of the session. A token ending in the configured extension
//! (`.rpn` by default) loads that file in place, recursively; a file that is
//! already being loaded is skipped rather than re-entered.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rpn_eval::{Calculator, EvalError, Outcome};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::errors::RunError;
use crate::output::OutputSink;

/// Interactive tokens that end the session (case-insensitive).
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// One calculator plus the plumbing around it.
#[derive(Debug)]
pub struct Session {
    calc: Calculator,
    config: RunConfig,
    sink: OutputSink,
    /// Canonical paths of files currently being loaded, outermost first.
    loading: Vec<PathBuf>,
}

impl Session {
    /// Create a session from `config`, writing reports to `sink`.
    pub fn new(config: RunConfig, sink: OutputSink) -> Self {
        let calc = match config.seed {
            Some(seed) => Calculator::with_seed(seed),
            None => Calculator::new(),
        }
        .with_policy(config.policy);

        Session {
            calc,
            config,
            sink,
            loading: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    /// Process command-line inputs in order.
    ///
    /// An input that as a whole names a file is loaded (so paths may contain
    /// spaces); any other input is split on whitespace.
    pub fn run_inputs(&mut self, inputs: &[String]) -> Result<(), RunError> {
        for input in inputs {
            let trimmed = input.trim();
            if self.config.is_file_ref(trimmed) {
                self.load_file(Path::new(trimmed))?;
            } else {
                self.eval_line(input)?;
            }
        }
        Ok(())
    }

    /// Evaluate every token on one line.
    pub fn eval_line(&mut self, line: &str) -> Result<(), RunError> {
        for token in line.split_whitespace() {
            self.eval_token(token)?;
        }
        Ok(())
    }

    /// Evaluate one token, loading it as a file if it carries the extension.
    pub fn eval_token(&mut self, token: &str) -> Result<(), RunError> {
        if self.config.is_file_ref(token) {
            return self.load_file(Path::new(token));
        }

        let result = self.calc.eval_token(token);
        self.report(&result);
        Ok(())
    }

    /// Load `path` and evaluate its lines.
    ///
    /// Failing to open or read the file is fatal. A file that is already
    /// being loaded, or one nested deeper than `max_depth`, is reported and
    /// skipped.
    pub fn load_file(&mut self, path: &Path) -> Result<(), RunError> {
        let file = File::open(path).map_err(|source| RunError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if self.loading.contains(&key) {
            warn!(path = %path.display(), "recursive load skipped");
            self.sink.println(&format!(
                "Skipping {}: file is already being loaded",
                path.display()
            ));
            return Ok(());
        }
        if self.loading.len() >= self.config.max_depth {
            warn!(path = %path.display(), depth = self.loading.len(), "load depth exceeded");
            self.sink.println(&format!(
                "Skipping {}: nesting deeper than {} files",
                path.display(),
                self.config.max_depth
            ));
            return Ok(());
        }

        info!(path = %path.display(), depth = self.loading.len(), "loading file");
        self.loading.push(key);
        let result = self.eval_reader(BufReader::new(file), path);
        self.loading.pop();
        result
    }

    fn eval_reader<R: BufRead>(&mut self, mut reader: R, path: &Path) -> Result<(), RunError> {
        let mut buf = Vec::new();
        while let Some(line) = read_line(&mut reader, &mut buf).map_err(|source| RunError::Read {
            path: path.to_path_buf(),
            source,
        })? {
            self.eval_line(&line)?;
        }
        Ok(())
    }

    /// Read lines from `input` until an `exit`/`quit` token or end of input.
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R) -> Result<(), RunError> {
        let mut buf = Vec::new();
        while let Some(line) =
            read_line(&mut input, &mut buf).map_err(|source| RunError::Stdin { source })?
        {
            for token in line.split_whitespace() {
                if EXIT_WORDS.iter().any(|word| token.eq_ignore_ascii_case(word)) {
                    debug!("interactive session ended by {token}");
                    return Ok(());
                }
                self.eval_token(token)?;
            }
        }
        Ok(())
    }

    /// Report the final top of the stack and return it.
    pub fn finish(&mut self) -> f64 {
        let top = self.calc.top();
        self.sink.println(&format!("Top of stack at end: {top}"));
        top
    }

    fn report(&mut self, result: &Result<Outcome, EvalError>) {
        match result {
            Ok(Outcome::Skipped) => return,
            Ok(Outcome::Bound { name, value, .. }) => {
                self.sink.println(&format!("Setting {name} to {value}"));
            }
            Ok(Outcome::Literal(_) | Outcome::Operator(_) | Outcome::Recalled { .. }) => {}
            Err(EvalError::UnknownToken { token }) => {
                let count = self.calc.variables().count();
                self.sink
                    .println(&format!("Failed to interpret {token}  VarCount: {count}"));
            }
            Err(err) => self.sink.println(&format!("Error: {err}")),
        }

        if self.config.echo {
            self.sink
                .println(&format!("Top of stack: {}", self.calc.top()));
        }
    }
}

/// Read one line into `buf` and decode it.
///
/// Bytes that are not valid UTF-8 become U+FFFD, so a bad token is reported
/// like any other unknown token. Returns `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
