//! Output sink for session reports.
//!
//! Reports can go to stdout (the binary), into a buffer (tests), or nowhere.
//! Uses enum dispatch rather than a trait object; the set of sinks is fixed.

/// Where report lines are written.
#[derive(Debug, Default)]
pub enum OutputSink {
    /// Writes each line to stdout.
    #[default]
    Stdout,
    /// Appends each line to an in-memory buffer.
    Buffer(String),
    /// Discards everything.
    Silent,
}

impl OutputSink {
    /// Create an empty buffer sink.
    pub fn buffer() -> Self {
        OutputSink::Buffer(String::new())
    }

    /// Write one line.
    pub fn println(&mut self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buf) => {
                buf.push_str(line);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for sinks that don't capture.
    pub fn captured(&self) -> &str {
        match self {
            Self::Buffer(buf) => buf,
            Self::Stdout | Self::Silent => "",
        }
    }
}
