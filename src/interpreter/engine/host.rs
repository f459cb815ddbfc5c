use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    process::Command,
};

use crate::error::ScriptError;

/// The outside world as seen by a running script.
pub trait Host {
    /// Writes program output. No newline is added.
    ///
    /// # Errors
    /// Returns an error if the output stream cannot be written.
    fn write_output(&mut self, text: &str) -> io::Result<()>;

    /// Reports a non-fatal fault. Execution continues afterwards.
    fn report(&mut self, error: &ScriptError);

    /// Reads one line of input without its line terminator.
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String>;

    /// Runs a shell command and waits for it.
    ///
    /// # Returns
    /// The command's exit status, or `-1` if it was ended by a signal.
    ///
    /// # Errors
    /// Returns an error if the command could not be started.
    fn execute(&mut self, command: &str) -> io::Result<i32>;
}

/// A host bound to the process streams.
///
/// Output goes to stdout and is flushed after every write so that prompts
/// appear before a blocking read. Faults go to stderr. Commands run through
/// `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl Host for StdHost {
    fn write_output(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn report(&mut self, error: &ScriptError) {
        eprintln!("{error}");
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            },
        }
    }

    fn execute(&mut self, command: &str) -> io::Result<i32> {
        let status = Command::new("sh").arg("-c").arg(command).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// A host that keeps everything in memory.
///
/// Input lines are served from a queue; output, reported faults and shell
/// commands are recorded instead of being acted on. Recorded commands are not
/// run and report a zero exit status.
#[derive(Debug, Default, Clone)]
pub struct CapturedHost {
    /// Lines served to `input`, front first.
    pub input:    VecDeque<String>,
    /// Everything written by `print` and `println`.
    pub output:   String,
    /// Every non-fatal fault, in the order reported.
    pub errors:   Vec<ScriptError>,
    /// Every command passed to `exec`.
    pub commands: Vec<String>,
}

impl CapturedHost {
    /// Creates a host with no pending input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host that will answer `input` with `lines`, in order.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::engine::host::{CapturedHost, Host};
    ///
    /// let mut host = CapturedHost::with_input(["first", "second"]);
    /// assert_eq!(host.read_line().as_deref(), Some("first"));
    /// assert_eq!(host.read_line().as_deref(), Some("second"));
    /// assert_eq!(host.read_line(), None);
    /// ```
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { input: lines.into_iter().map(Into::into).collect(),
               ..Self::default() }
    }

    /// Returns the reported faults rendered as text.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl Host for CapturedHost {
    fn write_output(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn report(&mut self, error: &ScriptError) {
        self.errors.push(error.clone());
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn execute(&mut self, command: &str) -> io::Result<i32> {
        self.commands.push(command.to_string());
        Ok(0)
    }
}
