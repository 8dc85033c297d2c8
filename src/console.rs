//! Console output sink for human-readable status messages.
//!
//! Status lines (banners, step markers, `[OK]`/`[WARN]` notes, error lines
//! and the final summary) go through a [`Console`] instead of printing to
//! stdout directly. The binary hands it stdout; tests hand it a buffer.
//! These messages are informational only and not meant to be parsed.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use yansi::{Color, Paint};

/// Width of the banner rules.
const BANNER_WIDTH: usize = 80;

/// Destination for status messages.
pub struct Console {
    out: Box<dyn Write + Send>,
    quiet: bool,
    color: bool,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("quiet", &self.quiet)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Create a console writing to `out`.
    ///
    /// When `quiet` is set only errors are written.
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>, quiet: bool, color: bool) -> Self {
        Self { out, quiet, color }
    }

    /// Console writing to standard output.
    #[must_use]
    pub fn stdout(quiet: bool, color: bool) -> Self {
        Self::new(Box::new(io::stdout()), quiet, color)
    }

    /// Console writing to standard error, used for fatal errors.
    #[must_use]
    pub fn stderr(color: bool) -> Self {
        Self::new(Box::new(io::stderr()), false, color)
    }

    /// Console writing into a shared in-memory buffer, without colors.
    #[must_use]
    pub fn buffered(buffer: SharedBuffer) -> Self {
        Self::new(Box::new(buffer), false, false)
    }

    fn emit(&mut self, line: &str) {
        // Status output is best-effort; a closed stdout must not abort a run.
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color {
            text.fg(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Plain line.
    pub fn line(&mut self, message: impl AsRef<str>) {
        if !self.quiet {
            self.emit(message.as_ref());
        }
    }

    /// Boxed title between two rules.
    pub fn banner(&mut self, title: &str) {
        if self.quiet {
            return;
        }
        let rule = "=".repeat(BANNER_WIDTH);
        self.emit(&rule);
        let title = if self.color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        self.emit(&title);
        self.emit(&rule);
    }

    /// Numbered pipeline step, e.g. `[1/4] Scanning files...`.
    pub fn step(&mut self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }
        let tag = self.colorize(&format!("[{current}/{total}]"), Color::Cyan);
        self.emit("");
        self.emit(&format!("{tag} {message}"));
    }

    /// Success note.
    pub fn ok(&mut self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let tag = self.colorize("[OK]", Color::Green);
        self.emit(&format!("  {tag} {}", message.as_ref()));
    }

    /// Warning note.
    pub fn warn(&mut self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let tag = self.colorize("[WARN]", Color::Yellow);
        self.emit(&format!("  {tag} {}", message.as_ref()));
    }

    /// Error line, painted red. Shown even in quiet mode.
    pub fn error(&mut self, message: impl AsRef<str>) {
        let line = self.colorize(message.as_ref(), Color::Red);
        self.emit(&line);
    }
}

/// Cloneable in-memory writer, for capturing console output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .0
            .lock()
            .map_err(|_| io::Error::other("console buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
