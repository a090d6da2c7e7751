//! Console and file logging for the CLI.
//!
//! Records go to stderr so that reports on stdout can be piped. The level
//! filter and the console gate are both reloadable, and a log file can be
//! attached after startup.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

const DEFAULT_FILTER: &str = "info";

/// Local wall-clock timestamps with milliseconds.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Log file that can be attached or closed at runtime. Writes are dropped
/// while no file is attached.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        // A poisoned lock still guards a usable handle.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

type Reload = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

/// Runtime controls for the installed subscriber.
pub struct LogControl {
    level: Reload,
    console: Reload,
    file: LogFile,
}

impl LogControl {
    /// Replaces the global filter. Accepts a bare level (`debug`) or any
    /// `EnvFilter` directive (`info,paint_core=trace`).
    pub fn set_level(
        &self,
        directive: &str,
    ) -> Result<()> {
        let filter = EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{directive}'"))?;
        (self.level)(filter).context("log filter reload failed")
    }

    /// Shows or hides console output. The file keeps receiving records.
    pub fn set_console_enabled(
        &self,
        enabled: bool,
    ) -> Result<()> {
        // The global filter still caps what "trace" lets through.
        let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
        (self.console)(gate).context("console gate reload failed")
    }

    /// Appends records to `path`, replacing any file already attached.
    /// The parent directory must exist.
    pub fn log_to_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file '{}'", path.display()))?;
        *self.file.lock() = Some(file);
        Ok(())
    }

    pub fn close_file(&self) {
        *self.file.lock() = None;
    }
}

/// Installs the global subscriber. The starting filter comes from
/// `RUST_LOG`, falling back to `info`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<LogControl> {
    let file = LogFile::default();

    let initial =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (level_filter, level_handle) = reload::Layer::new(initial);
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_gate);

    let to_file = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_writer(file.clone());

    tracing_subscriber::registry()
        .with(level_filter)
        .with(console)
        .with(to_file)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(LogControl {
        level: Box::new(move |filter: EnvFilter| level_handle.reload(filter)),
        console: Box::new(move |filter: EnvFilter| console_handle.reload(filter)),
        file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_log_file_discards_writes() {
        let file = LogFile::default();

        let mut writer = file.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    // The subscriber is process-global, so all runtime controls share one test.
    #[test]
    fn runtime_controls_after_init() {
        let control = init().unwrap();

        assert!(init().is_err());
        assert!(control.set_level("debug").is_ok());
        assert!(control.set_level("paint_core=verbose").is_err());
        assert!(control.set_console_enabled(false).is_ok());
        assert!(control.set_console_enabled(true).is_ok());

        let missing = Path::new("/definitely/not/a/dir/paint.log");
        assert!(control.log_to_file(missing).is_err());
        control.close_file();
    }
}
