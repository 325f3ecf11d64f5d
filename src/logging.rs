//! Logging configuration using tracing with a file or stderr appender.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILE: &str = "paramedit.log";

/// `--log-file` value that selects stderr.
pub const STDERR_TARGET: &str = "-";

/// Destination for log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// Pick the destination from `--log-file`.
    ///
    /// `-` means stderr, except in interactive mode where the TUI owns the
    /// terminal and logs fall back to the default file.
    pub fn resolve(log_file: Option<&Path>, interactive: bool) -> Self {
        match log_file {
            Some(path) if path == Path::new(STDERR_TARGET) => {
                if interactive {
                    Self::File(PathBuf::from(DEFAULT_LOG_FILE))
                } else {
                    Self::Stderr
                }
            }
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::File(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// Initialize tracing for the given target.
///
/// Returns a guard that must be held for the duration of the program to ensure
/// logs are flushed. Dropping the guard flushes remaining logs.
///
/// Snapshots own stdout, so logs never go there.
pub fn init_logging(target: &LogTarget, level: &str) -> WorkerGuard {
    let (writer, guard) = match target {
        LogTarget::File(path) => {
            let parent = path.parent().unwrap_or(Path::new("."));
            let filename = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));
            tracing_appender::non_blocking(tracing_appender::rolling::never(parent, filename))
        }
        LogTarget::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter =
        EnvFilter::try_new(format!("paramedit={level}")).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    #[cfg(debug_assertions)]
    let layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry().with(filter).with(layer).init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_log_file() {
        assert_eq!(
            LogTarget::resolve(None, false),
            LogTarget::File(PathBuf::from("paramedit.log"))
        );
    }

    #[test]
    fn dash_selects_stderr_in_headless_mode() {
        assert_eq!(
            LogTarget::resolve(Some(Path::new("-")), false),
            LogTarget::Stderr
        );
    }

    #[test]
    fn dash_falls_back_to_file_in_tui() {
        assert_eq!(
            LogTarget::resolve(Some(Path::new("-")), true),
            LogTarget::File(PathBuf::from("paramedit.log"))
        );
    }

    #[test]
    fn explicit_path_is_kept() {
        assert_eq!(
            LogTarget::resolve(Some(Path::new("/tmp/x.log")), true),
            LogTarget::File(PathBuf::from("/tmp/x.log"))
        );
    }
}
