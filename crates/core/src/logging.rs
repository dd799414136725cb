use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory holding the rolling log files, `~/.memberscope/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memberscope")
        .join("logs")
}

/// Daily log file `<component>.<date>` under `dir`, creating `dir` if needed.
fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .build(dir)
}

/// Installs the global subscriber. Stdout and stderr belong to the session,
/// so events only reach stderr when `to_stderr` is set.
///
/// A log directory that cannot be created costs the file output and nothing
/// else. When file logging is on, the returned guard must be held until exit
/// or buffered events are lost.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let log_dir = log_dir();
    let (file_writer, guard, file_error) = match file_appender(&log_dir, component) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
    });
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled, {}: {}", log_dir.display(), e);
    }
    if !installed {
        return None;
    }
    guard
}
