//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start the rolling file logger once per process.
//! - Record panics as single-line `event=panic` entries.
//!
//! # Invariants
//! - Initialization never panics.
//! - A second call with the same settings is a no-op; different settings are rejected.
//! - Log lines carry ids and counts only, never credentials or free text.

use crate::config::LogSettings;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "crm";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogging {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging for `settings`.
///
/// Returns `Ok(false)` without touching the logger when `settings` has no
/// directory, `Ok(true)` once file logging is active.
///
/// # Errors
/// - Unsupported level, relative directory, or a directory that cannot be created.
/// - Logging already active with a different level or directory.
pub fn init_logging(settings: &LogSettings) -> Result<bool, String> {
    let Some(raw_dir) = settings.log_dir.as_deref() else {
        return Ok(false);
    };
    let level = parse_level(&settings.level)?;
    let log_dir = absolute_dir(raw_dir)?;

    let active = ACTIVE.get_or_try_init(|| start(level, &log_dir))?;
    if active.log_dir != log_dir {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            log_dir.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already runs at `{}`; refusing to switch to `{level}`",
            active.level
        ));
    }

    Ok(true)
}

/// Returns `(level, log_dir)` of the active file logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(level: &'static str, log_dir: &Path) -> Result<ActiveLogging, String> {
    let shown = log_dir.display();
    std::fs::create_dir_all(log_dir).map_err(|err| format!("cannot create `{shown}`: {err}"))?;

    let file = FileSpec::default()
        .directory(log_dir)
        .basename(LOG_BASENAME);
    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(file)
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();
    info!(
        "event=logging_start module=logging status=ok version={} level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );

    Ok(ActiveLogging {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

/// Maps a configured level onto one of [`LEVELS`]; `warning` is read as `warn`.
fn parse_level(raw: &str) -> Result<&'static str, String> {
    let wanted = raw.trim().to_ascii_lowercase();
    let wanted = match wanted.as_str() {
        "warning" => "warn",
        other => other,
    };
    LEVELS
        .into_iter()
        .find(|level| *level == wanted)
        .ok_or_else(|| format!("unsupported log level `{}`", raw.trim()))
}

fn absolute_dir(raw: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw.trim());
    if path.as_os_str().is_empty() {
        return Err("log directory is blank".to_string());
    }
    if !path.is_absolute() {
        let shown = path.display();
        return Err(format!("log directory `{shown}` is not absolute"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let at = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string payload");
        let message = single_line(message);
        error!("event=panic module=logging status=error at={at} message={message}");
        default_hook(info);
    }));
}

fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::{absolute_dir, init_logging, logging_status, parse_level, single_line};
    use crate::config::LogSettings;

    #[test]
    fn parse_level_accepts_known_values() {
        assert_eq!(parse_level("INFO"), Ok("info"));
        assert_eq!(parse_level(" warning "), Ok("warn"));
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn relative_and_blank_dirs_are_rejected() {
        let error = absolute_dir("logs/dev").unwrap_err();
        assert!(error.contains("not absolute"));
        assert!(absolute_dir("   ").is_err());
    }

    #[test]
    fn single_line_flattens_line_breaks() {
        assert_eq!(single_line("line1\nline2\rline3"), "line1 line2 line3");
    }

    #[test]
    fn missing_log_dir_leaves_logging_off() {
        let settings = LogSettings {
            level: "info".to_string(),
            log_dir: None,
        };
        assert_eq!(init_logging(&settings), Ok(false));
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            level: "info".to_string(),
            log_dir: Some(first.path().to_string_lossy().into_owned()),
        };

        assert_eq!(init_logging(&settings), Ok(true));
        assert_eq!(init_logging(&settings), Ok(true));

        let other_level = LogSettings {
            level: "debug".to_string(),
            ..settings.clone()
        };
        let error = init_logging(&other_level).unwrap_err();
        assert!(error.contains("refusing to switch"));

        let other_dir = LogSettings {
            log_dir: Some(second.path().to_string_lossy().into_owned()),
            ..settings
        };
        let error = init_logging(&other_dir).unwrap_err();
        assert!(error.contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(dir, first.path());
    }
}
