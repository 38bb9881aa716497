//! Logging setup for retrace with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or whatever `RETRACE_LOG`/`RUST_LOG` asks for).
//! Stdout logging is enabled when `RETRACE_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`RETRACE_LOG`** (highest priority) - retrace-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for retrace crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/retrace/logs/retrace-<pid>.log`
//! - macOS: `~/Library/Application Support/retrace/logs/retrace-12345.log`
//! - Linux: `~/.local/share/retrace/logs/retrace-12345.log`
//!
//! Override with `--log-file <path>` or `RETRACE_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CRATES: &[&str] = &["retrace", "retrace_bin", "retrace_log"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the priority described in the module docs:
/// `RETRACE_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let stdout_layer = stdout_enabled().then(|| fmt::layer().with_filter(create_filter()));

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Stdout-only (no file output). Will not crash if called multiple times or if
/// logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn stdout_enabled() -> bool {
    env::var("RETRACE_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions)
}

/// Split an optional override into `(dir, file name)`.
///
/// A path with an extension names the log file itself; anything else is
/// treated as the directory to put the default file name in.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("retrace-{}.log", std::process::id());

    let override_path =
        override_path.or_else(|| env::var_os("RETRACE_LOG_FILE").map(PathBuf::from));

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("retrace")
        .join("logs");

    (dir, filename)
}

/// File filter: uses the user-specified level if set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("RETRACE_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the [`EnvFilter`] for `RETRACE_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(retrace_log) = env::var("RETRACE_LOG") {
        return expand_retrace_log(&retrace_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(crate_directives("info"))
}

/// Expand `RETRACE_LOG` values into full tracing filter strings.
///
/// - `RETRACE_LOG=debug` becomes `warn,retrace=debug,retrace_bin=debug,...`
/// - `RETRACE_LOG=retrace::tracker=trace` is used as-is (advanced syntax)
fn expand_retrace_log(retrace_log: &str) -> EnvFilter {
    if retrace_log.contains('=') || retrace_log.contains(':') || retrace_log.contains(',') {
        return EnvFilter::new(retrace_log);
    }
    EnvFilter::new(crate_directives(retrace_log))
}

fn crate_directives(level: &str) -> String {
    let mut directives = String::from("warn");
    for name in CRATES {
        directives.push_str(&format!(",{name}={level}"));
    }
    directives
}
