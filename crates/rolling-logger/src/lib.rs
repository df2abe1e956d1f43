//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to a size-capped set of
//! log files and, for warnings and errors, to stderr. Records emitted through
//! the `log` facade are bridged into the same pipeline.

mod writer;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

pub use writer::RollingFileWriter;

/// Bytes written to the current file before it is rotated
const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Rotated files kept alongside the current one
const DEFAULT_MAX_BACKUPS: usize = 3;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub level: log::LevelFilter,
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl LoggerConfig {
    pub fn new(log_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            app_name: app_name.to_string(),
            level: log::LevelFilter::Info,
            max_bytes: DEFAULT_MAX_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn to_tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Initialize with default rotation settings
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_with_config(LoggerConfig::new(log_dir.as_ref(), app_name))
}

/// Initialize the global subscriber. Can only succeed once per process.
pub fn init_with_config(config: LoggerConfig) -> Result<(), LoggerError> {
    if LOG_FILE.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingFileWriter::new(
        &config.log_dir,
        &config.app_name,
        config.max_bytes,
        config.max_backups,
    )?;
    let path = writer.current_path();

    let level = to_tracing_level(config.level);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_writer(Mutex::new(writer))
        .with_filter(level);
    // The terminal only sees problems
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_writer(std::io::stderr)
        .with_filter(level.min(LevelFilter::WARN));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let _ = LOG_FILE.set(path);
    Ok(())
}

/// Path of the file currently being written, once initialized
pub fn log_file() -> Option<&'static Path> {
    LOG_FILE.get().map(|p| p.as_path())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    if LOG_FILE.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    if LOG_FILE.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::error!("{}", msg);
    Ok(())
}
