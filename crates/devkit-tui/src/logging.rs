use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: log::LevelFilter,
    pub file_path: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            level,
            file_path: None,
        }
    }

    pub fn with_file_output(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn is_file_output_enabled(&self) -> bool {
        self.file_path.is_some()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(log::LevelFilter::Warn)
    }
}

pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Warn)
}

pub trait LoggerInitializer {
    fn initialize(&self, config: &LogConfig) -> Result<()>;
}

/// Appends to the configured file; the terminal UI owns stdout and stderr.
pub struct FileLoggerInitializer;

impl LoggerInitializer for FileLoggerInitializer {
    fn initialize(&self, config: &LogConfig) -> Result<()> {
        let path = config
            .file_path
            .as_ref()
            .context("No log file path configured")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(config.level)
            .try_init()
            .context("Failed to initialize file logger")
    }
}

pub struct StderrLoggerInitializer;

impl LoggerInitializer for StderrLoggerInitializer {
    fn initialize(&self, config: &LogConfig) -> Result<()> {
        env_logger::Builder::new()
            .target(env_logger::Target::Stderr)
            .filter_level(config.level)
            .try_init()
            .context("Failed to initialize stderr logger")
    }
}

/// Without a log file the UI runs silent.
pub struct DisabledLoggerInitializer;

impl LoggerInitializer for DisabledLoggerInitializer {
    fn initialize(&self, _config: &LogConfig) -> Result<()> {
        log::set_max_level(log::LevelFilter::Off);
        Ok(())
    }
}

pub fn select_initializer(config: &LogConfig, interactive: bool) -> Box<dyn LoggerInitializer> {
    if config.is_file_output_enabled() {
        Box::new(FileLoggerInitializer)
    } else if interactive {
        Box::new(DisabledLoggerInitializer)
    } else {
        Box::new(StderrLoggerInitializer)
    }
}
