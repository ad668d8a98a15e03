//! Console Logger
//!
//! `log` backend for the front end. Every line is timestamped, kept in a
//! bounded in-memory ring (oldest dropped first) and written to the browser
//! console, or stderr when running natively.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept when no capacity is given
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

pub struct ConsoleLogger {
    app_name: String,
    level: LevelFilter,
    capacity: usize,
    ring: Mutex<VecDeque<String>>,
}

impl ConsoleLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            app_name: app_name.to_string(),
            level,
            capacity,
            ring: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// "[09:30:01.042] INFO  HospitalEMR emr_client::session: Signed out"
    pub fn format_line(&self, record: &Record) -> String {
        format!(
            "[{}] {:<5} {} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            self.app_name,
            record.target(),
            record.args()
        )
    }

    fn push(&self, line: String) {
        if let Ok(mut ring) = self.ring.lock() {
            while ring.len() >= self.capacity {
                ring.pop_front();
            }
            ring.push_back(line);
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.ring
            .lock()
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut ring) = self.ring.lock() {
            ring.clear();
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record);
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    init_logger_with_capacity(app_name, level, DEFAULT_CAPACITY)
}

pub fn init_logger_with_capacity(app_name: &str, level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(app_name, level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(logger.level);
    Ok(())
}

/// Recent lines from the installed logger, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::lines).unwrap_or_default()
}

pub fn info(message: &str) {
    log::info!("{}", message);
}

pub fn warn(message: &str) {
    log::warn!("{}", message);
}

pub fn error(message: &str) {
    log::error!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at<'a>(level: Level, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).target("emr_client::http").args(args).build()
    }

    #[test]
    fn test_ring_drops_oldest() {
        let logger = ConsoleLogger::new("HospitalEMR", LevelFilter::Debug, 3);
        for i in 0..5 {
            logger.log(&record_at(Level::Info, format_args!("line {}", i)));
        }
        let lines = logger.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("line 2"));
        assert!(lines[2].ends_with("line 4"));
    }

    #[test]
    fn test_level_filter() {
        let logger = ConsoleLogger::new("HospitalEMR", LevelFilter::Warn, 10);
        logger.log(&record_at(Level::Info, format_args!("quiet")));
        logger.log(&record_at(Level::Error, format_args!("loud")));
        let lines = logger.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR HospitalEMR emr_client::http: loud"));
    }

    #[test]
    fn test_zero_capacity_keeps_one_line() {
        let logger = ConsoleLogger::new("HospitalEMR", LevelFilter::Info, 0);
        logger.log(&record_at(Level::Info, format_args!("a")));
        logger.log(&record_at(Level::Info, format_args!("b")));
        assert_eq!(logger.lines().len(), 1);
        logger.clear();
        assert!(logger.lines().is_empty());
    }
}
