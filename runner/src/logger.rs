use std::env;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Environment variable selecting the log level
pub const LOG_ENV: &str = "SCHED_LOG";

/// Prints every record to stderr as `[LEVEL] message`
struct SimLogger;

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimLogger = SimLogger;

fn level_from_env() -> LevelFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the logger, with the level taken from `SCHED_LOG`
/// (error, warn, info, debug or trace; info when unset)
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level_from_env()))
}
