// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Line oriented logger. Everything goes to stderr so that stdout only
/// carries report output.
pub struct Logger {
    label: &'static str,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            label: env!("CARGO_PKG_NAME"),
            level: Level::Info,
        }
    }

    /// Target shown for records at info level and above.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let filter = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    fn format(&self, record: &Record) -> String {
        let target = if record.level() >= Level::Debug {
            record.target()
        } else {
            self.label
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format(record);
            let stderr = std::io::stderr();
            let mut stderr = stderr.lock();
            let _ = writeln!(stderr, "{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Raise `level` by `steps`, saturating at trace.
pub fn raise(level: Level, steps: u64) -> Level {
    let mut filter = level.to_level_filter();
    for _ in 0..steps {
        filter = match filter {
            LevelFilter::Off => LevelFilter::Error,
            LevelFilter::Error => LevelFilter::Warn,
            LevelFilter::Warn => LevelFilter::Info,
            LevelFilter::Info => LevelFilter::Debug,
            LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
        };
    }
    filter.to_level().unwrap_or(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_saturates() {
        assert_eq!(raise(Level::Info, 0), Level::Info);
        assert_eq!(raise(Level::Info, 1), Level::Debug);
        assert_eq!(raise(Level::Warn, 5), Level::Trace);
    }

    #[test]
    fn filters_by_level() {
        let logger = Logger::new().level(Level::Warn);
        let info = Metadata::builder().level(Level::Info).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&info));
        assert!(logger.enabled(&error));
    }

    #[test]
    fn labels_non_debug_records() {
        let logger = Logger::new().label("bench_report");
        let line = logger.format(
            &Record::builder()
                .args(format_args!("hello"))
                .level(Level::Info)
                .target("bench_report::differ")
                .build(),
        );
        assert!(line.ends_with("INFO  [bench_report] hello"));
    }
}
