//! `log` backend that writes to the browser console.
//!
//! The core crate logs through the `log` facade; this forwards each record
//! to the matching `console` method so probes show up in devtools.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Console sink for `log` records.
pub struct ConsoleLogger {
    level: LevelFilter,
}

static LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Debug);

impl ConsoleLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
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
        let line = format_record(record);
        write_console(record.level(), &line);
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once.
pub fn install() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.level);
    }
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
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

// Imported JS functions panic off wasm32, so native test runs drop records
#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, _line: &str) {}
