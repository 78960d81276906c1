use crate::uart::Uart;
use core::fmt::Write as _;
use log::{Level, Metadata, Record};

struct UartLogger;

static LOGGER: UartLogger = UartLogger;

impl log::Log for UartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(Uart::new(), "[M4F] {}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Route `log` output to UART0.
pub fn init(level: Level) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}
