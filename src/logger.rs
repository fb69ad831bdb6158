// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `log` sink that prints records on the USART debug console.
//!
//! The console is parked in a critical-section mutex so records can be emitted from anywhere,
//! including interrupt handlers. Output format: `[LEVEL] target: message`.

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use stm32f7xx_hal::pac::USART3;

use crate::hw::Usart;

pub type Console = Usart<USART3>;

pub struct UsartLogger {
    console: Mutex<RefCell<Option<Console>>>,
}

static LOGGER: UsartLogger = UsartLogger {
    console: Mutex::new(RefCell::new(None)),
};

/// Install the console as the global logger. Can only succeed once.
pub fn init(console: Console, level: LevelFilter) -> Result<(), SetLoggerError> {
    interrupt::free(|cs| {
        LOGGER.console.borrow(cs).replace(Some(console));
    });
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        interrupt::free(|cs| {
            if let Some(console) = self.console.borrow(cs).borrow_mut().as_mut() {
                let _ = writeln!(
                    console,
                    "[{:<5}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        });
    }

    fn flush(&self) {
        interrupt::free(|cs| {
            if let Some(console) = self.console.borrow(cs).borrow_mut().as_mut() {
                console.flush();
            }
        });
    }
}
