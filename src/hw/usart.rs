// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART debug console.
//!
//! Transmit-only wrapper used as the sink for the `log` records (see [`crate::logger`]). Lines are
//! terminated with CRLF so they render correctly in a serial terminal.
//!
//! To access the terminal on the host machine, connect the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    /// Take the transmit half of a configured serial port. The receive half is dropped.
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    /// Write `s`, expanding bare `\n` into `\r\n`.
    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            if b == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
