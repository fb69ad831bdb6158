// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! [`Transport`] over a blocking `embedded-hal` I2C peripheral.
//!
//! Memory-style framing for devices with 8-bit offsets:
//!
//! - probe: `START - ADDR(R) - DATA - STOP` (one-byte read, discarded)
//! - write: `START - ADDR(W) - OFFSET - DATA.. - STOP`
//! - read:  `START - ADDR(W) - OFFSET - RESTART - ADDR(R) - DATA.. - STOP`
//!
//! The HAL only knows a fixed stall timeout per transfer phase. The per-call budget is enforced by
//! timing each transaction with a [`Clock`]: anything that returns later than its budget is
//! reported as [`BusError::Timeout`], whatever the peripheral said.
//!
//! Blocking HAL drivers reject empty transfers and transfers of 256 bytes or more. Every frame
//! written from here carries between 1 and [`MAX_FRAME`] bytes and every read at most
//! [`MAX_TRANSFER`]; an empty read is answered without touching the bus.

use embedded_hal::blocking::i2c::{Read, Write, WriteRead};
use heapless::Vec;

use crate::bus::{Address, BusError, Transport};
use crate::config::PAYLOAD_CAPACITY;

/// Largest write frame: offset byte plus a full payload.
pub const MAX_FRAME: usize = PAYLOAD_CAPACITY + 1;

/// Longest single transfer the blocking HAL accepts.
pub const MAX_TRANSFER: usize = 255;

/// Free-running tick source used to time transactions.
pub trait Clock {
    fn now_ticks(&self) -> u32;
    fn ticks_per_ms(&self) -> u32;

    /// Milliseconds since `start`, tolerant of one counter wrap.
    fn elapsed_ms(&self, start: u32) -> u32 {
        self.now_ticks().wrapping_sub(start) / self.ticks_per_ms().max(1)
    }
}

fn any_fault<E>(_: &E) -> BusError {
    BusError::Error
}

/// Classify an `nb`-wrapped HAL error.
///
/// A stall the HAL gave up on comes back as `WouldBlock` and maps to [`BusError::Timeout`].
/// `is_busy` picks out the peripheral's bus-busy error. Everything else is [`BusError::Error`].
pub fn classify_nb<E>(err: &nb::Error<E>, is_busy: impl Fn(&E) -> bool) -> BusError {
    match err {
        nb::Error::WouldBlock => BusError::Timeout,
        nb::Error::Other(e) if is_busy(e) => BusError::Busy,
        nb::Error::Other(_) => BusError::Error,
    }
}

pub struct I2cBus<I, C, E> {
    i2c: I,
    clock: C,
    classify: fn(&E) -> BusError,
}

impl<I, C, E> I2cBus<I, C, E>
where
    I: Read<Error = E> + Write<Error = E> + WriteRead<Error = E>,
    C: Clock,
{
    /// Wrap a blocking I2C peripheral. Every HAL error is reported as [`BusError::Error`].
    pub fn new(i2c: I, clock: C) -> Self {
        Self {
            i2c,
            clock,
            classify: any_fault::<E>,
        }
    }

    /// Map HAL errors with `classify` instead, e.g. to surface bus-busy conditions.
    pub fn with_classifier(mut self, classify: fn(&E) -> BusError) -> Self {
        self.classify = classify;
        self
    }

    pub fn free(self) -> (I, C) {
        (self.i2c, self.clock)
    }

    fn finish(&self, start: u32, timeout_ms: u32, res: Result<(), E>) -> Result<(), BusError> {
        if self.clock.elapsed_ms(start) > timeout_ms {
            return Err(BusError::Timeout);
        }
        res.map_err(|e| (self.classify)(&e))
    }
}

impl<I, C, E> Transport for I2cBus<I, C, E>
where
    I: Read<Error = E> + Write<Error = E> + WriteRead<Error = E>,
    C: Clock,
{
    fn probe(&mut self, addr: Address, timeout_ms: u32) -> Result<(), BusError> {
        let mut scratch = [0u8; 1];
        let start = self.clock.now_ticks();
        let res = self.i2c.read(addr.raw(), &mut scratch);
        self.finish(start, timeout_ms, res)
    }

    fn write(
        &mut self,
        addr: Address,
        offset: u8,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        let mut frame: Vec<u8, MAX_FRAME> = Vec::new();
        frame.push(offset).map_err(|_| BusError::Error)?;
        frame
            .extend_from_slice(bytes)
            .map_err(|_| BusError::Error)?;

        let start = self.clock.now_ticks();
        let res = self.i2c.write(addr.raw(), &frame);
        self.finish(start, timeout_ms, res)
    }

    fn read(
        &mut self,
        addr: Address,
        offset: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        if buf.is_empty() {
            return Ok(());
        }
        if buf.len() > MAX_TRANSFER {
            return Err(BusError::Error);
        }
        let start = self.clock.now_ticks();
        let res = self.i2c.write_read(addr.raw(), &[offset], buf);
        self.finish(start, timeout_ms, res)
    }
}
