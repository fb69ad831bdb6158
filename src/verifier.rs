// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Write/read-back verification against the target memory device.
//!
//! Sequence: write the payload at `offset`, wait for the device to commit, read the same number
//! of bytes back into a cleared buffer, compare. A failed write does not skip the read, and the
//! comparison always runs on whatever the read buffer ends up holding.

use embedded_hal::blocking::delay::DelayMs;
use heapless::Vec;

use crate::bus::{Address, Status, Transport};
pub use crate::config::{DEVICE_SIZE, PAYLOAD_CAPACITY};

/// Bounded byte buffer used for the written and read-back data.
pub type Payload = Vec<u8, PAYLOAD_CAPACITY>;

/// Outcome of one round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct Verification {
    pub write: Status,
    pub read: Status,
    pub read_back: Payload,
    pub passed: bool,
}

/// Round-trip verifier with fixed timeouts and settling interval.
pub struct Verifier {
    write_timeout_ms: u32,
    read_timeout_ms: u32,
    settle_ms: u32,
}

impl Verifier {
    pub fn new(transaction_timeout_ms: u32, settle_ms: u32) -> Self {
        Self {
            write_timeout_ms: transaction_timeout_ms,
            read_timeout_ms: transaction_timeout_ms,
            settle_ms,
        }
    }

    /// Use a different timeout for the read-back than for the write.
    pub fn with_read_timeout(mut self, read_timeout_ms: u32) -> Self {
        self.read_timeout_ms = read_timeout_ms;
        self
    }

    /// Whether `len` bytes starting at `offset` fit inside the target device.
    #[inline]
    pub fn fits(offset: u8, len: usize) -> bool {
        offset as usize + len <= DEVICE_SIZE
    }

    /// Run one write → settle → read → compare round trip.
    pub fn verify<T, D>(
        &self,
        bus: &mut T,
        delay: &mut D,
        target: Address,
        offset: u8,
        payload: &Payload,
    ) -> Verification
    where
        T: Transport,
        D: DelayMs<u32>,
    {
        let mut read_back = Payload::new();

        if !Self::fits(offset, payload.len()) {
            log::warn!(
                "verify: {} bytes at offset {:#04x} overrun the {}-byte device",
                payload.len(),
                offset,
                DEVICE_SIZE
            );
            return Verification {
                write: Status::Error,
                read: Status::Error,
                read_back,
                passed: false,
            };
        }

        let write: Status = bus
            .write(target, offset, payload, self.write_timeout_ms)
            .into();
        if !write.is_ok() {
            log::warn!("verify: write to {} failed: {}", target, write);
        }

        delay.delay_ms(self.settle_ms);

        // Zero-filled so stale data from a previous cycle can never match.
        // Same capacity as `payload`.
        let resized = read_back.resize(payload.len(), 0);
        debug_assert!(resized.is_ok());
        let read: Status = bus
            .read(target, offset, &mut read_back, self.read_timeout_ms)
            .into();
        if !read.is_ok() {
            log::warn!("verify: read from {} failed: {}", target, read);
        }

        let passed = read_back.as_slice() == payload.as_slice();
        if !passed {
            log::debug!("verify: wrote {:02x?}", payload.as_slice());
            log::debug!("verify: read  {:02x?}", read_back.as_slice());
        }

        Verification {
            write,
            read,
            read_back,
            passed,
        }
    }
}
