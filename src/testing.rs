// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes shared by the unit tests.

use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::{Address, BusError, Transport};
use crate::control::Indicator;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Probe(u8, u32),
    Write(u8, u8, Vec<u8>, u32),
    Read(u8, u8, usize, u32),
}

/// In-memory bus with a 256-byte memory device behind every responsive address.
pub struct FakeBus {
    pub responsive: Vec<u8>,
    pub memory: [u8; 256],
    pub write_error: Option<BusError>,
    pub read_error: Option<BusError>,
    /// XOR mask applied to the byte at this index on read-back.
    pub corrupt: Option<(usize, u8)>,
    pub calls: Vec<Call>,
}

impl FakeBus {
    pub fn new(responsive: &[u8]) -> Self {
        Self {
            responsive: responsive.to_vec(),
            memory: [0; 256],
            write_error: None,
            read_error: None,
            corrupt: None,
            calls: Vec::new(),
        }
    }

    /// Echo device at 0x50 only.
    pub fn echo() -> Self {
        Self::new(&[0x50])
    }

    pub fn probes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Probe(..)))
            .count()
    }

    pub fn reads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Read(..)))
            .count()
    }

    fn acks(&self, addr: Address) -> bool {
        self.responsive.contains(&addr.raw())
    }
}

impl Transport for FakeBus {
    fn probe(&mut self, addr: Address, timeout_ms: u32) -> Result<(), BusError> {
        self.calls.push(Call::Probe(addr.raw(), timeout_ms));
        if self.acks(addr) {
            Ok(())
        } else {
            Err(BusError::Timeout)
        }
    }

    fn write(
        &mut self,
        addr: Address,
        offset: u8,
        bytes: &[u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        self.calls
            .push(Call::Write(addr.raw(), offset, bytes.to_vec(), timeout_ms));
        if let Some(err) = self.write_error {
            return Err(err);
        }
        if !self.acks(addr) {
            return Err(BusError::Error);
        }
        let start = offset as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn read(
        &mut self,
        addr: Address,
        offset: u8,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<(), BusError> {
        self.calls
            .push(Call::Read(addr.raw(), offset, buf.len(), timeout_ms));
        if let Some(err) = self.read_error {
            return Err(err);
        }
        if !self.acks(addr) {
            return Err(BusError::Error);
        }
        let start = offset as usize;
        buf.copy_from_slice(&self.memory[start..start + buf.len()]);
        if let Some((idx, mask)) = self.corrupt {
            if let Some(b) = buf.get_mut(idx) {
                *b ^= mask;
            }
        }
        Ok(())
    }
}

/// Records every requested delay instead of sleeping.
#[derive(Default)]
pub struct FakeDelay {
    pub waits: Vec<u32>,
}

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
    }
}

/// Indicator that remembers every state it was driven to.
#[derive(Default)]
pub struct FakeIndicator {
    pub history: Vec<bool>,
}

impl FakeIndicator {
    pub fn current(&self) -> Option<bool> {
        self.history.last().copied()
    }
}

impl Indicator for FakeIndicator {
    fn set(&mut self, on: bool) {
        self.history.push(on);
    }
}
