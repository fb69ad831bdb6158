// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bus scanner.
//!
//! Probes every non-reserved 7-bit address in ascending order and keeps the ones that
//! acknowledge, up to [`MAX_DEVICES`]. Probe failures are not errors here; a silent address is
//! simply left out.

use heapless::Vec;

use crate::bus::{Address, BusError, Status, Transport, ADDRESS_MAX};
pub use crate::config::MAX_DEVICES;

/// Responsive addresses of one scan, ascending, at most [`MAX_DEVICES`].
pub type AddressList = Vec<Address, MAX_DEVICES>;

/// Result of one full scan.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanReport {
    /// `Ok` if at least one device answered, otherwise the outcome of the last probe.
    pub status: Status,
    pub found: AddressList,
    /// Number of addresses actually probed. Less than 127 when the list filled up early.
    pub probed: u8,
}

impl ScanReport {
    #[inline]
    pub fn contains(&self, addr: Address) -> bool {
        self.found.contains(&addr)
    }
}

pub struct Scanner {
    probe_timeout_ms: u32,
}

impl Scanner {
    pub fn new(probe_timeout_ms: u32) -> Self {
        Self { probe_timeout_ms }
    }

    /// Probe addresses `0x01..=0x7F` and collect the responsive ones.
    pub fn scan<T: Transport>(&self, bus: &mut T) -> ScanReport {
        let mut found = AddressList::new();
        let mut last: Result<(), BusError> = Err(BusError::Error);
        let mut probed = 0u8;

        for raw in 1..=ADDRESS_MAX {
            let Some(addr) = Address::new(raw) else {
                break;
            };

            last = bus.probe(addr, self.probe_timeout_ms);
            probed += 1;

            if last.is_ok() {
                log::debug!("scan: device at {}", addr);
                // Capacity is checked below.
                let pushed = found.push(addr);
                debug_assert!(pushed.is_ok());
            }

            if found.is_full() {
                break;
            }
        }

        let status = if found.is_empty() {
            Status::from(last)
        } else {
            Status::Ok
        };

        ScanReport {
            status,
            found,
            probed,
        }
    }
}
