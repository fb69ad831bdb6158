// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Diagnostic record.
//!
//! Snapshot of the latest scan, the latest round trip and the running counters. Nothing in the
//! firmware reads it back; it exists to be watched from a debug probe (`print controller.record`)
//! and is dumped to the console log after every cycle. A probe sampling memory mid-cycle may see
//! fields from two different cycles.

use crate::bus::{Address, Status};
use crate::scanner::{AddressList, ScanReport};
use crate::verifier::{Payload, Verification};

#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticRecord {
    pub scan_result: Status,
    pub discovered_addresses: AddressList,
    /// Whether the round-trip target answered in the latest scan.
    pub target_seen: bool,

    pub write_result: Status,
    pub read_result: Status,

    pub write_payload: Payload,
    pub read_payload: Payload,

    pub verification_passed: bool,

    cycle_count: u32,
    success_count: u32,
    failure_count: u32,
}

impl DiagnosticRecord {
    /// Fresh record for a run that writes `payload` every cycle.
    pub fn new(payload: Payload) -> Self {
        Self {
            scan_result: Status::Ok,
            discovered_addresses: AddressList::new(),
            target_seen: false,
            write_result: Status::Ok,
            read_result: Status::Ok,
            write_payload: payload,
            read_payload: Payload::new(),
            verification_passed: false,
            cycle_count: 0,
            success_count: 0,
            failure_count: 0,
        }
    }

    /// Number of meaningful bytes in the payload buffers.
    #[inline]
    pub fn payload_length(&self) -> usize {
        self.write_payload.len()
    }

    #[inline]
    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    #[inline]
    pub fn success_count(&self) -> u32 {
        self.success_count
    }

    #[inline]
    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Mark the start of a new cycle.
    pub(crate) fn begin_cycle(&mut self) {
        self.cycle_count = self.cycle_count.wrapping_add(1);
    }

    pub(crate) fn record_scan(&mut self, scan: ScanReport, target: Address) {
        self.scan_result = scan.status;
        self.target_seen = scan.contains(target);
        self.discovered_addresses = scan.found;
    }

    pub(crate) fn record_verification(&mut self, v: Verification) {
        self.write_result = v.write;
        self.read_result = v.read;
        self.read_payload = v.read_back;
        self.verification_passed = v.passed;
    }

    /// Close the current cycle, counting it as a success or a failure.
    pub(crate) fn end_cycle(&mut self) {
        if self.verification_passed {
            self.success_count = self.success_count.wrapping_add(1);
        } else {
            self.failure_count = self.failure_count.wrapping_add(1);
        }
    }
}
