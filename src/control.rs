// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Test cycle controller.
//!
//! Owns the bus, the delay source, the pass/fail indicator and the [`DiagnosticRecord`]. One call
//! to [`CycleController::run_cycle`] performs scan → round trip → report → inter-cycle sleep.
//! Scanner and verifier hand back plain values; only the controller mutates the record.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::{Address, Transport};
use crate::config::Timing;
use crate::diag::DiagnosticRecord;
use crate::scanner::Scanner;
use crate::verifier::{Payload, Verifier};

/// Binary pass/fail output (typically an LED).
pub trait Indicator {
    fn set(&mut self, on: bool);
}

impl<I: Indicator + ?Sized> Indicator for &mut I {
    fn set(&mut self, on: bool) {
        (**self).set(on);
    }
}

/// Stop condition polled by [`CycleController::run`] before each cycle.
pub trait CancelToken {
    fn is_cancelled(&self) -> bool;
}

/// Token that never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct Forever;

impl CancelToken for Forever {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelToken for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: CancelToken + ?Sized> CancelToken for &C {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// What the round trip targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Target {
    pub address: Address,
    pub offset: u8,
}

pub struct CycleController<T, D, L> {
    bus: T,
    delay: D,
    indicator: L,
    scanner: Scanner,
    verifier: Verifier,
    target: Target,
    cycle_delay_ms: u32,
    record: DiagnosticRecord,
}

impl<T, D, L> CycleController<T, D, L>
where
    T: Transport,
    D: DelayMs<u32>,
    L: Indicator,
{
    pub fn new(
        bus: T,
        delay: D,
        mut indicator: L,
        target: Target,
        payload: Payload,
        timing: Timing,
    ) -> Self {
        indicator.set(false);
        Self {
            bus,
            delay,
            indicator,
            scanner: Scanner::new(timing.probe_timeout_ms),
            verifier: Verifier::new(timing.transaction_timeout_ms, timing.settle_delay_ms),
            target,
            cycle_delay_ms: timing.cycle_delay_ms,
            record: DiagnosticRecord::new(payload),
        }
    }

    /// Run one full cycle and return whether the round trip verified.
    pub fn run_cycle(&mut self) -> bool {
        self.record.begin_cycle();

        let scan = self.scanner.scan(&mut self.bus);
        log::info!(
            "cycle {}: scan {} ({} probed) found {}",
            self.record.cycle_count(),
            scan.status,
            scan.probed,
            scan.found.len()
        );
        for addr in scan.found.iter() {
            log::info!("  device at {}", addr);
        }
        if !scan.contains(self.target.address) {
            log::warn!("target {} did not answer the scan", self.target.address);
        }
        self.record.record_scan(scan, self.target.address);

        let verification = self.verifier.verify(
            &mut self.bus,
            &mut self.delay,
            self.target.address,
            self.target.offset,
            &self.record.write_payload,
        );
        self.record.record_verification(verification);
        self.record.end_cycle();

        let passed = self.record.verification_passed;
        self.indicator.set(passed);

        log::info!(
            "cycle {}: write={} read={} {} (ok={} fail={})",
            self.record.cycle_count(),
            self.record.write_result,
            self.record.read_result,
            if passed { "PASS" } else { "FAIL" },
            self.record.success_count(),
            self.record.failure_count()
        );

        self.delay.delay_ms(self.cycle_delay_ms);
        passed
    }

    /// Run cycles until `cancel` reports cancelled. The token is checked before every cycle.
    pub fn run<C: CancelToken + ?Sized>(&mut self, cancel: &C) {
        while !cancel.is_cancelled() {
            self.run_cycle();
        }
        log::info!("test loop stopped after {} cycles", self.record.cycle_count());
    }

    /// Run forever.
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    /// Latest results, as also shown by the debugger.
    #[inline]
    pub fn record(&self) -> &DiagnosticRecord {
        &self.record
    }

    /// Tear down and hand back the owned peripherals.
    pub fn free(self) -> (T, D, L) {
        (self.bus, self.delay, self.indicator)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::bus::{BusError, Status};
    use crate::config::{TARGET_ADDRESS, TEST_OFFSET, TEST_PAYLOAD};
    use crate::testing::{FakeBus, FakeDelay, FakeIndicator};

    type Controller = CycleController<FakeBus, FakeDelay, FakeIndicator>;

    fn controller(bus: FakeBus) -> Controller {
        CycleController::new(
            bus,
            FakeDelay::default(),
            FakeIndicator::default(),
            Target {
                address: TARGET_ADDRESS,
                offset: TEST_OFFSET,
            },
            Payload::from_slice(TEST_PAYLOAD).unwrap(),
            Timing::default(),
        )
    }

    /// Cancels after `remaining` polls.
    struct AfterPolls {
        remaining: Cell<u32>,
    }

    impl CancelToken for AfterPolls {
        fn is_cancelled(&self) -> bool {
            let left = self.remaining.get();
            if left == 0 {
                return true;
            }
            self.remaining.set(left - 1);
            false
        }
    }

    #[test]
    fn indicator_starts_off() {
        let ctl = controller(FakeBus::echo());
        let (_, _, led) = ctl.free();
        assert_eq!(led.history, [false]);
    }

    #[test]
    fn passing_cycle_is_repeatable() {
        let mut ctl = controller(FakeBus::echo());

        assert!(ctl.run_cycle());
        assert_eq!(ctl.record().success_count(), 1);
        assert!(ctl.run_cycle());
        assert_eq!(ctl.record().success_count(), 2);

        let rec = ctl.record();
        assert_eq!(rec.cycle_count(), 2);
        assert_eq!(rec.failure_count(), 0);
        assert!(rec.verification_passed);
        assert_eq!(rec.read_payload.as_slice(), TEST_PAYLOAD);
        assert_eq!(rec.payload_length(), 16);

        let (_, _, led) = ctl.free();
        assert_eq!(led.current(), Some(true));
    }

    #[test]
    fn scan_results_land_in_record() {
        let mut ctl = controller(FakeBus::new(&[0x3C, 0x50]));
        ctl.run_cycle();

        let found: std::vec::Vec<u8> = ctl
            .record()
            .discovered_addresses
            .iter()
            .map(|a| a.raw())
            .collect();
        assert_eq!(found, [0x3C, 0x50]);
        assert_eq!(ctl.record().scan_result, Status::Ok);
        assert!(ctl.record().target_seen);
    }

    #[test]
    fn corrupted_read_fails_and_clears_indicator() {
        let mut bus = FakeBus::echo();
        bus.corrupt = Some((0, 0x20));
        let mut ctl = controller(bus);

        assert!(!ctl.run_cycle());
        assert_eq!(ctl.record().failure_count(), 1);
        assert_eq!(ctl.record().success_count(), 0);
        assert!(!ctl.record().verification_passed);

        let (_, _, led) = ctl.free();
        assert_eq!(led.current(), Some(false));
    }

    #[test]
    fn indicator_follows_each_cycle() {
        let mut ctl = controller(FakeBus::echo());
        ctl.run_cycle();
        ctl.bus.read_error = Some(BusError::Timeout);
        ctl.run_cycle();
        ctl.bus.read_error = None;
        ctl.run_cycle();

        let (_, _, led) = ctl.free();
        assert_eq!(led.history, [false, true, false, true]);
    }

    #[test]
    fn missing_target_counts_as_failure() {
        let mut ctl = controller(FakeBus::new(&[]));
        assert!(!ctl.run_cycle());

        let rec = ctl.record();
        assert!(rec.discovered_addresses.is_empty());
        assert!(!rec.target_seen);
        assert_eq!(rec.write_result, Status::Error);
        assert_eq!(rec.read_result, Status::Error);
        assert_eq!(rec.failure_count(), 1);
    }

    #[test]
    fn each_cycle_settles_then_sleeps() {
        let mut ctl = controller(FakeBus::echo());
        ctl.run_cycle();
        ctl.run_cycle();

        let (_, delay, _) = ctl.free();
        assert_eq!(delay.waits, [50, 2000, 50, 2000]);
    }

    #[test]
    fn counters_add_up_over_mixed_cycles() {
        let mut ctl = controller(FakeBus::echo());

        for i in 0..10u32 {
            ctl.bus.write_error = if i % 3 == 0 {
                Some(BusError::Busy)
            } else {
                None
            };
            // Clear memory so a failed write cannot be masked by the previous cycle's data.
            ctl.bus.memory = [0; 256];
            ctl.run_cycle();

            let rec = ctl.record();
            assert_eq!(rec.success_count() + rec.failure_count(), rec.cycle_count());
            assert_eq!(rec.cycle_count(), i + 1);
        }

        assert_eq!(ctl.record().failure_count(), 4);
        assert_eq!(ctl.record().success_count(), 6);
    }

    #[test]
    fn run_stops_on_cancel() {
        let mut ctl = controller(FakeBus::echo());
        ctl.run(&AfterPolls {
            remaining: Cell::new(3),
        });

        assert_eq!(ctl.record().cycle_count(), 3);
        assert_eq!(ctl.record().success_count(), 3);
    }

    #[test]
    fn run_with_cancelled_flag_does_nothing() {
        let mut ctl = controller(FakeBus::echo());
        let stop = AtomicBool::new(true);
        ctl.run(&stop);

        assert_eq!(ctl.record().cycle_count(), 0);
    }

    #[test]
    fn forever_never_cancels() {
        assert!(!Forever.is_cancelled());
    }
}
