// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Build-time configuration of the self-test.
//!
//! There is no runtime configuration surface. Everything the firmware needs to know about the
//! target device, the payload and bus timing lives here.

use crate::bus::Address;

// =============================================================================
// Target memory device
// =============================================================================

/// 7-bit address of the memory device exercised by the round trip.
pub const TARGET_ADDRESS: Address = match Address::new(0x50) {
    Some(addr) => addr,
    None => panic!("target address must be 7-bit"),
};

/// Addressable size of the target, in bytes (8-bit offsets).
pub const DEVICE_SIZE: usize = 256;

/// Offset the payload is written to and read back from.
pub const TEST_OFFSET: u8 = 0x00;

/// Fixed payload written every cycle.
pub const TEST_PAYLOAD: &[u8] = b"Hello STM32 I2C!";

// =============================================================================
// Buffer capacities
// =============================================================================

/// Maximum number of responsive addresses kept per scan.
pub const MAX_DEVICES: usize = 10;

/// Capacity of the write and read-back buffers.
pub const PAYLOAD_CAPACITY: usize = 50;

// =============================================================================
// Timing (milliseconds)
// =============================================================================

pub const PROBE_TIMEOUT_MS: u32 = 10;
pub const TRANSACTION_TIMEOUT_MS: u32 = 1000;

/// Time the target needs to commit a write before it answers again.
pub const SETTLE_DELAY_MS: u32 = 50;

/// Pause between two test cycles.
pub const CYCLE_DELAY_MS: u32 = 2000;

// =============================================================================
// Peripherals
// =============================================================================

/// I2C1 bus clock (standard mode).
pub const I2C_FREQ_KHZ: u32 = 100;

/// HAL-level stall timeout for a single I2C phase, in microseconds.
pub const I2C_DATA_TIMEOUT_US: u32 = 10_000;

/// Debug console baud rate (USART3, routed to the ST-LINK virtual COM port).
pub const CONSOLE_BAUD: u32 = 115_200;

/// Timing parameters of one test cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Timing {
    pub probe_timeout_ms: u32,
    pub transaction_timeout_ms: u32,
    pub settle_delay_ms: u32,
    pub cycle_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            probe_timeout_ms: PROBE_TIMEOUT_MS,
            transaction_timeout_ms: TRANSACTION_TIMEOUT_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            cycle_delay_ms: CYCLE_DELAY_MS,
        }
    }
}

// Compile-time sanity checks on the fixed configuration.
const _: () = assert!(TEST_PAYLOAD.len() <= PAYLOAD_CAPACITY);
const _: () = assert!(TEST_OFFSET as usize + TEST_PAYLOAD.len() <= DEVICE_SIZE);
