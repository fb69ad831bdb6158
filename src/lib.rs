// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # I2C Self-Test Firmware
//!
//! Periodically scans an I2C bus, writes a fixed payload to a memory device, reads it back and
//! compares. The result drives a status LED, and the full history is kept in a
//! [`DiagnosticRecord`] meant to be watched from a debug probe. Targets an STM32F767 MCU
//! (NUCLEO-F767ZI).
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`bus`] | Transport contract, addresses and outcome codes |
//! | [`scanner`] | Bus scan over the 7-bit address space |
//! | [`verifier`] | Write → settle → read → compare round trip |
//! | [`control`] | Test cycle controller and run loop |
//! | [`diag`] | Diagnostic record |
//! | [`config`] | Build-time constants |
//! | [`drivers`] | Memory-style I2C transport on top of `embedded-hal` |
//! | [`hw`] | MCU-level wrappers (LED, USART, cycle counter, pins) |
//!
//! Everything except `hw::{usart, clock, pins}` and [`logger`] is hardware-independent and is unit
//! tested on the host:
//!
//! ```bash
//! cargo test --lib
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod config;
pub mod control;
pub mod diag;
pub mod drivers;
pub mod hw;
pub mod scanner;
pub mod verifier;

#[cfg(target_os = "none")]
pub mod logger;

#[cfg(test)]
mod testing;

pub use bus::{Address, BusError, Status, Transport};
pub use control::{CancelToken, CycleController, Forever, Indicator, Target};
pub use diag::DiagnosticRecord;
pub use scanner::{ScanReport, Scanner};
pub use verifier::{Payload, Verification, Verifier};
