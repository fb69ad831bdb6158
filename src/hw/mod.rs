// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board-Level Wrappers
//!
//! - [`led`] - Pass/fail LED, portable over any `embedded-hal` output pin.
//! - `usart`, `clock`, `pins` - STM32F7 console, DWT timing and NUCLEO-F767ZI pin map. Only built
//!   for the bare-metal target.

pub mod led;

#[cfg(target_os = "none")]
pub mod clock;
#[cfg(target_os = "none")]
pub mod pins;
#[cfg(target_os = "none")]
pub mod usart;

pub use led::{ActiveLevel, Led};

#[cfg(target_os = "none")]
pub use clock::DwtClock;
#[cfg(target_os = "none")]
pub use pins::BoardPins;
#[cfg(target_os = "none")]
pub use usart::Usart;
