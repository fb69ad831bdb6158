// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! Drivers sit above the raw `hw/` layer and below the test logic.
//!
//! ## Existing drivers
//!
//! - [`i2c_bus`] – memory-style I2C framing with per-transaction timeouts, implementing
//!   [`crate::bus::Transport`]

pub mod i2c_bus;

pub use i2c_bus::{classify_nb, Clock, I2cBus};
