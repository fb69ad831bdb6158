// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Transaction timing from the DWT cycle counter.
//!
//! The firmware runs on the reset-default 16 MHz HSI, where the 32-bit counter wraps roughly every
//! 268 s. Even at the 216 MHz maximum it wraps every 19.8 s, far longer than any bus timeout.

use cortex_m::peripheral::{DCB, DWT};

use crate::drivers::i2c_bus::Clock;

pub struct DwtClock {
    ticks_per_ms: u32,
}

impl DwtClock {
    /// Enable the cycle counter. `sysclk_hz` must be the frozen core clock.
    pub fn new(mut dcb: DCB, mut dwt: DWT, sysclk_hz: u32) -> Self {
        dcb.enable_trace();
        dwt.enable_cycle_counter();
        Self {
            ticks_per_ms: sysclk_hz / 1_000,
        }
    }
}

impl Clock for DwtClock {
    #[inline]
    fn now_ticks(&self) -> u32 {
        DWT::cycle_count()
    }

    #[inline]
    fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }
}
