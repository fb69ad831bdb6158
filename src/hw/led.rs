// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED used as the pass/fail indicator.

use embedded_hal::digital::v2::OutputPin;

use crate::control::Indicator;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED abstraction that remembers its active level and last known state.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    is_on: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(mut pin: PIN, active: ActiveLevel) -> Self {
        match active {
            ActiveLevel::High => pin.set_low().ok(),
            ActiveLevel::Low => pin.set_high().ok(),
        };
        Self {
            pin,
            active,
            is_on: false,
        }
    }

    pub fn active_high(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        let drive_high = (self.active == ActiveLevel::High) == on;
        if drive_high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.is_on = on;
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

impl<PIN: OutputPin> Indicator for Led<PIN> {
    #[inline]
    fn set(&mut self, on: bool) {
        Led::set(self, on);
    }
}
