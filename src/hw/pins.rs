// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI board.
//!
//! The memory device hangs off I2C1 on the Arduino header (D15/D14) with external pull-ups.

use stm32f7xx_hal::{
    gpio::{gpiob, gpiod, Alternate, OpenDrain, Output, PushPull},
    pac,
    prelude::*,
};

pub struct BoardPins {
    pub leds: Leds,
    pub usart3: Usart3Pins,
    pub i2c1: I2c1Pins,
}

pub struct Leds {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1, pass/fail
}

/// ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>, // D15
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>, // D14
}

impl BoardPins {
    pub fn new(gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            leds: Leds {
                green: gpiob.pb0.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },
        }
    }
}
