#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
mod firmware {
    use cortex_m::delay::Delay;
    use cortex_m_rt::entry;
    use panic_halt as _;

    use hal::{
        i2c::{self, BlockingI2c, Mode},
        pac,
        prelude::*,
        serial::{Config, Serial},
    };
    use stm32f7xx_hal as hal;

    use i2c_selftest::{
        config::{self, Timing},
        drivers::{classify_nb, I2cBus},
        hw::{BoardPins, DwtClock, Led, Usart},
        logger, BusError, CycleController, Payload, Target,
    };

    #[entry]
    fn main() -> ! {
        // Peripherals
        let Some(dp) = pac::Peripherals::take() else {
            fatal()
        };
        let Some(cp) = cortex_m::Peripherals::take() else {
            fatal()
        };

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let mut apb1 = rcc.apb1;
        let sysclk = clocks.sysclk().raw();

        // GPIO
        let pins = BoardPins::new(dp.GPIOB, dp.GPIOD);

        // USART3 (ST-LINK VCP) console
        let usart_cfg = Config {
            baud_rate: config::CONSOLE_BAUD.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART3,
            (pins.usart3.tx, pins.usart3.rx),
            &clocks,
            usart_cfg,
        );
        if logger::init(Usart::new(serial), log::LevelFilter::Info).is_err() {
            fatal();
        }
        log::info!("i2c-selftest up, sysclk {} Hz", sysclk);

        // LED (LD1)
        let led = Led::active_high(pins.leds.green);

        // I2C1, standard mode
        let i2c = BlockingI2c::i2c1(
            dp.I2C1,
            (pins.i2c1.scl, pins.i2c1.sda),
            Mode::standard(config::I2C_FREQ_KHZ.kHz()),
            &clocks,
            &mut apb1,
            config::I2C_DATA_TIMEOUT_US,
        );
        let bus =
            I2cBus::new(i2c, DwtClock::new(cp.DCB, cp.DWT, sysclk)).with_classifier(i2c_fault);

        let delay = Delay::new(cp.SYST, sysclk);

        let Ok(payload) = Payload::from_slice(config::TEST_PAYLOAD) else {
            fatal()
        };

        let mut controller = CycleController::new(
            bus,
            delay,
            led,
            Target {
                address: config::TARGET_ADDRESS,
                offset: config::TEST_OFFSET,
            },
            payload,
            Timing::default(),
        );

        // Watch `controller.record` from the debugger.
        controller.run_forever()
    }

    fn i2c_fault(e: &nb::Error<i2c::Error>) -> BusError {
        classify_nb(e, |e| matches!(e, i2c::Error::Busy))
    }

    /// Unrecoverable setup failure: stop here with interrupts masked.
    fn fatal() -> ! {
        cortex_m::interrupt::disable();
        loop {
            cortex_m::asm::nop();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("i2c-selftest is firmware; build it with --target thumbv7em-none-eabihf");
}
