//! Board orientation on an nRF52840 with a LIS3DH on TWIM0.
//!
//! - SDA -> P0.29
//! - SCL -> P0.28
//! - INT1 -> P0.02
//!
//! Prints the orientation over RTT whenever it changes.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use orientation_sensing::{
    BusGuard, Edge, InterruptBridge, Lis3dhSensor, LogSink, SensingTask, ORIENTATION_INTERRUPT,
};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type Bus = Twim<'static, TWISPI0>;

static BUS_GUARD: StaticCell<BusGuard<CriticalSectionRawMutex, Bus>> = StaticCell::new();

/// Fed from the sensor interrupt line.
static BRIDGE: InterruptBridge = InterruptBridge::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    let twim0_scl = p.P0_28;
    let twim0_sda = p.P0_29;

    let mut config = twim::Config::default();
    config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, twim0_sda, twim0_scl, config);

    let guard: &'static BusGuard<CriticalSectionRawMutex, Bus> =
        BUS_GUARD.init(BusGuard::new(twim));

    // listen for orientation changes
    let mut int1 = Input::new(p.P0_02, Pull::Up);

    let edge_task = async {
        loop {
            match ORIENTATION_INTERRUPT.edge {
                Edge::Rising => int1.wait_for_rising_edge().await,
                Edge::Falling => int1.wait_for_falling_edge().await,
            }
            BRIDGE.on_edge();
        }
    };

    let sensing_task = async {
        let mut task = SensingTask::new(
            guard,
            &BRIDGE,
            Lis3dhSensor::default(),
            ORIENTATION_INTERRUPT,
        );

        info!("Board orientation from LIS3DH motion sensor");
        let _fault = task.run(LogSink).await;

        // faulted, nothing left to do
        core::future::pending::<()>().await
    };

    futures::join!(edge_task, sensing_task);
}
