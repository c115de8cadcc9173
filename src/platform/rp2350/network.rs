//! CYW43439 radio and network stack bring-up
//!
//! Initializes the Pico 2 W radio over PIO SPI, spawns the driver and
//! network stack runner tasks, and returns the control and stack handles
//! that [`netif_driver_task`](super::netif_driver_task) consumes. No join
//! happens here: the interfaces come up unconfigured and all association
//! and addressing is driven through [`Cyw43Netif`](super::Cyw43Netif)
//! commands afterwards.
//!
//! The firmware blobs are passed in by the caller so the binary crate
//! decides how to embed them:
//!
//! ```ignore
//! let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
//! let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");
//!
//! let (control, stack) = network::bring_up(
//!     spawner, fw, clm, p.PIN_23, p.PIN_24, p.PIN_25, p.PIN_29, p.PIO0, p.DMA_CH0,
//! )
//! .await;
//! ```
//!
//! # Memory Usage
//!
//! - CYW43439 driver: ~20 KB RAM
//! - embassy-net stack: ~15 KB RAM

use cyw43::Control;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::{bind_interrupts, Peri};
use embassy_time::Timer;
use static_cell::StaticCell;

bind_interrupts!(pub struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Initialize the CYW43439 radio and network stack.
///
/// Spawns the radio and stack runner tasks on `spawner` and returns the
/// control handle plus the station's network stack, both ready for
/// [`netif_driver_task`](super::netif_driver_task).
///
/// # Arguments
///
/// * `spawner` - Embassy task spawner
/// * `fw` - CYW43439 main firmware (43439A0.bin)
/// * `clm` - CYW43439 CLM blob (43439A0_clm.bin)
/// * `pin_23` - WiFi chip power (PIN_23)
/// * `pin_24` - WiFi chip DIO (PIN_24)
/// * `pin_25` - WiFi chip CS (PIN_25)
/// * `pin_29` - WiFi chip CLK (PIN_29)
/// * `pio0` - PIO0 peripheral for the SPI state machine
/// * `dma_ch0` - DMA channel for the SPI transfers
#[allow(clippy::too_many_arguments)]
pub async fn bring_up(
    spawner: Spawner,
    fw: &'static [u8],
    clm: &'static [u8],
    pin_23: Peri<'static, PIN_23>,
    pin_24: Peri<'static, PIN_24>,
    pin_25: Peri<'static, PIN_25>,
    pin_29: Peri<'static, PIN_29>,
    pio0: Peri<'static, PIO0>,
    dma_ch0: Peri<'static, DMA_CH0>,
) -> (Control<'static>, Stack<'static>) {
    let mut rng = RoscRng;

    let pwr = Output::new(pin_23, Level::Low);
    let cs = Output::new(pin_25, Level::High);
    let mut pio = Pio::new(pio0, PioIrqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        pin_24, // DIO
        pin_29, // CLK
        dma_ch0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;

    spawner.spawn(wifi_task(runner)).unwrap();

    // Give the radio task time to start before talking to the chip.
    Timer::after_millis(100).await;

    // CLM must be loaded before any other radio operation.
    control.init(clm).await;

    let mac = control.address().await;
    crate::log_debug!(
        "radio MAC address: {:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0],
        mac[1],
        mac[2],
        mac[3],
        mac[4],
        mac[5]
    );

    // PowerSave makes the chip drop pings; keep the radio fully awake.
    control
        .set_power_management(cyw43::PowerManagementMode::None)
        .await;

    // Placeholder addressing; every join commits the staged configuration
    // before associating.
    let seed = rng.next_u64();
    static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(net_task(runner)).unwrap();

    // Let the stack task settle before interface commands arrive.
    Timer::after_millis(500).await;

    crate::log_info!("network stack up");

    (control, stack)
}

/// CYW43439 driver event loop.
///
/// Must be running for any radio operation to complete.
#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// embassy-net stack event loop.
///
/// Must be running for any network operation to complete.
#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
