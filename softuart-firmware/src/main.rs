//! Softuart - Software Serial Bridge Firmware
//!
//! Main firmware binary for RP2040-based boards. Runs a bit-banged UART
//! on two spare GPIOs and bridges it onto hardware UART0, so a low-speed
//! serial device (GPS receiver, sensor module) can be reached from the
//! board's main serial port.
//!
//! Line tasks (bit timers, start edge) run on a high-priority interrupt
//! executor so bridge traffic on the thread executor cannot skew bit
//! sampling.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use softuart_hal_rp2040::gpio::{LineOutput, SioLine};

use crate::config::{BRIDGE_BAUDRATE, LINK, RX_CAPACITY, RX_PIN, TX_CAPACITY, TX_PIN};
use crate::link::{BoardUart, RX_EDGE, RX_TIMER, TX_TIMER};

#[macro_use]
mod config;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Executor for the line tasks
static EXECUTOR_LINE: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_LINE.on_interrupt()
}

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// The soft UART is shared by the line tasks and the bridge tasks
static SOFT_UART: StaticCell<BoardUart> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Softuart firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 as the bridge port
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BRIDGE_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (bridge_tx, bridge_rx) = uart.split();

    info!("Bridge UART initialized at {} baud", BRIDGE_BAUDRATE);

    // Soft UART lines
    // Pin numbers come from link.toml (default: RX=GPIO3, TX=GPIO2)
    let (rx_pin, tx_pin) = take_link_pins!(p);
    let rx_input = Input::new(rx_pin, Pull::Up);
    let rx_line = match SioLine::new(RX_PIN) {
        Ok(line) => line,
        Err(e) => panic!("Invalid soft UART RX pin {}: {:?}", RX_PIN, e),
    };
    let tx_line = LineOutput::new(tx_pin);

    let soft_uart: &'static BoardUart = SOFT_UART.init(BoardUart::new(
        rx_line,
        tx_line,
        RX_TIMER.timer(LINK),
        TX_TIMER.timer(LINK),
        RX_EDGE.gate(),
    ));
    soft_uart.init();

    info!(
        "Soft UART on RX=GPIO{} TX=GPIO{} at {} baud (rx ring {}, tx ring {})",
        RX_PIN,
        TX_PIN,
        LINK.baudrate(),
        RX_CAPACITY,
        TX_CAPACITY
    );

    // Line tasks preempt everything on the thread executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let line_spawner = EXECUTOR_LINE.start(interrupt::SWI_IRQ_1);

    line_spawner.spawn(tasks::rx_timer_task(soft_uart)).unwrap();
    line_spawner.spawn(tasks::tx_timer_task(soft_uart)).unwrap();
    line_spawner
        .spawn(tasks::rx_edge_task(soft_uart, rx_input))
        .unwrap();

    info!("Line tasks started");

    spawner.spawn(tasks::downlink_task(soft_uart, bridge_tx)).unwrap();
    spawner.spawn(tasks::uplink_task(soft_uart, bridge_rx)).unwrap();
    spawner.spawn(tasks::diagnostics_task(soft_uart)).unwrap();

    info!("All tasks spawned, bridge running");
}
