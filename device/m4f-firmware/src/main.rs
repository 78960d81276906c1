//! Sample firmware for the AM62x MCU Cortex-M4F core.
//!
//! Answers `ping`, `status` and `echo <msg>` from the Linux host. The RPMsg transport is not wired
//! up yet; replies are logged to MCU UART0 instead.

#![no_std]
#![no_main]

mod board;
mod logger;
mod mailbox;
mod rsc;
mod startup;
mod uart;

use crate::uart::Uart;
use core::panic::PanicInfo;
use cortex_m_rt::entry;
use m4f_common::{ConsoleTransport, Firmware, FirmwareConfig};

const CONFIG: FirmwareConfig = FirmwareConfig::DEFAULT;

#[entry]
fn main() -> ! {
    uart::init();
    logger::init(board::LOG_LEVEL);

    let mut firmware = Firmware::new(Uart::new(), ConsoleTransport::new(Uart::new()), CONFIG);
    firmware.banner();
    log::debug!(
        "resource table at {:p}, {} bytes",
        &raw const rsc::RESOURCE_TABLE,
        rsc::RESOURCE_TABLE.as_bytes().len()
    );

    // TODO: drain vring messages into `Firmware::on_receive` once the mailbox IRQ delivers them
    loop {
        firmware.tick();
        delay(firmware.config().delay_cycles);
    }
}

fn delay(cycles: u32) {
    for _ in 0..cycles {
        cortex_m::asm::nop();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    use core::fmt::Write as _;

    let mut uart = Uart::new();
    if let Some(loc) = info.location() {
        let _ = writeln!(
            uart,
            "[M4F] panic at '{}' line {}:",
            loc.file(),
            loc.line()
        );
    } else {
        let _ = writeln!(uart, "[M4F] panic at [unknown location]:");
    }
    if writeln!(uart, "{}", info.message()).is_err() {
        let _ = writeln!(uart, "[M4F] [failed to format panic message]");
    }
    let _ = writeln!(uart, "[M4F] halting.");

    startup::halt()
}
