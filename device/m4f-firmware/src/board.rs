//! AM62x MCU domain addresses used by the firmware.

use log::Level;

/// MCU UART0.
pub const UART0_BASE: usize = 0x04A0_0000;
/// Mailbox used to signal the host. Not driven yet.
#[allow(dead_code)]
pub const MAILBOX_BASE: usize = 0x2900_0000;

pub const LOG_LEVEL: Level = Level::Info;
