#![cfg_attr(not(any(test, feature = "std")), no_std)]
//! Pieces of the M4F sample firmware that don't touch hardware: the bounded formatter, command
//! handling, the firmware context and the remoteproc resource table layout.
//!
//! Shared by the `m4f-firmware` device crate and the `m4f-client` host tool.

/// Size of a single RPMsg buffer, including the terminating NUL.
pub const RPMSG_BUF_SIZE: usize = 512;

/// Largest payload that fits into one RPMsg buffer.
pub const RPMSG_MAX_PAYLOAD: usize = RPMSG_BUF_SIZE - 1;

/// Commands the firmware understands, as shown in its help text.
pub const COMMAND_HELP: &str = "ping, status, echo <msg>";

/// Bounded `%`-directive formatter.
pub mod fmt;

/// Character sink used for the debug console.
pub mod console;
/// Placeholder inter-processor transport.
pub mod transport;

/// Parsing of commands received from the host.
pub mod command;
/// Firmware state and message handling.
pub mod firmware;

/// Static descriptor consumed by the remoteproc loader.
pub mod resource_table;

pub use console::Console;
pub use firmware::{Firmware, FirmwareConfig};
pub use fmt::{Arg, Formatted};
pub use transport::{ConsoleTransport, Transport, TransportError};
