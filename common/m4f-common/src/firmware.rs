use crate::RPMSG_BUF_SIZE;
use crate::command::Command;
use crate::console::Console;
use crate::fmt::{Arg, MessageBuffer};
use crate::transport::Transport;

const BANNER_RULE: &str = "========================================\n";

/// Tunables for the main loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FirmwareConfig {
    /// Number of ticks between heartbeats. Must be nonzero.
    pub heartbeat_interval: u32,
    /// Busy-wait iterations the main loop spends between ticks.
    pub delay_cycles: u32,
    /// Also send heartbeats to the host instead of only printing them.
    pub forward_heartbeat: bool,
}

impl FirmwareConfig {
    pub const DEFAULT: Self = Self {
        heartbeat_interval: 1_000_000,
        delay_cycles: 100,
        forward_heartbeat: false,
    };
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// All long-lived firmware state: the message buffers, the tick counter, and the console and
/// transport they are written to.
#[derive(Debug)]
pub struct Firmware<C: Console, T: Transport> {
    console: C,
    transport: T,
    config: FirmwareConfig,
    rx: MessageBuffer<RPMSG_BUF_SIZE>,
    tx: MessageBuffer<RPMSG_BUF_SIZE>,
    ticks: u32,
}

impl<C: Console, T: Transport> Firmware<C, T> {
    pub fn new(console: C, transport: T, config: FirmwareConfig) -> Self {
        let config = FirmwareConfig {
            heartbeat_interval: config.heartbeat_interval.max(1),
            ..config
        };
        Self {
            console,
            transport,
            config,
            rx: MessageBuffer::new(),
            tx: MessageBuffer::new(),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn config(&self) -> &FirmwareConfig {
        &self.config
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Print the start-up banner.
    pub fn banner(&mut self) {
        let c = &mut self.console;
        c.puts_str("\n\n");
        c.puts_str(BANNER_RULE);
        c.puts_str("BeaglePlay M4F Firmware Starting\n");
        c.puts_str(BANNER_RULE);
        c.puts_str("Core: ARM Cortex-M4F\n");
        c.puts_str("Communication: RPMsg via shared memory\n");
        c.puts_str("Ready to receive commands from Linux!\n");
        c.puts_str(BANNER_RULE);
        c.puts_str("\n");
        c.puts_str("[M4F] RPMsg initialized\n");
        c.puts_str("[M4F] Waiting for messages from Linux host...\n\n");
    }

    /// Handle one message from the host and send the reply.
    pub fn on_receive(&mut self, data: &[u8]) {
        self.rx.fill(data);
        let msg = self.rx.as_bytes();
        if self.rx.is_truncated() {
            log::warn!(
                "received {} bytes, keeping the first {}",
                data.len(),
                self.rx.capacity()
            );
        }

        self.console.puts(b"[M4F] Received: ");
        self.console.puts(msg);
        self.console.puts(b"\n");

        let command = Command::parse(msg);
        log::debug!("dispatching {command:?}");
        if command.respond(self.ticks, &mut self.tx).truncated {
            log::warn!("reply truncated to {} bytes", self.tx.len());
        }

        if let Err(e) = self.transport.send(self.tx.as_bytes()) {
            log::error!("failed to send reply: {e}");
        }
    }

    /// Advance the tick counter by one, emitting a heartbeat every `heartbeat_interval` ticks.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % self.config.heartbeat_interval != 0 {
            return;
        }

        self.tx.format("[M4F Heartbeat] Tick: %u", &[Arg::Uint(self.ticks)]);
        self.console.puts(self.tx.as_bytes());
        self.console.puts(b"\n");

        if self.config.forward_heartbeat {
            if let Err(e) = self.transport.send(self.tx.as_bytes()) {
                log::error!("failed to forward heartbeat: {e}");
            }
        }
    }
}
