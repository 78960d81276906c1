use crate::board::UART0_BASE;
use m4f_common::Console;
use volatile_register::{RO, RW, WO};

/// 16550-compatible register block; every register is 32 bits wide on this part.
#[repr(C)]
struct RegisterBlock {
    /// THR on write, RBR on read.
    thr: RW<u32>,
    ier: RW<u32>,
    /// FCR on write, IIR on read.
    fcr: WO<u32>,
    /// LCR and MCR; left as the bootloader configured them.
    _line_modem: [u32; 2],
    lsr: RO<u32>,
}

const FCR_FIFO_ENABLE: u32 = 1 << 0;
/// Transmit holding register empty.
const LSR_THRE: u32 = 1 << 5;

/// Handle to MCU UART0. Handles are interchangeable; they all refer to the same hardware.
pub struct Uart {
    regs: &'static RegisterBlock,
}

impl Uart {
    pub fn new() -> Self {
        Self {
            regs: unsafe { &*(UART0_BASE as *const RegisterBlock) },
        }
    }
}

/// The bootloader leaves UART0 configured for 115200 8n1; keep that, but make sure nothing will
/// raise interrupts and that the FIFOs are on.
pub fn init() {
    let uart = Uart::new();
    unsafe {
        uart.regs.ier.write(0);
        uart.regs.fcr.write(FCR_FIFO_ENABLE);
    }
}

impl Console for Uart {
    fn putc(&mut self, byte: u8) {
        while self.regs.lsr.read() & LSR_THRE == 0 {}
        unsafe { self.regs.thr.write(u32::from(byte)) };
    }
}

impl core::fmt::Write for Uart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.puts(s.as_bytes());
        Ok(())
    }
}
