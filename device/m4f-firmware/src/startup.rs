//! Exception handlers and the device interrupt table.
//!
//! `cortex-m-rt` supplies `Reset`: it copies `.data`, zeroes `.bss` and turns on the FPU before
//! calling the `#[entry]` function.

use crate::uart::Uart;
use core::fmt::Write as _;
use cortex_m_rt::{ExceptionFrame, exception};

/// Entry in the device interrupt table.
#[doc(hidden)]
pub union Vector {
    handler: unsafe extern "C" fn(),
    #[allow(dead_code)]
    reserved: usize,
}

unsafe extern "C" {
    fn MAILBOX();
}

/// IRQ 0 is the host mailbox.
#[doc(hidden)]
#[unsafe(link_section = ".vector_table.interrupts")]
#[unsafe(no_mangle)]
pub static __INTERRUPTS: [Vector; 1] = [Vector { handler: MAILBOX }];

#[exception]
unsafe fn HardFault(ef: &ExceptionFrame) -> ! {
    let _ = writeln!(Uart::new(), "\n[M4F] hard fault at pc {:#010x}", ef.pc());
    halt()
}

#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    let _ = writeln!(Uart::new(), "\n[M4F] unhandled exception {irqn}");
    halt()
}

pub fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
