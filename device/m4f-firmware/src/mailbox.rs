//! Host-to-M4F mailbox interrupt.
//!
//! Reception is not implemented: the vrings are never set up and the mailbox interrupt is left
//! disabled, so this handler only exists to fill the vector slot.

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn MAILBOX() {
    log::warn!("mailbox interrupt with no RPMsg endpoint registered");
}
