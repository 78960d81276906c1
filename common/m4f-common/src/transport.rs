use crate::RPMSG_MAX_PAYLOAD;
use crate::console::Console;
use thiserror::Error;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum TransportError {
    #[error("message of {len} bytes exceeds RPMsg payload limit of {limit} bytes")]
    MessageTooLong { len: usize, limit: usize },
}

/// Sends messages to the host processor.
pub trait Transport {
    fn send(&mut self, msg: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, msg: &[u8]) -> Result<(), TransportError> {
        (**self).send(msg)
    }
}

/// Stand-in for the RPMsg send path: there are no vrings or mailbox signalling yet, so outgoing
/// messages are only logged to a console.
#[derive(Debug)]
pub struct ConsoleTransport<C: Console> {
    console: C,
}

impl<C: Console> ConsoleTransport<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn into_inner(self) -> C {
        self.console
    }
}

impl<C: Console> Transport for ConsoleTransport<C> {
    fn send(&mut self, msg: &[u8]) -> Result<(), TransportError> {
        if msg.len() > RPMSG_MAX_PAYLOAD {
            return Err(TransportError::MessageTooLong {
                len: msg.len(),
                limit: RPMSG_MAX_PAYLOAD,
            });
        }
        self.console.puts(b"[M4F] Sending: ");
        self.console.puts(msg);
        self.console.puts(b"\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_transport_logs() {
        let mut transport = ConsoleTransport::new(Vec::new());
        transport.send(b"pong").expect("send should succeed");
        assert_eq!(transport.into_inner(), b"[M4F] Sending: pong\r\n");
    }

    #[test]
    fn test_console_transport_rejects_oversized() {
        let mut transport = ConsoleTransport::new(Vec::new());
        let msg = [b'x'; RPMSG_MAX_PAYLOAD + 1];
        assert_eq!(
            transport.send(&msg),
            Err(TransportError::MessageTooLong {
                len: RPMSG_MAX_PAYLOAD + 1,
                limit: RPMSG_MAX_PAYLOAD
            })
        );
        assert!(transport.into_inner().is_empty());
    }
}
