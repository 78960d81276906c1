use crate::fmt::{Arg, Formatted, MessageBuffer};

const ECHO_PREFIX: &[u8] = b"echo ";

/// A request received from the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command<'a> {
    /// `ping`
    Ping,
    /// `status`
    Status,
    /// `echo <payload>`; the payload may be empty.
    Echo(&'a [u8]),
    /// Anything else, kept verbatim for the error reply.
    Unknown(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Matching is exact and case-sensitive: `ping ` or `Ping` are unknown, and `echo` needs the
    /// trailing space.
    pub fn parse(msg: &'a [u8]) -> Self {
        match msg {
            b"ping" => Command::Ping,
            b"status" => Command::Status,
            _ => match msg.strip_prefix(ECHO_PREFIX) {
                Some(payload) => Command::Echo(payload),
                None => Command::Unknown(msg),
            },
        }
    }

    /// Write the reply to this command into `out`.
    pub fn respond<const N: usize>(&self, ticks: u32, out: &mut MessageBuffer<N>) -> Formatted {
        match *self {
            Command::Ping => out.format("pong from M4F! Counter: %u", &[Arg::Uint(ticks)]),
            Command::Status => out.format(
                "M4F Status:\n  Uptime ticks: %u\n  Core: Cortex-M4F @ 400MHz\n  Status: Running",
                &[Arg::Uint(ticks)],
            ),
            Command::Echo(payload) => out.format("M4F Echo: %s", &[Arg::Str(payload)]),
            Command::Unknown(msg) => out.format(
                "M4F: Unknown command '%s'. Try: %s",
                &[Arg::Str(msg), Arg::from(crate::COMMAND_HELP)],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(msg: &[u8], ticks: u32) -> Vec<u8> {
        let mut out = MessageBuffer::<{ crate::RPMSG_BUF_SIZE }>::new();
        Command::parse(msg).respond(ticks, &mut out);
        out.as_bytes().to_vec()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse(b"ping"), Command::Ping);
        assert_eq!(Command::parse(b"status"), Command::Status);
        assert_eq!(Command::parse(b"echo hi there"), Command::Echo(b"hi there"));
        assert_eq!(Command::parse(b"echo "), Command::Echo(b""));
        assert_eq!(Command::parse(b"echo"), Command::Unknown(b"echo"));
        assert_eq!(Command::parse(b"ping "), Command::Unknown(b"ping "));
        assert_eq!(Command::parse(b"PING"), Command::Unknown(b"PING"));
        assert_eq!(Command::parse(b""), Command::Unknown(b""));
    }

    #[test]
    fn test_replies() {
        assert_eq!(reply(b"ping", 42), b"pong from M4F! Counter: 42");
        assert_eq!(
            reply(b"status", 7),
            b"M4F Status:\n  Uptime ticks: 7\n  Core: Cortex-M4F @ 400MHz\n  Status: Running"
        );
        assert_eq!(reply(b"echo Hello M4F", 0), b"M4F Echo: Hello M4F");
        assert_eq!(
            reply(b"reboot", 0),
            b"M4F: Unknown command 'reboot'. Try: ping, status, echo <msg>"
        );
    }

    #[test]
    fn test_long_echo_is_truncated() {
        let payload = [b'z'; 600];
        let mut msg = b"echo ".to_vec();
        msg.extend_from_slice(&payload);
        let mut out = MessageBuffer::<{ crate::RPMSG_BUF_SIZE }>::new();
        let formatted = Command::parse(&msg).respond(0, &mut out);
        assert!(formatted.truncated);
        assert_eq!(out.len(), crate::RPMSG_MAX_PAYLOAD);
        assert!(out.as_bytes().starts_with(b"M4F Echo: zzz"));
    }
}
