use console::style;
use eyre::{Result, WrapErr, bail, eyre};
use m4f_common::RPMSG_MAX_PAYLOAD;
use nix::poll::{PollFd, PollFlags, PollTimeout};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::os::fd::AsFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Largest message read back from the endpoint in one go.
const RECV_BUF_SIZE: usize = 4096;

/// An open RPMsg endpoint. Every `write` on the device is delivered as one message, and every
/// `read` returns at most one message.
#[derive(Debug)]
pub struct Client {
    file: File,
    path: PathBuf,
}

impl Client {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .wrap_err_with(|| format!("failed to open {}", path.display()))?;
        tracing::info!("connected to M4F via {}", path.display());
        Ok(Self::from_file(file, path))
    }

    /// Wrap an already open, non-blocking endpoint.
    pub fn from_file(file: File, path: impl Into<PathBuf>) -> Self {
        Self {
            file,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Send `message`, returning the number of bytes the device accepted.
    pub fn send(&mut self, message: &str) -> Result<usize> {
        if message.len() > RPMSG_MAX_PAYLOAD {
            tracing::warn!(
                "message is {} bytes; the firmware keeps only the first {RPMSG_MAX_PAYLOAD}",
                message.len()
            );
        }
        // a single write, so the message isn't split across RPMsg buffers
        let written = self
            .file
            .write(message.as_bytes())
            .wrap_err_with(|| format!("failed to send message to {}", self.path.display()))?;
        println!(
            "{} {message} ({written} bytes)",
            style("→ Sent:").cyan().bold()
        );
        Ok(written)
    }

    /// Wait up to `timeout` for a message. Returns `None` if nothing arrived in time.
    pub fn receive(&mut self, timeout: Duration) -> Result<Option<String>> {
        let deadline = Instant::now()
            .checked_add(timeout)
            .ok_or_else(|| eyre!("timeout {timeout:?} is out of range"))?;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!("no message within {timeout:?}");
                return Ok(None);
            }
            let mut fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];
            let ready = nix::poll::poll(&mut fds, PollTimeout::from(poll_millis(remaining)))
                .wrap_err_with(|| format!("failed to poll {}", self.path.display()))?;
            if ready > 0 {
                break;
            }
        }

        let mut buf = [0u8; RECV_BUF_SIZE];
        let n = match self.file.read(&mut buf) {
            Ok(0) => bail!("{} was closed by the remote side", self.path.display()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
            Err(e) => {
                return Err(e).wrap_err_with(|| {
                    format!("failed to receive message from {}", self.path.display())
                });
            }
        };
        let message = String::from_utf8_lossy(&buf[..n]).into_owned();
        println!("{} {message}", style("← Received:").green().bold());
        Ok(Some(message))
    }

    pub fn send_and_receive(&mut self, message: &str, timeout: Duration) -> Result<Option<String>> {
        self.send(message)?;
        self.receive(timeout)
    }
}

/// One `poll` call's worth of `remaining`: rounded up to whole milliseconds, at most `u16::MAX`.
fn poll_millis(remaining: Duration) -> u16 {
    u16::try_from(remaining.as_micros().div_ceil(1000)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::OwnedFd;
    use std::os::unix::net::UnixStream;

    /// A client connected to the returned socket, which plays the firmware side.
    fn pair() -> (Client, UnixStream) {
        let (ours, theirs) = UnixStream::pair().expect("failed to create socket pair");
        ours.set_nonblocking(true).expect("failed to set non-blocking");
        let file = File::from(OwnedFd::from(ours));
        (Client::from_file(file, "/dev/rpmsg-test"), theirs)
    }

    #[test]
    fn test_send() {
        let (mut client, mut firmware) = pair();
        assert_eq!(client.send("ping").unwrap(), 4);
        let mut buf = [0u8; 4];
        firmware.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ping");
    }

    #[test]
    fn test_receive_timeout() {
        let (mut client, _firmware) = pair();
        let reply = client.receive(Duration::from_millis(20)).unwrap();
        assert_eq!(reply, None);
    }

    #[test]
    fn test_send_and_receive() {
        let (mut client, mut firmware) = pair();
        firmware.write_all(b"pong from M4F! Counter: 5").unwrap();
        let reply = client
            .send_and_receive("ping", Duration::from_secs(1))
            .unwrap();
        assert_eq!(reply.as_deref(), Some("pong from M4F! Counter: 5"));
    }

    #[test]
    fn test_poll_millis() {
        assert_eq!(poll_millis(Duration::from_micros(1)), 1);
        assert_eq!(poll_millis(Duration::from_micros(1500)), 2);
        assert_eq!(poll_millis(Duration::from_millis(500)), 500);
        assert_eq!(poll_millis(Duration::from_secs(120)), u16::MAX);
    }

    #[test]
    fn test_receive_late_reply() {
        let (mut client, mut firmware) = pair();
        let writer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            firmware.write_all(b"M4F Status: Running, Ticks: 7").unwrap();
            firmware
        });
        let reply = client.receive(Duration::from_secs(5)).unwrap();
        assert_eq!(reply.as_deref(), Some("M4F Status: Running, Ticks: 7"));
        writer.join().unwrap();
    }

    #[test]
    fn test_receive_lossy_utf8() {
        let (mut client, mut firmware) = pair();
        firmware.write_all(b"M4F Echo: \xff").unwrap();
        let reply = client.receive(Duration::from_secs(1)).unwrap();
        assert_eq!(reply.as_deref(), Some("M4F Echo: \u{fffd}"));
    }

    #[test]
    fn test_receive_closed() {
        let (mut client, firmware) = pair();
        drop(firmware);
        assert!(client.receive(Duration::from_secs(1)).is_err());
    }
}
