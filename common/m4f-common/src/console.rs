/// A byte-oriented output sink, normally the debug UART.
pub trait Console {
    /// Transmit a single byte, blocking until the hardware accepts it.
    fn putc(&mut self, byte: u8);

    /// Transmit `bytes`, turning every `\n` into `\r\n`.
    fn puts(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if b == b'\n' {
                self.putc(b'\r');
            }
            self.putc(b);
        }
    }

    fn puts_str(&mut self, s: &str) {
        self.puts(s.as_bytes())
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn putc(&mut self, byte: u8) {
        (**self).putc(byte)
    }
}

#[cfg(any(test, feature = "std"))]
impl Console for std::vec::Vec<u8> {
    fn putc(&mut self, byte: u8) {
        self.push(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puts_translates_newlines() {
        let mut out = Vec::new();
        out.puts_str("a\nb\n");
        assert_eq!(out, b"a\r\nb\r\n");
    }

    #[test]
    fn test_through_reference() {
        fn greet(mut console: impl Console) {
            console.puts(b"hi\n");
        }
        let mut out = Vec::new();
        greet(&mut out);
        assert_eq!(out, b"hi\r\n");
    }
}
