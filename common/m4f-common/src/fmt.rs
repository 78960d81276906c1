//! Directive set:
//! ```txt
//! | %s     | byte string, copied up to its first NUL           |
//! | %d     | signed decimal, leading '-' for negative values   |
//! | %u, %l | unsigned decimal                                  |
//! | %x     | unsigned hex, lowercase, no prefix, no padding    |
//! | %%     | literal '%'                                       |
//! ```
//! Any other character following `%` is consumed and produces no output, as does a `%` at the
//! very end of the template. Neither consumes an argument.
//!
//! Output is always bounded: for a buffer of length `n`, at most `n - 1` content bytes are written
//! followed by a NUL. Overflowing output is discarded silently, though [`Formatted::truncated`]
//! records that it happened.

/// Fixed-capacity message storage built on [`format`].
mod buffer;
pub use buffer::MessageBuffer;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Longest possible rendering of a 32-bit value: `-2147483648`.
const MAX_DIGITS: usize = 11;

/// A single formatting argument.
///
/// Arguments are matched positionally against directives. A directive whose argument has a
/// different kind still renders deterministically:
///  - `%s` renders integers in decimal,
///  - `%d` reinterprets an unsigned argument as `i32`,
///  - `%u`/`%l`/`%x` reinterpret a signed argument as `u32`,
///  - numeric directives render nothing for a string argument.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Arg<'a> {
    Str(&'a [u8]),
    Int(i32),
    Uint(u32),
}

impl Arg<'_> {
    fn as_signed(self) -> Option<i32> {
        match self {
            Arg::Int(v) => Some(v),
            Arg::Uint(v) => Some(v as i32),
            Arg::Str(_) => None,
        }
    }
    fn as_unsigned(self) -> Option<u32> {
        match self {
            Arg::Int(v) => Some(v as u32),
            Arg::Uint(v) => Some(v),
            Arg::Str(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value.as_bytes())
    }
}
impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Arg::Str(value)
    }
}
impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Arg::Str(value.as_slice())
    }
}
impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Int(value)
    }
}
impl From<i16> for Arg<'_> {
    fn from(value: i16) -> Self {
        Arg::Int(value.into())
    }
}
impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Arg::Uint(value)
    }
}
impl From<u16> for Arg<'_> {
    fn from(value: u16) -> Self {
        Arg::Uint(value.into())
    }
}
impl From<u8> for Arg<'_> {
    fn from(value: u8) -> Self {
        Arg::Uint(value.into())
    }
}

/// Result of a [`format`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Formatted {
    /// Content bytes written, excluding the terminating NUL.
    pub len: usize,
    /// Whether any output was discarded because the buffer was full.
    pub truncated: bool,
}

/// Write cursor that never passes `buf.len() - 1`.
struct Cursor<'b> {
    buf: &'b mut [u8],
    written: usize,
    limit: usize,
    truncated: bool,
}

impl<'b> Cursor<'b> {
    fn new(buf: &'b mut [u8]) -> Self {
        let limit = buf.len().saturating_sub(1);
        Self {
            buf,
            written: 0,
            limit,
            truncated: false,
        }
    }

    fn push(&mut self, byte: u8) {
        if self.written < self.limit {
            self.buf[self.written] = byte;
            self.written += 1;
        } else {
            self.truncated = true;
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        bytes.iter().for_each(|&b| self.push(b));
    }

    fn finish(self) -> Formatted {
        // a zero-length buffer has no room for the terminator either
        if let Some(terminator) = self.buf.get_mut(self.written) {
            *terminator = 0;
        }
        Formatted {
            len: self.written,
            truncated: self.truncated,
        }
    }
}

/// Digits of a rendered integer, most significant first.
struct Digits {
    buf: [u8; MAX_DIGITS],
    len: usize,
}

impl Digits {
    fn render(mut magnitude: u32, base: u32, negative: bool) -> Self {
        let mut buf = [0u8; MAX_DIGITS];
        let mut len = 0;
        // least significant first; reversed below
        loop {
            buf[len] = DIGITS[(magnitude % base) as usize];
            len += 1;
            magnitude /= base;
            if magnitude == 0 {
                break;
            }
        }
        if negative {
            buf[len] = b'-';
            len += 1;
        }
        buf[..len].reverse();
        Self { buf, len }
    }

    fn signed(value: i32) -> Self {
        Self::render(value.unsigned_abs(), 10, value < 0)
    }

    fn unsigned(value: u32, base: u32) -> Self {
        Self::render(value, base, false)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Format `template` into `buf`, substituting `args` for directives in order.
///
/// A directive with no argument left renders nothing; surplus arguments are ignored.
pub fn format(buf: &mut [u8], template: &str, args: &[Arg<'_>]) -> Formatted {
    let mut out = Cursor::new(buf);
    let mut args = args.iter().copied();
    let mut bytes = template.bytes();

    while let Some(byte) = bytes.next() {
        if byte != b'%' {
            out.push(byte);
            continue;
        }
        let Some(directive) = bytes.next() else {
            break;
        };
        match directive {
            b'%' => out.push(b'%'),
            b's' => match args.next() {
                Some(Arg::Str(s)) => {
                    let end = s.iter().position(|&b| b == 0).unwrap_or(s.len());
                    out.push_bytes(&s[..end]);
                }
                Some(Arg::Int(v)) => out.push_bytes(Digits::signed(v).as_bytes()),
                Some(Arg::Uint(v)) => out.push_bytes(Digits::unsigned(v, 10).as_bytes()),
                None => {}
            },
            b'd' => {
                if let Some(v) = args.next().and_then(Arg::as_signed) {
                    out.push_bytes(Digits::signed(v).as_bytes());
                }
            }
            b'u' | b'l' => {
                if let Some(v) = args.next().and_then(Arg::as_unsigned) {
                    out.push_bytes(Digits::unsigned(v, 10).as_bytes());
                }
            }
            b'x' => {
                if let Some(v) = args.next().and_then(Arg::as_unsigned) {
                    out.push_bytes(Digits::unsigned(v, 16).as_bytes());
                }
            }
            _ => {}
        }
    }

    out.finish()
}

/// Format into a byte buffer, converting each argument with [`Arg::from`].
///
/// ```
/// let mut buf = [0u8; 32];
/// let out = m4f_common::m4f_format!(&mut buf, "Tick: %u", 1_000_000u32);
/// assert_eq!(&buf[..out.len], b"Tick: 1000000");
/// ```
#[macro_export]
macro_rules! m4f_format {
    ($buf:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::format($buf, $template, &[$($crate::fmt::Arg::from($arg)),*])
    };
}
