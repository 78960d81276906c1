use super::{Arg, Formatted};

/// Message buffer with a fixed capacity of `N - 1` content bytes; the last byte is reserved for
/// the terminating NUL. Overlong writes are truncated.
#[derive(Debug, Clone)]
pub struct MessageBuffer<const N: usize> {
    inner: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuffer<N> {
    const NONEMPTY: () = assert!(N > 0, "MessageBuffer needs room for the terminator");

    pub const fn new() -> Self {
        let () = Self::NONEMPTY;
        Self {
            inner: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Largest number of content bytes the buffer can hold.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn clear(&mut self) {
        self.inner.fill(0);
        self.len = 0;
        self.truncated = false;
    }

    /// Copy `data` in, keeping at most [`capacity`](Self::capacity) bytes. The content ends at the
    /// first NUL in `data`, if there is one.
    pub fn fill(&mut self, data: &[u8]) -> &[u8] {
        let n = data.len().min(N - 1);
        self.inner[..n].copy_from_slice(&data[..n]);
        self.inner[n] = 0;
        self.len = data[..n].iter().position(|&b| b == 0).unwrap_or(n);
        self.truncated = data.len() > n;
        self.as_bytes()
    }

    /// Replace the contents with `template` formatted against `args`.
    pub fn format(&mut self, template: &str, args: &[Arg<'_>]) -> Formatted {
        let out = super::format(&mut self.inner, template, args);
        self.len = out.len;
        self.truncated = out.truncated;
        out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner[..self.len]
    }

    /// Contents including the terminating NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.inner[..=self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the last `fill` or `format` dropped bytes.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
