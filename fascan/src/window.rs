//! Sliding read window over a fixed-size buffer.

use std::io::{self, ErrorKind, Read};
use tracing::trace;

pub const DEFAULT_BUFFER_SIZE: usize = 1 << 14;

/// A fixed-size buffer refilled from a byte source, with two cursors:
/// `read` (next unconsumed byte) and `fill` (one past the last valid byte).
///
/// End of stream is the state `read == fill + 1`. A refill overwrites the whole
/// buffer, so slices returned by [`as_slice`](Self::as_slice) must be consumed
/// before calling [`advance`](Self::advance) past the end of the window.
pub struct ReadWindow<R: Read> {
    source: R,
    buf: Box<[u8]>,
    read: usize,
    fill: usize,
}

impl<R: Read> ReadWindow<R> {
    /// Allocate the buffer and perform the first refill.
    pub fn with_capacity(source: R, capacity: usize) -> io::Result<Self> {
        if capacity == 0 {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "read window capacity must be positive",
            ));
        }
        let mut window = Self {
            source,
            buf: vec![0; capacity].into_boxed_slice(),
            read: 0,
            fill: 0,
        };
        window.refill()?;
        Ok(window)
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the current byte, or `None` at the end of the window.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        if self.read < self.fill {
            Some(self.buf[self.read])
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn begin(&self) -> usize {
        self.read
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.fill
    }

    /// The unconsumed bytes `begin()..end()`, empty at end of stream.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        if self.read < self.fill {
            &self.buf[self.read..self.fill]
        } else {
            &[]
        }
    }

    /// Consume `steps` bytes, refilling once the window is exhausted.
    #[inline(always)]
    pub fn advance(&mut self, steps: usize) -> io::Result<()> {
        debug_assert!(self.read + steps <= self.fill);
        self.read += steps;
        if self.read >= self.fill {
            self.refill()?;
        }
        Ok(())
    }

    /// Replace the window with one read from the source and reset both cursors.
    #[cold]
    pub fn refill(&mut self) -> io::Result<usize> {
        let count = loop {
            match self.source.read(&mut self.buf) {
                Ok(count) => break count,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        trace!(bytes = count, "refill");
        if count == 0 {
            self.fill = 0;
            self.read = 1;
        } else {
            self.read = 0;
            self.fill = count;
        }
        Ok(count)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.read == self.fill
    }

    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.read > self.fill
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_cursors() {
        let mut w = ReadWindow::with_capacity(&b">seq1\nACGT"[..], 4).unwrap();
        assert_eq!(w.capacity(), 4);
        assert_eq!((w.begin(), w.end()), (0, 4));
        assert_eq!(w.as_slice(), b">seq");
        assert_eq!(w.peek(), Some(b'>'));

        w.advance(3).unwrap();
        assert_eq!(w.peek(), Some(b'q'));
        w.advance(1).unwrap();
        assert_eq!(w.as_slice(), b"1\nAC");

        w.advance(4).unwrap();
        assert_eq!(w.as_slice(), b"GT");
        assert!(!w.is_eof());

        w.advance(2).unwrap();
        assert!(w.is_eof());
        assert!(!w.is_empty());
        assert_eq!(w.peek(), None);
        assert_eq!(w.as_slice(), b"");
    }

    #[test]
    fn test_empty_source() {
        let w = ReadWindow::with_capacity(&b""[..], 16).unwrap();
        assert!(w.is_eof());
        assert_eq!(w.peek(), None);
    }

    #[test]
    fn test_short_reads() {
        let data = b">a\nACGTACGT\n";
        let mut w = ReadWindow::with_capacity(Trickle { data, step: 3 }, 64).unwrap();
        let mut seen = Vec::new();
        while let Some(b) = w.peek() {
            seen.push(b);
            w.advance(1).unwrap();
        }
        assert_eq!(seen, data);
        assert!(w.get_ref().data.is_empty());
    }

    #[test]
    fn test_zero_capacity() {
        let err = ReadWindow::with_capacity(&b">a"[..], 0).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_interrupted_is_retried() {
        struct Flaky(bool);
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.0 {
                    self.0 = true;
                    return Err(ErrorKind::Interrupted.into());
                }
                buf[0] = b'>';
                Ok(1)
            }
        }
        let w = ReadWindow::with_capacity(Flaky(false), 8).unwrap();
        assert_eq!(w.peek(), Some(b'>'));
    }
}
