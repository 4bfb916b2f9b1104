use std::collections::TryReserveError;

/// Initial capacity, sized for typical sequence names.
pub(crate) const INITIAL_CAPACITY: usize = 60;

/// Owned buffer a token is assembled into, independent of the read window.
///
/// Only ASCII bytes may be appended: the parser feeds it graphic runs
/// and blanks, which is what makes [`into_string`](Self::into_string) free.
#[derive(Debug)]
pub(crate) struct Accumulator {
    buf: Vec<u8>,
}

impl Accumulator {
    #[inline(always)]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a run of bytes, growing the storage by 1.5x when it is full.
    #[inline(always)]
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), TryReserveError> {
        debug_assert!(bytes.is_ascii());
        let required = self.buf.len() + bytes.len();
        if required > self.buf.capacity() {
            self.grow(required)?;
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    #[inline(always)]
    pub fn push(&mut self, byte: u8) -> Result<(), TryReserveError> {
        self.append(&[byte])
    }

    #[cold]
    fn grow(&mut self, required: usize) -> Result<(), TryReserveError> {
        let target = if self.buf.capacity() == 0 {
            INITIAL_CAPACITY.max(required)
        } else {
            (required / 2).saturating_mul(3).max(required)
        };
        self.buf.try_reserve_exact(target - self.buf.len())
    }

    /// Turn the accumulated bytes into the immutable value owned by a record.
    #[inline(always)]
    pub fn into_string(self) -> String {
        debug_assert!(self.buf.is_ascii());
        // SAFETY: only ASCII bytes are ever appended.
        unsafe { String::from_utf8_unchecked(self.buf) }
    }
}
