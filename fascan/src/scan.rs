//! Boundary scanning over a byte range.
//!
//! Every `find_*` function returns the offset of the first byte of `hay`
//! matching its predicate, or `hay.len()` when there is none. Full 64-byte
//! blocks are classified at once with the SIMD backend and the first match is
//! read off the bitmask; the tail is scanned byte by byte.

use crate::simd::{LANES, graphic_mask, space_mask};

/// Printable ASCII except space: `'!'..='~'`.
#[inline(always)]
pub const fn is_graphic(byte: u8) -> bool {
    byte.wrapping_sub(b'!') < (b'~' - b'!' + 1)
}

/// ASCII whitespace: `'\t'..='\r'` and `' '`.
#[inline(always)]
pub const fn is_space(byte: u8) -> bool {
    byte == b' ' || byte.wrapping_sub(b'\t') <= (b'\r' - b'\t')
}

/// Space or tab.
#[inline(always)]
pub const fn is_blank(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

#[inline(always)]
fn find_by_mask(
    hay: &[u8],
    mask: fn(&[u8]) -> u64,
    predicate: fn(u8) -> bool,
    expected: bool,
) -> usize {
    let mut blocks = hay.chunks_exact(LANES);
    let mut offset = 0;
    for block in blocks.by_ref() {
        let hits = if expected { mask(block) } else { !mask(block) };
        if hits != 0 {
            return offset + hits.trailing_zeros() as usize;
        }
        offset += LANES;
    }
    let tail = blocks.remainder();
    offset
        + tail
            .iter()
            .position(|&b| predicate(b) == expected)
            .unwrap_or(tail.len())
}

#[inline(always)]
pub fn find_graphic(hay: &[u8]) -> usize {
    find_by_mask(hay, graphic_mask, is_graphic, true)
}

#[inline(always)]
pub fn find_non_graphic(hay: &[u8]) -> usize {
    find_by_mask(hay, graphic_mask, is_graphic, false)
}

#[inline(always)]
pub fn find_space(hay: &[u8]) -> usize {
    find_by_mask(hay, space_mask, is_space, true)
}

#[inline(always)]
pub fn find_non_space(hay: &[u8]) -> usize {
    find_by_mask(hay, space_mask, is_space, false)
}

/// Number of `'\n'` bytes in `hay`.
#[inline(always)]
pub fn count_newlines(hay: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', hay).count()
}
