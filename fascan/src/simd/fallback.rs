//! Word-at-a-time classification, eight bytes per `u64`.
//! See http://graphics.stanford.edu/~seander/bithacks.html

pub const LANES: usize = 64;

const ONES: u64 = u64::MAX / 255;
const HIGH: u64 = ONES * 0x80;
const LOW7: u64 = ONES * 0x7f;

/// Gathers the high bit of each byte into the low 8 bits, byte 0 first.
#[inline(always)]
const fn movemask_8(high_bits: u64) -> u64 {
    high_bits.wrapping_mul(0x0002_0408_1020_4081) >> 56
}

/// High bit of each byte set iff its low 7 bits are at least `n` (`n` in `1..=0x80`).
#[inline(always)]
const fn low7_at_least(x: u64, n: u8) -> u64 {
    ((x & LOW7) + ONES * (0x80 - n as u64)) & HIGH
}

/// High bit of each byte set iff the byte equals `n`.
#[inline(always)]
const fn bytes_equal(x: u64, n: u8) -> u64 {
    let y = x ^ (ONES * n as u64);
    !(((y & LOW7) + LOW7) | y) & HIGH
}

#[inline(always)]
fn graphic_word(x: u64) -> u64 {
    let ascii = !x & HIGH;
    let above_space = low7_at_least(x, b'!');
    let del = low7_at_least(x, 0x7f);
    movemask_8(ascii & above_space & !del)
}

#[inline(always)]
fn space_word(x: u64) -> u64 {
    let ascii = !x & HIGH;
    let control = low7_at_least(x, b'\t') & !low7_at_least(x, b'\r' + 1) & ascii;
    movemask_8(control | bytes_equal(x, b' '))
}

#[inline(always)]
fn mask_64(buf: &[u8], word_mask: fn(u64) -> u64) -> u64 {
    assert!(buf.len() >= LANES);
    let mut mask = 0;
    for (i, word) in buf[..LANES].chunks_exact(8).enumerate() {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(word);
        mask |= word_mask(u64::from_le_bytes(bytes)) << (8 * i);
    }
    mask
}

/// Bit `i` is set iff `buf[i]` is a graphic byte. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn graphic_mask(buf: &[u8]) -> u64 {
    mask_64(buf, graphic_word)
}

/// Bit `i` is set iff `buf[i]` is an ASCII space. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn space_mask(buf: &[u8]) -> u64 {
    mask_64(buf, space_word)
}
