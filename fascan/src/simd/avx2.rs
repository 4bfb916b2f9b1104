#![allow(clippy::missing_transmute_annotations)]

use core::arch::x86_64::*;
use core::mem::transmute;

pub const LANES: usize = 64;

const SPACE: __m256i = unsafe { transmute([b' '; 32]) };
const TAB: __m256i = unsafe { transmute([b'\t'; 32]) };
const FOUR: __m256i = unsafe { transmute([4u8; 32]) };
const BANG_MINUS_ONE: __m256i = unsafe { transmute([b'!' - 1; 32]) };
const DEL: __m256i = unsafe { transmute([0x7fu8; 32]) };

/// Bit `i` is set iff `buf[i]` is a graphic byte. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn graphic_mask(buf: &[u8]) -> u64 {
    assert!(buf.len() >= LANES);
    unsafe {
        let ptr = buf.as_ptr() as *const __m256i;
        let v_buf1 = _mm256_loadu_si256(ptr);
        let v_buf2 = _mm256_loadu_si256(ptr.add(1));
        movemask_64(is_graphic(v_buf1), is_graphic(v_buf2))
    }
}

/// Bit `i` is set iff `buf[i]` is an ASCII space. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn space_mask(buf: &[u8]) -> u64 {
    assert!(buf.len() >= LANES);
    unsafe {
        let ptr = buf.as_ptr() as *const __m256i;
        let v_buf1 = _mm256_loadu_si256(ptr);
        let v_buf2 = _mm256_loadu_si256(ptr.add(1));
        movemask_64(is_space(v_buf1), is_space(v_buf2))
    }
}

// signed comparison: bytes >= 0x80 are negative and never graphic
#[inline(always)]
fn is_graphic(v: __m256i) -> __m256i {
    unsafe {
        let above_space = _mm256_cmpgt_epi8(v, BANG_MINUS_ONE);
        let del = _mm256_cmpeq_epi8(v, DEL);
        _mm256_andnot_si256(del, above_space)
    }
}

#[inline(always)]
fn is_space(v: __m256i) -> __m256i {
    unsafe {
        let offset = _mm256_sub_epi8(v, TAB);
        let control = _mm256_cmpeq_epi8(_mm256_min_epu8(offset, FOUR), offset);
        _mm256_or_si256(control, _mm256_cmpeq_epi8(v, SPACE))
    }
}

#[inline(always)]
fn movemask_64(v1: __m256i, v2: __m256i) -> u64 {
    unsafe {
        (_mm256_movemask_epi8(v1) as u32 as u64) | ((_mm256_movemask_epi8(v2) as u32 as u64) << 32)
    }
}
