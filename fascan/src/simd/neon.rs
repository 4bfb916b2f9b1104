#![allow(clippy::missing_transmute_annotations)]

use core::arch::aarch64::*;
use core::mem::transmute;

pub const LANES: usize = 64;

const SPACE: uint8x16_t = unsafe { transmute([b' '; 16]) };
const TAB: uint8x16_t = unsafe { transmute([b'\t'; 16]) };
const FOUR: uint8x16_t = unsafe { transmute([4u8; 16]) };
const BANG: uint8x16_t = unsafe { transmute([b'!'; 16]) };
const TILDE: uint8x16_t = unsafe { transmute([b'~'; 16]) };

/// Bit `i` is set iff `buf[i]` is a graphic byte. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn graphic_mask(buf: &[u8]) -> u64 {
    assert!(buf.len() >= LANES);
    unsafe {
        let v = vld4q_u8(buf.as_ptr());
        movemask_64(map_8x16x4(v, |v| {
            vandq_u8(vcgeq_u8(v, BANG), vcleq_u8(v, TILDE))
        }))
    }
}

/// Bit `i` is set iff `buf[i]` is an ASCII space. `buf` must hold at least 64 bytes.
#[inline(always)]
pub fn space_mask(buf: &[u8]) -> u64 {
    assert!(buf.len() >= LANES);
    unsafe {
        let v = vld4q_u8(buf.as_ptr());
        movemask_64(map_8x16x4(v, |v| {
            vorrq_u8(vceqq_u8(v, SPACE), vcleq_u8(vsubq_u8(v, TAB), FOUR))
        }))
    }
}

#[inline(always)]
fn map_8x16x4<F>(v: uint8x16x4_t, mut f: F) -> uint8x16x4_t
where
    F: FnMut(uint8x16_t) -> uint8x16_t,
{
    uint8x16x4_t(f(v.0), f(v.1), f(v.2), f(v.3))
}

// computing movemask is significantly more expensive than on x86

#[inline(always)]
fn movemask_64(v: uint8x16x4_t) -> u64 {
    // https://stackoverflow.com/questions/74722950/convert-vector-compare-mask-into-bit-mask-in-aarch64-simd-or-arm-neon/74748402#74748402
    unsafe {
        let acc = vsriq_n_u8(vsriq_n_u8(v.3, v.2, 1), vsriq_n_u8(v.1, v.0, 1), 2);
        vget_lane_u64(
            vreinterpret_u64_u8(vshrn_n_u16(
                vreinterpretq_u16_u8(vsriq_n_u8(acc, acc, 4)),
                4,
            )),
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movemask_test() {
        let buf = *b">CGT>CGT>CG>CG>CGTACGTACGT>CGT>CGT>CGT>CGT>CGT>CGTACGTACGT>CGT>A";
        let res = unsafe {
            let v = vld4q_u8(buf.as_ptr());
            movemask_64(map_8x16x4(v, |v| vceqq_u8(v, transmute([b'>'; 16]))))
        };
        assert_eq!(
            0b0100010000000000010001000100010001000100000000000100100100010001,
            res
        );
    }
}
