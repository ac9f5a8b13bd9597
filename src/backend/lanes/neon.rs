use core::arch::aarch64::*;

use super::{Pred, VectorUnit};

/// NEON vector unit: two u64 lanes in a 128-bit register.
///
/// Shifts use USHL, which only reads the low byte of each count, as a
/// signed value; counts of 64 or more are hardware-defined (they are
/// not reduced modulo 64).
#[derive(Clone, Copy, Debug)]
pub struct Neon;

#[inline(always)]
fn lane_mask(pg: Pred) -> uint64x2_t {
    let m = [
        (pg.active(0) as u64).wrapping_neg(),
        (pg.active(1) as u64).wrapping_neg(),
    ];
    unsafe { vld1q_u64(m.as_ptr()) }
}

impl VectorUnit<u64> for Neon {

    type Reg = uint64x2_t;

    #[inline(always)]
    fn lanes() -> usize {
        2
    }

    #[inline(always)]
    fn ld1(pg: Pred, src: &[u64]) -> uint64x2_t {
        let mut tmp = [0u64; 2];
        for k in 0..2 {
            if pg.active(k) {
                tmp[k] = src[k];
            }
        }
        unsafe { vld1q_u64(tmp.as_ptr()) }
    }

    #[inline(always)]
    fn st1(pg: Pred, dst: &mut [u64], v: uint64x2_t) {
        let mut tmp = [0u64; 2];
        unsafe { vst1q_u64(tmp.as_mut_ptr(), v) };
        for k in 0..2 {
            if pg.active(k) {
                dst[k] = tmp[k];
            }
        }
    }

    #[inline(always)]
    fn lsl_z(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> uint64x2_t {
        unsafe {
            let r = vshlq_u64(x, vreinterpretq_s64_u64(y));
            vandq_u64(r, lane_mask(pg))
        }
    }

    #[inline(always)]
    fn lsr_z(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> uint64x2_t {
        unsafe {
            let r = vshlq_u64(x, vnegq_s64(vreinterpretq_s64_u64(y)));
            vandq_u64(r, lane_mask(pg))
        }
    }

    #[inline(always)]
    fn add_z(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> uint64x2_t {
        unsafe { vandq_u64(vaddq_u64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn sub_z(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> uint64x2_t {
        unsafe { vandq_u64(vsubq_u64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn max_z(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> uint64x2_t {
        unsafe {
            let r = vbslq_u64(vcltq_u64(x, y), y, x);
            vandq_u64(r, lane_mask(pg))
        }
    }

    #[inline(always)]
    fn cmplt(pg: Pred, x: uint64x2_t, y: uint64x2_t) -> Pred {
        let (m0, m1) = unsafe {
            let c = vcltq_u64(x, y);
            (vgetq_lane_u64::<0>(c), vgetq_lane_u64::<1>(c))
        };
        Pred::from_bits(((m0 & 1) | ((m1 & 1) << 1)) & pg.bits())
    }
}
