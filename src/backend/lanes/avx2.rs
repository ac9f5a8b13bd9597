use core::arch::x86_64::*;

use super::{Pred, VectorUnit};

/// AVX2 vector unit: four u64 lanes in a 256-bit register.
///
/// Shift counts of 64 or more yield zero (VPSLLVQ / VPSRLVQ semantics).
#[derive(Clone, Copy, Debug)]
pub struct Avx2;

// Expand the first four lanes of a predicate into a lane mask.
#[inline(always)]
fn lane_mask(pg: Pred) -> __m256i {
    let m = |k: usize| -> i64 { -((pg.active(k)) as i64) };
    unsafe { _mm256_set_epi64x(m(3), m(2), m(1), m(0)) }
}

// Unsigned x < y, as an all-ones / all-zeros lane mask. AVX2 only has a
// signed comparison; flipping the top bit of both operands maps the
// unsigned order onto the signed order.
#[inline(always)]
fn lt_mask(x: __m256i, y: __m256i) -> __m256i {
    unsafe {
        let s = _mm256_set1_epi64x(i64::MIN);
        _mm256_cmpgt_epi64(_mm256_xor_si256(y, s), _mm256_xor_si256(x, s))
    }
}

impl VectorUnit<u64> for Avx2 {

    type Reg = __m256i;

    #[inline(always)]
    fn lanes() -> usize {
        4
    }

    #[inline(always)]
    fn ld1(pg: Pred, src: &[u64]) -> __m256i {
        let mut tmp = [0u64; 4];
        for k in 0..4 {
            if pg.active(k) {
                tmp[k] = src[k];
            }
        }
        unsafe { _mm256_loadu_si256(tmp.as_ptr() as *const __m256i) }
    }

    #[inline(always)]
    fn st1(pg: Pred, dst: &mut [u64], v: __m256i) {
        let mut tmp = [0u64; 4];
        unsafe { _mm256_storeu_si256(tmp.as_mut_ptr() as *mut __m256i, v) };
        for k in 0..4 {
            if pg.active(k) {
                dst[k] = tmp[k];
            }
        }
    }

    #[inline(always)]
    fn lsl_z(pg: Pred, x: __m256i, y: __m256i) -> __m256i {
        unsafe { _mm256_and_si256(_mm256_sllv_epi64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn lsr_z(pg: Pred, x: __m256i, y: __m256i) -> __m256i {
        unsafe { _mm256_and_si256(_mm256_srlv_epi64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn add_z(pg: Pred, x: __m256i, y: __m256i) -> __m256i {
        unsafe { _mm256_and_si256(_mm256_add_epi64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn sub_z(pg: Pred, x: __m256i, y: __m256i) -> __m256i {
        unsafe { _mm256_and_si256(_mm256_sub_epi64(x, y), lane_mask(pg)) }
    }

    #[inline(always)]
    fn max_z(pg: Pred, x: __m256i, y: __m256i) -> __m256i {
        unsafe {
            let r = _mm256_blendv_epi8(x, y, lt_mask(x, y));
            _mm256_and_si256(r, lane_mask(pg))
        }
    }

    #[inline(always)]
    fn cmplt(pg: Pred, x: __m256i, y: __m256i) -> Pred {
        let m = unsafe {
            _mm256_movemask_pd(_mm256_castsi256_pd(lt_mask(x, y)))
        };
        Pred::from_bits((m as u64) & pg.bits() & 0xF)
    }
}
