use core::marker::PhantomData;

use super::{Pred, VectorUnit, Word, MAX_LANES};

/// Portable vector unit with `BITS`-wide registers.
///
/// `BITS` must be a power of two between 64 and 512 (inclusive); other
/// values are rejected at compile time when the unit is used.
#[derive(Clone, Copy, Debug)]
pub struct Portable<const BITS: usize>;

impl<const BITS: usize> Portable<BITS> {
    const VALID_WIDTH: () = assert!(
        BITS >= 64 && BITS <= 512 && BITS.is_power_of_two(),
        "portable register width must be a power of two in 64..=512");
}

// Register contents must fit in the MAX_LANES entries of `Reg`.
#[allow(dead_code)]
struct LaneFit<W, const BITS: usize>(PhantomData<W>);

impl<W: Word, const BITS: usize> LaneFit<W, BITS> {
    const OK: () = assert!(BITS / (W::BITS as usize) <= MAX_LANES,
        "too many lanes in a portable register");
}

// Apply `f` on all active lanes; inactive lanes are set to zero.
#[inline(always)]
fn map2<W: Word, F: Fn(W, W) -> W>(pg: Pred, n: usize,
    x: &[W; MAX_LANES], y: &[W; MAX_LANES], f: F) -> [W; MAX_LANES]
{
    let mut d = [W::default(); MAX_LANES];
    for k in 0..n {
        if pg.active(k) {
            d[k] = f(x[k], y[k]);
        }
    }
    d
}

impl<W: Word, const BITS: usize> VectorUnit<W> for Portable<BITS> {

    type Reg = [W; MAX_LANES];

    #[inline(always)]
    fn lanes() -> usize {
        let () = Self::VALID_WIDTH;
        let () = LaneFit::<W, BITS>::OK;
        BITS / (W::BITS as usize)
    }

    #[inline(always)]
    fn ld1(pg: Pred, src: &[W]) -> Self::Reg {
        let mut d = [W::default(); MAX_LANES];
        for k in 0..<Self as VectorUnit<W>>::lanes() {
            if pg.active(k) {
                d[k] = src[k];
            }
        }
        d
    }

    #[inline(always)]
    fn st1(pg: Pred, dst: &mut [W], v: Self::Reg) {
        for k in 0..<Self as VectorUnit<W>>::lanes() {
            if pg.active(k) {
                dst[k] = v[k];
            }
        }
    }

    #[inline(always)]
    fn lsl_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg {
        map2(pg, <Self as VectorUnit<W>>::lanes(), &x, &y, W::lsl)
    }

    #[inline(always)]
    fn lsr_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg {
        map2(pg, <Self as VectorUnit<W>>::lanes(), &x, &y, W::lsr)
    }

    #[inline(always)]
    fn add_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg {
        map2(pg, <Self as VectorUnit<W>>::lanes(), &x, &y, W::wrapping_add)
    }

    #[inline(always)]
    fn sub_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg {
        map2(pg, <Self as VectorUnit<W>>::lanes(), &x, &y, W::wrapping_sub)
    }

    #[inline(always)]
    fn max_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg {
        map2(pg, <Self as VectorUnit<W>>::lanes(), &x, &y,
            |a, b| if a < b { b } else { a })
    }

    #[inline(always)]
    fn cmplt(pg: Pred, x: Self::Reg, y: Self::Reg) -> Pred {
        let mut m = 0u64;
        for k in 0..<Self as VectorUnit<W>>::lanes() {
            m |= ((pg.active(k) && x[k] < y[k]) as u64) << k;
        }
        Pred::from_bits(m)
    }
}
