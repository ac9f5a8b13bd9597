//! Lane-parallel word arithmetic with overflow indicators.
//!
//! The operations in this module apply an element-wise function over
//! buffers of unsigned words (`u16`, `u32` or `u64`), using a vector unit
//! that processes `lanes()` words at a time. The buffer is swept in
//! registers; each register is handled under a predicate that marks
//! which of its lanes lie inside the buffer, so the final partial
//! register needs no special case, and a buffer of any length
//! (including zero) is accepted:
//!
//! ```text
//! i = 0
//! pg = whilelt(i, n)
//! while any(pg):
//!     process register at i under pg
//!     i += lanes
//!     pg = whilelt(i, n)
//! ```
//!
//! Four operations are provided:
//!
//!  - `shift_left()` and `shift_right()`: lane-wise logical shifts. A
//!    shift count of at least the word size is backend-defined: the
//!    portable and AVX2 units yield zero, while NEON uses the low byte
//!    of the count as a signed amount. Callers that need a specific
//!    behaviour for such counts must not rely on either.
//!
//!  - `add()`: wrapping addition, and an overflow flag per lane, set
//!    exactly when the true sum does not fit in a word (the wrapped
//!    result is then lower than the larger operand).
//!
//!  - `subtract()`: wrapping subtraction, and an underflow flag per
//!    lane, set exactly when `x < y`.
//!
//! Flags are data, not errors: they report where a carry or borrow
//! must be propagated by a multi-word computation.
//!
//! The free functions work on fixed-size arrays with the word type's
//! default unit (`Word::Native`), so that length mismatches are caught
//! by the type system. The methods of `Lanes<U>` work on slices with an
//! explicit unit `U`, and report length mismatches as `Error` values
//! (nothing is written in that case).

use core::marker::PhantomData;

pub use crate::backend::lanes::{Portable, Pred, VectorUnit, Word, MAX_LANES, NATIVE_BITS};

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(feature = "portable_lanes")))]
pub use crate::backend::lanes::Avx2;

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    not(feature = "portable_lanes")))]
pub use crate::backend::lanes::Neon;

/// Errors reported by the slice operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("argument {arg} has length {actual}, expected {expected}")]
    LengthMismatch { arg: &'static str, expected: usize, actual: usize },
}

fn check_len(arg: &'static str, expected: usize, actual: usize)
    -> Result<(), Error>
{
    if expected != actual {
        tracing::debug!(arg, expected, actual, "rejected lane buffer");
        return Err(Error::LengthMismatch { arg, expected, actual });
    }
    Ok(())
}

// Run `body` on each register of a buffer of length `n`; `body` gets
// the register start index and its predicate.
#[inline(always)]
fn sweep<W, U, F>(n: usize, mut body: F)
where
    W: Word,
    U: VectorUnit<W>,
    F: FnMut(usize, Pred),
{
    let vl = U::lanes();
    tracing::trace!(len = n, lanes = vl, "lane sweep");
    let mut i = 0;
    let mut pg = Pred::whilelt(i, n, vl);
    while pg.any() {
        body(i, pg);
        i += vl;
        pg = Pred::whilelt(i, n, vl);
    }
}

/// Lane-parallel operations with the vector unit `U`.
#[derive(Clone, Copy, Debug)]
pub struct Lanes<U>(PhantomData<U>);

impl<U> Lanes<U> {

    /// Number of words processed per register for word type `W`.
    #[inline(always)]
    pub fn lanes<W: Word>() -> usize
    where
        U: VectorUnit<W>,
    {
        U::lanes()
    }

    /// `out[i] = x[i] << y[i]` for all `i`.
    pub fn shift_left<W: Word>(x: &[W], y: &[W], out: &mut [W])
        -> Result<(), Error>
    where
        U: VectorUnit<W>,
    {
        check_len("y", x.len(), y.len())?;
        check_len("out", x.len(), out.len())?;
        Self::shift_left_inner(x, y, out);
        Ok(())
    }

    /// `out[i] = x[i] >> y[i]` for all `i`.
    pub fn shift_right<W: Word>(x: &[W], y: &[W], out: &mut [W])
        -> Result<(), Error>
    where
        U: VectorUnit<W>,
    {
        check_len("y", x.len(), y.len())?;
        check_len("out", x.len(), out.len())?;
        Self::shift_right_inner(x, y, out);
        Ok(())
    }

    /// `out[i] = x[i] + y[i]` (wrapping); `overflowed[i]` is set when
    /// the sum wrapped.
    pub fn add<W: Word>(x: &[W], y: &[W], out: &mut [W],
        overflowed: &mut [bool]) -> Result<(), Error>
    where
        U: VectorUnit<W>,
    {
        check_len("y", x.len(), y.len())?;
        check_len("out", x.len(), out.len())?;
        check_len("overflowed", x.len(), overflowed.len())?;
        Self::add_inner(x, y, out, overflowed);
        Ok(())
    }

    /// `out[i] = x[i] - y[i]` (wrapping); `underflowed[i]` is set when
    /// `x[i] < y[i]`.
    pub fn subtract<W: Word>(x: &[W], y: &[W], out: &mut [W],
        underflowed: &mut [bool]) -> Result<(), Error>
    where
        U: VectorUnit<W>,
    {
        check_len("y", x.len(), y.len())?;
        check_len("out", x.len(), out.len())?;
        check_len("underflowed", x.len(), underflowed.len())?;
        Self::subtract_inner(x, y, out, underflowed);
        Ok(())
    }

    // The inner functions assume that all lengths match.

    #[inline(always)]
    fn shift_left_inner<W: Word>(x: &[W], y: &[W], out: &mut [W])
    where
        U: VectorUnit<W>,
    {
        sweep::<W, U, _>(x.len(), |i, pg| {
            let xv = U::ld1(pg, &x[i..]);
            let yv = U::ld1(pg, &y[i..]);
            U::st1(pg, &mut out[i..], U::lsl_z(pg, xv, yv));
        });
    }

    #[inline(always)]
    fn shift_right_inner<W: Word>(x: &[W], y: &[W], out: &mut [W])
    where
        U: VectorUnit<W>,
    {
        sweep::<W, U, _>(x.len(), |i, pg| {
            let xv = U::ld1(pg, &x[i..]);
            let yv = U::ld1(pg, &y[i..]);
            U::st1(pg, &mut out[i..], U::lsr_z(pg, xv, yv));
        });
    }

    #[inline(always)]
    fn add_inner<W: Word>(x: &[W], y: &[W], out: &mut [W],
        overflowed: &mut [bool])
    where
        U: VectorUnit<W>,
    {
        sweep::<W, U, _>(x.len(), |i, pg| {
            let xv = U::ld1(pg, &x[i..]);
            let yv = U::ld1(pg, &y[i..]);
            let r = U::add_z(pg, xv, yv);
            U::st1(pg, &mut out[i..], r);

            // The sum wrapped if and only if it is lower than the
            // larger operand.
            let m = U::cmplt(pg, r, U::max_z(pg, xv, yv));
            pg.st1_flags(&mut overflowed[i..], m);
        });
    }

    #[inline(always)]
    fn subtract_inner<W: Word>(x: &[W], y: &[W], out: &mut [W],
        underflowed: &mut [bool])
    where
        U: VectorUnit<W>,
    {
        sweep::<W, U, _>(x.len(), |i, pg| {
            let xv = U::ld1(pg, &x[i..]);
            let yv = U::ld1(pg, &y[i..]);
            U::st1(pg, &mut out[i..], U::sub_z(pg, xv, yv));
            pg.st1_flags(&mut underflowed[i..], U::cmplt(pg, xv, yv));
        });
    }
}

/// Lane-wise `x << y`, with the default unit for `W`.
pub fn shift_left<W: Word, const N: usize>(x: &[W; N], y: &[W; N]) -> [W; N] {
    let mut r = [W::default(); N];
    Lanes::<W::Native>::shift_left_inner(x, y, &mut r);
    r
}

/// Lane-wise `x >> y`, with the default unit for `W`.
pub fn shift_right<W: Word, const N: usize>(x: &[W; N], y: &[W; N]) -> [W; N] {
    let mut r = [W::default(); N];
    Lanes::<W::Native>::shift_right_inner(x, y, &mut r);
    r
}

/// Lane-wise wrapping `x + y` and overflow flags, with the default unit
/// for `W`.
pub fn add<W: Word, const N: usize>(x: &[W; N], y: &[W; N])
    -> ([W; N], [bool; N])
{
    let mut r = [W::default(); N];
    let mut f = [false; N];
    Lanes::<W::Native>::add_inner(x, y, &mut r, &mut f);
    (r, f)
}

/// Lane-wise wrapping `x - y` and underflow flags, with the default
/// unit for `W`.
pub fn subtract<W: Word, const N: usize>(x: &[W; N], y: &[W; N])
    -> ([W; N], [bool; N])
{
    let mut r = [W::default(); N];
    let mut f = [false; N];
    Lanes::<W::Native>::subtract_inner(x, y, &mut r, &mut f);
    (r, f)
}

/// Slice form of `shift_left()`, with the default unit for `W`.
pub fn shift_left_into<W: Word>(x: &[W], y: &[W], out: &mut [W])
    -> Result<(), Error>
{
    Lanes::<W::Native>::shift_left(x, y, out)
}

/// Slice form of `shift_right()`, with the default unit for `W`.
pub fn shift_right_into<W: Word>(x: &[W], y: &[W], out: &mut [W])
    -> Result<(), Error>
{
    Lanes::<W::Native>::shift_right(x, y, out)
}

/// Slice form of `add()`, with the default unit for `W`.
pub fn add_into<W: Word>(x: &[W], y: &[W], out: &mut [W],
    overflowed: &mut [bool]) -> Result<(), Error>
{
    Lanes::<W::Native>::add(x, y, out, overflowed)
}

/// Slice form of `subtract()`, with the default unit for `W`.
pub fn subtract_into<W: Word>(x: &[W], y: &[W], out: &mut [W],
    underflowed: &mut [bool]) -> Result<(), Error>
{
    Lanes::<W::Native>::subtract(x, y, out, underflowed)
}
