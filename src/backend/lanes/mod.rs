// Vector units for lane-parallel word arithmetic.
//
// A vector unit processes a register of `lanes()` words of type W at a
// time, under a predicate which selects the active lanes. Loads leave
// inactive lanes at zero, stores leave the destination untouched for
// inactive lanes, and arithmetic uses zeroing predication (inactive
// result lanes are zero). This is the SVE model; the lane count is
// obtained with a call, as with SVE's CNTD, so that callers never bake
// it in.
//
// Available units:
//  - Portable<BITS>: a BITS-wide register emulated with plain integer
//    code; BITS must be a power of two between 64 and 512.
//  - Avx2: x86_64 with AVX2 enabled at compile time; four u64 lanes.
//  - Neon: aarch64; two u64 lanes.
//
// Each word type names its default unit (Word::Native). For u64, this is
// Avx2 or Neon when available, unless feature "portable_lanes" is set;
// in all other cases, Portable<NATIVE_BITS> is used.

pub mod portable;
pub use portable::Portable;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(feature = "portable_lanes")))]
pub mod avx2;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(feature = "portable_lanes")))]
pub use avx2::Avx2;

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    not(feature = "portable_lanes")))]
pub mod neon;

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    not(feature = "portable_lanes")))]
pub use neon::Neon;

/// Register width (in bits) of the portable unit used by default.
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub const NATIVE_BITS: usize = 256;

/// Register width (in bits) of the portable unit used by default.
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
pub const NATIVE_BITS: usize = 128;

#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx2",
    not(feature = "portable_lanes")))]
type NativeU64 = Avx2;

#[cfg(all(
    target_arch = "aarch64",
    target_feature = "neon",
    not(feature = "portable_lanes")))]
type NativeU64 = Neon;

#[cfg(not(any(
    all(
        target_arch = "x86_64",
        target_feature = "avx2",
        not(feature = "portable_lanes")),
    all(
        target_arch = "aarch64",
        target_feature = "neon",
        not(feature = "portable_lanes")))))]
type NativeU64 = Portable<NATIVE_BITS>;

/// Maximum number of lanes in a register, over all units and word types.
pub const MAX_LANES: usize = 32;

/// A lane predicate: bit k is set when lane k is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pred(u64);

impl Pred {

    /// The empty predicate (no active lane).
    pub const NONE: Self = Self(0);

    /// Predicate for the lanes of the register that starts at index `i`,
    /// in a buffer of length `n`, with `lanes` lanes per register: lane
    /// k is active if and only if `i + k < n`.
    #[inline(always)]
    pub fn whilelt(i: usize, n: usize, lanes: usize) -> Self {
        let k = core::cmp::min(n.saturating_sub(i), lanes);
        if k >= 64 {
            Self(!0)
        } else {
            Self((1u64 << k) - 1)
        }
    }

    #[inline(always)]
    pub(crate) const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if at least one lane is active.
    #[inline(always)]
    pub fn any(self) -> bool {
        self.0 != 0
    }

    /// Returns true if lane `k` is active.
    #[inline(always)]
    pub fn active(self, k: usize) -> bool {
        k < 64 && ((self.0 >> k) & 1) != 0
    }

    /// Number of active lanes.
    #[inline(always)]
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Store the lanes of `m` as Booleans into `dst`, for the lanes
    /// active in this predicate. Other entries of `dst` are untouched.
    #[inline]
    pub fn st1_flags(self, dst: &mut [bool], m: Pred) {
        for (k, d) in dst.iter_mut().enumerate().take(MAX_LANES) {
            if self.active(k) {
                *d = m.active(k);
            }
        }
    }
}

/// A vector unit operating on registers of words of type W.
pub trait VectorUnit<W: Word> {

    /// Register type.
    type Reg: Copy;

    /// Number of lanes in a register.
    fn lanes() -> usize;

    /// Load the active lanes from `src[k]`; inactive lanes are zero.
    /// `src` must contain at least as many words as the index of the
    /// highest active lane, plus one.
    fn ld1(pg: Pred, src: &[W]) -> Self::Reg;

    /// Store the active lanes into `dst[k]`.
    fn st1(pg: Pred, dst: &mut [W], v: Self::Reg);

    /// Lane-wise logical left shift of `x` by `y`.
    fn lsl_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg;

    /// Lane-wise logical right shift of `x` by `y`.
    fn lsr_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg;

    /// Lane-wise wrapping addition.
    fn add_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg;

    /// Lane-wise wrapping subtraction.
    fn sub_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg;

    /// Lane-wise unsigned maximum.
    fn max_z(pg: Pred, x: Self::Reg, y: Self::Reg) -> Self::Reg;

    /// Lane-wise unsigned comparison: the returned predicate has lane k
    /// set if lane k is active in `pg` and `x[k] < y[k]`.
    fn cmplt(pg: Pred, x: Self::Reg, y: Self::Reg) -> Pred;
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned machine word that can be processed by vector units.
///
/// This trait is sealed: it is implemented for `u16`, `u32` and `u64`
/// only, so that no register holds more than `MAX_LANES` words.
pub trait Word:
    sealed::Sealed + Copy + Default + PartialOrd + core::fmt::Debug
    + Send + Sync + 'static
{
    /// Size of the word, in bits.
    const BITS: u32;

    /// Default vector unit for this word type.
    type Native: VectorUnit<Self>;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Logical left shift; a shift count of `BITS` or more yields zero.
    fn lsl(self, count: Self) -> Self;

    /// Logical right shift; a shift count of `BITS` or more yields zero.
    fn lsr(self, count: Self) -> Self;
}

macro_rules! impl_word { ($t:ty, $native:ty) => {
    impl Word for $t {
        const BITS: u32 = <$t>::BITS;

        type Native = $native;

        #[inline(always)]
        fn wrapping_add(self, rhs: Self) -> Self {
            <$t>::wrapping_add(self, rhs)
        }

        #[inline(always)]
        fn wrapping_sub(self, rhs: Self) -> Self {
            <$t>::wrapping_sub(self, rhs)
        }

        #[inline(always)]
        fn lsl(self, count: Self) -> Self {
            if count < (<$t>::BITS as $t) {
                self << count
            } else {
                0
            }
        }

        #[inline(always)]
        fn lsr(self, count: Self) -> Self {
            if count < (<$t>::BITS as $t) {
                self >> count
            } else {
                0
            }
        }
    }
} }

impl_word!(u16, Portable<NATIVE_BITS>);
impl_word!(u32, Portable<NATIVE_BITS>);
impl_word!(u64, NativeU64);
