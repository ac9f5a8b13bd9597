use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{addcarry_u64, subborrow_u64};
use crate::{CryptoRng, RngCore};

/// The field modulus: p = 2^64 - 2^32 + 1.
pub const P: u64 = 0xFFFFFFFF00000001;

// 2^64 mod p; this is also the Montgomery representation of 1.
const R: u64 = 0x00000000FFFFFFFF;

// 2^128 mod p.
const R2: u64 = 0xFFFFFFFE00000001;

/// Montgomery reduction (constant-time).
///
/// Given `x`, this returns `x/2^64 mod p`. If `x < p*2^64` (in particular,
/// if `x` is the product of two values lower than `p`), then the output
/// is lower than `p`. The function is total over all 128-bit inputs; for
/// larger inputs the output is still congruent to `x/2^64`, but may
/// exceed `p`.
///
/// All operations below wrap modulo 2^64. With `m = xl*(2^32 + 1) mod
/// 2^64` (which is `-xl/p mod 2^64`), the value `b` is the high word of
/// `m*p` and `x + m*p` is a multiple of 2^64; the final subtraction of
/// `0xFFFFFFFF` on borrow adds `p` back, since `2^64 = 2^32 - 1 mod p`.
#[inline(always)]
pub const fn mont_red(x: u128) -> u64 {
    let xl = x as u64;
    let xh = (x >> 64) as u64;
    let (a, e) = xl.overflowing_add(xl << 32);
    let b = a.wrapping_sub(a >> 32).wrapping_sub(e as u64);
    let (r, c) = xh.overflowing_sub(b);
    r.wrapping_sub(0u32.wrapping_sub(c as u32) as u64)
}

/// Montgomery multiplication: returns `a*b/2^64 mod p`.
#[inline(always)]
pub const fn mont_mul(a: u64, b: u64) -> u64 {
    mont_red((a as u128) * (b as u128))
}

/// Montgomery squaring: returns `a^2/2^64 mod p`.
#[inline(always)]
pub const fn mont_square(a: u64) -> u64 {
    mont_mul(a, a)
}

/// An element of the prime field of order p = 2^64 - 2^32 + 1.
///
/// The inner value is the Montgomery representation `x*2^64 mod p` of
/// the element `x`, always in the 0 to p-1 range.
#[derive(Clone, Copy, Debug)]
pub struct GF64(u64);

impl GF64 {

    // Modulus p.
    pub const MODULUS: u64 = P;

    // Element encoding length: 8 bytes.
    pub const ENC_LEN: usize = 8;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(R);
    pub const TWO: Self = Self::w64(2);
    pub const MINUS_ONE: Self = Self(P - R);

    // 2^64 and 2^128, as field elements (for conversions from signed
    // and 128-bit integers).
    const T64: Self = Self(R2);
    const T128: Self = Self(mont_mul(R2, R2));

    // Create an element from a 64-bit integer (implicitly reduced modulo
    // p). This function is meant to be used in constant expressions; it
    // is also safe to use at runtime.
    pub const fn w64(x: u64) -> Self {
        // x < 2^64 and R2 < p, hence the product is below p*2^64 and
        // the reduction output is canonical.
        Self(mont_mul(x, R2))
    }

    // Create an element by converting the provided integer (implicitly
    // reduced modulo the field order).
    #[inline(always)]
    pub fn from_u64(x: u64) -> Self {
        Self::w64(x)
    }

    // Create an element by converting the provided integer.
    #[inline(always)]
    pub fn from_u32(x: u32) -> Self {
        Self::w64(x as u64)
    }

    // Create an element by converting the provided integer (implicitly
    // reduced modulo the field order).
    #[inline(always)]
    pub fn from_i64(x: i64) -> Self {
        let mut r = Self::from_u64(x as u64);
        r.set_cond(&(r - Self::T64), (x >> 63) as u32);
        r
    }

    // Create an element by converting the provided integer.
    #[inline(always)]
    pub fn from_i32(x: i32) -> Self {
        Self::from_i64(x as i64)
    }

    // Create an element by converting the provided integer (implicitly
    // reduced modulo the field order).
    #[inline(always)]
    pub fn from_u128(x: u128) -> Self {
        let r = Self::from_u64((x >> 64) as u64);
        (r * Self::T64) + Self::from_u64(x as u64)
    }

    // Create an element by converting the provided integer (implicitly
    // reduced modulo the field order).
    #[inline(always)]
    pub fn from_i128(x: i128) -> Self {
        let mut r = Self::from_u128(x as u128);
        r.set_cond(&(r - Self::T128), (x >> 127) as u32);
        r
    }

    /// Create an element from its Montgomery representation. A word
    /// which is not lower than the modulus is reduced.
    #[inline(always)]
    pub fn from_montgomery(w: u64) -> Self {
        let (d, cc) = subborrow_u64(w, P, 0);
        let m = (cc as u64).wrapping_neg();
        Self(d ^ (m & (d ^ w)))
    }

    /// Get the Montgomery representation of this element (a word in the
    /// 0 to p-1 range).
    #[inline(always)]
    pub fn to_montgomery(self) -> u64 {
        self.0
    }

    /// Get the canonical integer value (0 to p-1) of this element.
    #[inline(always)]
    pub fn to_u64(self) -> u64 {
        mont_red(self.0 as u128)
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        // The sum is less than 2*p; subtract p unless this yields
        // a borrow from the 65-bit sum.
        let (d0, cc) = addcarry_u64(self.0, rhs.0, 0);
        let (e0, bb) = subborrow_u64(d0, P, 0);
        let (_, bb) = subborrow_u64(cc as u64, 0, bb);
        let m = (bb as u64).wrapping_neg();
        self.0 = e0 ^ (m & (d0 ^ e0));
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        let (d, cc) = subborrow_u64(self.0, rhs.0, 0);
        let m = (cc as u64).wrapping_neg();
        self.0 = d.wrapping_add(m & P);
    }

    // Negate this element.
    #[inline]
    pub fn set_neg(&mut self) {
        let (d, cc) = subborrow_u64(0, self.0, 0);
        let m = (cc as u64).wrapping_neg();
        self.0 = d.wrapping_add(m & P);
    }

    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        self.0 ^= cw & (self.0 ^ a.0);
    }

    #[inline]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = ((ctl as i32) as i64) as u64;
        let t = cw & (a.0 ^ b.0);
        a.0 ^= t;
        b.0 ^= t;
    }

    #[inline(always)]
    fn set_mul(&mut self, rhs: &Self) {
        self.0 = mont_mul(self.0, rhs.0);
    }

    #[inline(always)]
    pub fn set_square(&mut self) {
        self.0 = mont_square(self.0);
    }

    /// Compute the square of this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Square this value `n` times (in place).
    #[inline(always)]
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Square this value `n` times.
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Halve this value.
    #[inline]
    pub fn set_half(&mut self) {
        let m = (self.0 & 1).wrapping_neg();
        let (d, cc) = addcarry_u64(self.0, m & P, 0);
        self.0 = (d >> 1) | ((cc as u64) << 63);
    }

    #[inline(always)]
    pub fn half(self) -> Self {
        let mut r = self;
        r.set_half();
        r
    }

    #[inline(always)]
    pub fn set_mul2(&mut self) {
        let r = *self;
        self.set_add(&r);
    }

    #[inline(always)]
    pub fn mul2(self) -> Self {
        let mut r = self;
        r.set_mul2();
        r
    }

    // Invert this element: x^(p-2). Zero is "inverted" into zero.
    //
    // p - 2 = 2^64 - 2^32 - 1 = (2^31 - 1)*2^33 + (2^32 - 1). Each xk
    // below is x^(2^k - 1); the sequence uses 64 squarings and 9
    // multiplications, independently of the value.
    pub fn set_invert(&mut self) {
        let x = *self;
        let x2 = x.square() * x;
        let x3 = x2.square() * x;
        let x6 = x3.xsquare(3) * x3;
        let x12 = x6.xsquare(6) * x6;
        let x24 = x12.xsquare(12) * x12;
        let x30 = x24.xsquare(6) * x6;
        let x31 = x30.square() * x;
        let x32 = x31.square() * x;
        *self = x31.xsquare(33) * x32;
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    #[inline(always)]
    fn set_div(&mut self, rhs: &Self) {
        self.set_mul(&rhs.invert());
    }

    // Perform a batch inversion of some elements. All elements of the
    // slice are replaced with their respective inverses (elements of
    // value zero are kept unchanged).
    pub fn batch_invert(xx: &mut [Self]) {
        // Montgomery's trick:
        //   1/u = v*(1/(u*v))
        //   1/v = u*(1/(u*v))
        // Sub-batches have a fixed size so that we may use stack
        // allocation.
        const SUBLEN: usize = 200;

        let n = xx.len();
        let mut i = 0;
        while i < n {
            let blen = if (n - i) > SUBLEN { SUBLEN } else { n - i };
            let mut tt = [Self::ZERO; SUBLEN];
            tt[0] = xx[i];
            let zz0 = tt[0].iszero();
            tt[0].set_cond(&Self::ONE, zz0);
            for j in 1..blen {
                tt[j] = xx[i + j];
                tt[j].set_cond(&Self::ONE, tt[j].iszero());
                tt[j] *= tt[j - 1];
            }
            let mut k = tt[blen - 1].invert();
            for j in (1..blen).rev() {
                let mut x = xx[i + j];
                let zz = x.iszero();
                x.set_cond(&Self::ONE, zz);
                xx[i + j].set_cond(&(k * tt[j - 1]), !zz);
                k *= x;
            }
            xx[i].set_cond(&k, !zz0);
            i += blen;
        }
    }

    // Equality check (constant-time): returned value is 0xFFFFFFFF on
    // equality, 0 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let r = self.0 ^ rhs.0;
        ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
    }

    // Compare this value with zero (constant-time): returned value
    // is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let r = self.0;
        ((r | r.wrapping_neg()) >> 63).wrapping_sub(1) as u32
    }

    // Encode this value into 8 bytes (unsigned little-endian encoding
    // of the canonical value, in the 0 to p-1 range).
    #[inline]
    pub fn encode(self) -> [u8; Self::ENC_LEN] {
        self.to_u64().to_le_bytes()
    }

    // Decode up to 8 bytes (unsigned little-endian) into an integer,
    // without reduction. Missing high bytes are zeros.
    #[inline]
    fn decode_raw(buf: &[u8]) -> u64 {
        let k = core::cmp::min(buf.len(), 8);
        let mut tmp = [0u8; 8];
        tmp[..k].copy_from_slice(&buf[..k]);
        u64::from_le_bytes(tmp)
    }

    // Decode a value from bytes. If the provided slice has length
    // exactly 8 bytes, _and_ its unsigned little-endian interpretation
    // is an integer in the 0 to p-1 range, then this value is set to
    // that integer, and 0xFFFFFFFF is returned. Otherwise, this value
    // is set to zero, and 0x00000000 is returned.
    #[inline]
    pub fn set_decode_ct(&mut self, buf: &[u8]) -> u32 {
        if buf.len() != Self::ENC_LEN {
            // The length of the input slice is not secret.
            *self = Self::ZERO;
            return 0;
        }
        let x = Self::decode_raw(buf);

        // Subtracting the modulus must yield a borrow; otherwise, this
        // is a non-canonical input.
        let (_, cc) = subborrow_u64(x, P, 0);
        let r = (cc as u32).wrapping_neg();
        let x = x & (((r as i32) as i64) as u64);
        self.0 = mont_mul(x, R2);
        r
    }

    #[inline(always)]
    pub fn decode_ct(buf: &[u8]) -> (Self, u32) {
        let mut x = Self::ZERO;
        let r = x.set_decode_ct(buf);
        (x, r)
    }

    // Decode a value from bytes; `None` is returned on a wrong length
    // or a non-canonical value. Side-channel analysis may reveal to
    // outsiders whether the decoding succeeded or not.
    #[inline(always)]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let (x, r) = Self::decode_ct(buf);
        if r != 0 {
            Some(x)
        } else {
            None
        }
    }

    // Decode a value from bytes. The source bytes are interpreted as
    // the unsigned little-endian representation of an integer, which
    // is then reduced modulo p. This function cannot fail.
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        let n = buf.len();
        if n == 0 {
            *self = Self::ZERO;
            return;
        }

        // Chunks of 8 bytes are processed in high-to-low order. For
        // each chunk, the raw chunk value is added to the current value
        // (in Montgomery representation), then the sum is multiplied by
        // 2^64 (Montgomery multiplication by R2). The reduction accepts
        // any 64-bit input, so the sum only needs p subtracted on carry.
        let mut j = n - (n % 8);
        if j == n {
            j -= 8;
        }
        self.0 = mont_mul(Self::decode_raw(&buf[j..]), R2);

        while j >= 8 {
            j -= 8;
            let x = Self::decode_raw(&buf[j..]);
            let (d, cc) = addcarry_u64(self.0, x, 0);
            let m = (cc as u64).wrapping_neg();
            let (d, _) = subborrow_u64(d, m & P, 0);
            self.0 = mont_mul(d, R2);
        }
    }

    #[inline(always)]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut r = Self::ZERO;
        r.set_decode_reduce(buf);
        r
    }

    /// Get a random element, (almost) uniformly distributed: 128 bits
    /// from the provided source are reduced modulo p.
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut tmp = [0u8; 16];
        rng.fill_bytes(&mut tmp);
        Self::decode_reduce(&tmp)
    }
}

// ========================================================================
// Operator traits, for values and references.

macro_rules! gf64_binop {
    ($tr:ident, $f:ident, $tra:ident, $fa:ident, $set:ident) => {
        impl $tr<GF64> for GF64 {
            type Output = GF64;

            #[inline(always)]
            fn $f(self, other: GF64) -> GF64 {
                let mut r = self;
                r.$set(&other);
                r
            }
        }

        impl $tr<&GF64> for GF64 {
            type Output = GF64;

            #[inline(always)]
            fn $f(self, other: &GF64) -> GF64 {
                let mut r = self;
                r.$set(other);
                r
            }
        }

        impl $tr<GF64> for &GF64 {
            type Output = GF64;

            #[inline(always)]
            fn $f(self, other: GF64) -> GF64 {
                let mut r = *self;
                r.$set(&other);
                r
            }
        }

        impl $tr<&GF64> for &GF64 {
            type Output = GF64;

            #[inline(always)]
            fn $f(self, other: &GF64) -> GF64 {
                let mut r = *self;
                r.$set(other);
                r
            }
        }

        impl $tra<GF64> for GF64 {
            #[inline(always)]
            fn $fa(&mut self, other: GF64) {
                self.$set(&other);
            }
        }

        impl $tra<&GF64> for GF64 {
            #[inline(always)]
            fn $fa(&mut self, other: &GF64) {
                self.$set(other);
            }
        }
    };
}

gf64_binop!(Add, add, AddAssign, add_assign, set_add);
gf64_binop!(Sub, sub, SubAssign, sub_assign, set_sub);
gf64_binop!(Mul, mul, MulAssign, mul_assign, set_mul);
gf64_binop!(Div, div, DivAssign, div_assign, set_div);

impl Neg for GF64 {
    type Output = GF64;

    #[inline(always)]
    fn neg(self) -> GF64 {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &GF64 {
    type Output = GF64;

    #[inline(always)]
    fn neg(self) -> GF64 {
        let mut r = *self;
        r.set_neg();
        r
    }
}

// ========================================================================
