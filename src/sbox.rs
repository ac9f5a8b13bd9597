//! Power-map S-boxes over a state of GF64 elements.
//!
//! The nonlinear layer of the permutation raises every state element to
//! the power `ALPHA = 7` (`apply_sbox()`), or to the inverse power
//! `INV_ALPHA = 1/7 mod (p - 1)` (`apply_inv_sbox()`). Since 7 is prime
//! to `p - 1`, both maps are permutations of the field, and each is the
//! inverse of the other.
//!
//! The inverse map is computed with a fixed addition chain (72
//! multiplications per element) in which all lanes advance together;
//! `exp_acc()` is the chain's building block. Nothing here depends on
//! the element values: the sequence of operations is the same for all
//! inputs, and the field operations themselves are constant-time.
//!
//! The functions are generic over the state length; the permutation
//! state uses `STATE_WIDTH` elements (`State`).

use crate::field::GF64;

/// Number of field elements in the permutation state.
pub const STATE_WIDTH: usize = 12;

/// A full permutation state.
pub type State = [GF64; STATE_WIDTH];

/// Exponent of the forward S-box.
pub const ALPHA: u64 = 7;

/// Exponent of the inverse S-box: `ALPHA * INV_ALPHA = 1 mod (p - 1)`.
///
/// In binary: `1001001001001001001001001001000110110110110110110110110110110111`.
pub const INV_ALPHA: u64 = 10540996611094048183;

/// Square every lane of `base` `m` times, then multiply each lane by
/// the corresponding lane of `tail`.
///
/// Both arrays are taken by value, so `tail` may be a copy of `base` (or
/// of any earlier chain value). With `m = 0` this is a lane-wise product.
#[inline(always)]
pub fn exp_acc<const N: usize>(base: [GF64; N], tail: [GF64; N], m: u32)
    -> [GF64; N]
{
    let mut result = base;
    for _ in 0..m {
        result.iter_mut().for_each(|r| r.set_square());
    }
    result.iter_mut().zip(tail.iter()).for_each(|(r, t)| *r *= t);
    result
}

/// Apply the forward S-box (`x -> x^7`) to every element of the state.
#[inline]
pub fn apply_sbox<const N: usize>(state: &mut [GF64; N]) {
    for s in state.iter_mut() {
        let x2 = s.square();
        let x4 = x2.square();
        *s = x4 * x2 * *s;
    }
}

/// Apply the inverse S-box (`x -> x^INV_ALPHA`) to every element of
/// the state.
pub fn apply_inv_sbox<const N: usize>(state: &mut [GF64; N]) {
    // base^10
    let mut t1 = *state;
    t1.iter_mut().for_each(|t| t.set_square());

    // base^100
    let mut t2 = t1;
    t2.iter_mut().for_each(|t| t.set_square());

    // base^100100
    let t3 = exp_acc(t2, t2, 3);

    // base^100100100100
    let t4 = exp_acc(t3, t3, 6);

    // base^100100100100100100100100
    let t5 = exp_acc(t4, t4, 12);

    // base^100100100100100100100100100100
    let t6 = exp_acc(t5, t3, 6);

    // base^1001001001001001001001001001000100100100100100100100100100100
    let t7 = exp_acc(t6, t6, 31);

    // base^1001001001001001001001001001000110110110110110110110110110110111
    for (i, s) in state.iter_mut().enumerate() {
        let a = (t7[i].square() * t6[i]).square().square();
        let b = t1[i] * t2[i] * *s;
        *s = a * b;
    }
}

/// Apply the inverse S-box to a state given as raw Montgomery words.
///
/// Words which are not lower than the modulus are reduced first; output
/// words are always lower than the modulus.
pub fn apply_inv_sbox_words<const N: usize>(state: &mut [u64; N]) {
    let mut t = [GF64::ZERO; N];
    for (t, w) in t.iter_mut().zip(state.iter()) {
        *t = GF64::from_montgomery(*w);
    }
    apply_inv_sbox(&mut t);
    for (w, t) in state.iter_mut().zip(t.iter()) {
        *w = t.to_montgomery();
    }
}

#[cfg(test)]
mod tests {

    use super::{
        apply_inv_sbox, apply_inv_sbox_words, apply_sbox, exp_acc, State,
        ALPHA, INV_ALPHA, STATE_WIDTH,
    };
    use crate::field::GF64;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha512, Digest};

    fn big(x: GF64) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.encode())
    }

    fn mkstate(bx: u64) -> State {
        let mut s = [GF64::ZERO; STATE_WIDTH];
        for i in 0..STATE_WIDTH {
            let mut sh = Sha512::new();
            sh.update(bx.to_le_bytes());
            sh.update((i as u64).to_le_bytes());
            s[i] = GF64::decode_reduce(&sh.finalize()[..16]);
        }
        s
    }

    fn same(a: &[GF64], b: &[GF64]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b.iter()).all(|(x, y)| x.equals(*y) == 0xFFFFFFFF)
    }

    #[test]
    fn exponents() {
        let pm1 = (GF64::MODULUS - 1) as u128;
        assert!(((ALPHA as u128) * (INV_ALPHA as u128)) % pm1 == 1);
        assert!(INV_ALPHA
            == 0b1001001001001001001001001001000110110110110110110110110110110111);
    }

    #[test]
    fn exp_acc_zero_squarings() {
        let a = mkstate(1);
        let b = mkstate(2);
        let c = exp_acc(a, b, 0);
        for i in 0..STATE_WIDTH {
            assert!(c[i].equals(a[i] * b[i]) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn exp_acc_lanes() {
        let zp = BigInt::from(GF64::MODULUS);
        let a = mkstate(3);
        let b = mkstate(4);
        for &m in [1u32, 3, 6, 12, 31].iter() {
            let c = exp_acc(a, b, m);
            let e = BigInt::from(1u8) << m;
            for i in 0..STATE_WIDTH {
                let zc = (big(a[i]).modpow(&e, &zp) * big(b[i])) % &zp;
                assert!(big(c[i]) == zc);
            }

            // Self-tail: x^(2^m + 1).
            let d = exp_acc(a, a, m);
            for i in 0..STATE_WIDTH {
                let zd = big(a[i]).modpow(&(&e + 1u32), &zp);
                assert!(big(d[i]) == zd);
            }
        }
    }

    #[test]
    fn inv_sbox_exponent() {
        let zp = BigInt::from(GF64::MODULUS);
        let ze = BigInt::from(INV_ALPHA);
        for k in 0..20 {
            let s = mkstate(100 + k);
            let mut t = s;
            apply_inv_sbox(&mut t);
            for i in 0..STATE_WIDTH {
                assert!(big(t[i]) == big(s[i]).modpow(&ze, &zp));
            }
        }
    }

    #[test]
    fn sbox_exponent() {
        let zp = BigInt::from(GF64::MODULUS);
        let ze = BigInt::from(ALPHA);
        let s = mkstate(7);
        let mut t = s;
        apply_sbox(&mut t);
        for i in 0..STATE_WIDTH {
            assert!(big(t[i]) == big(s[i]).modpow(&ze, &zp));
        }
    }

    #[test]
    fn round_trip() {
        for k in 0..50 {
            let s = mkstate(200 + k);

            let mut t = s;
            apply_inv_sbox(&mut t);
            apply_sbox(&mut t);
            assert!(same(&t, &s));

            let mut t = s;
            apply_sbox(&mut t);
            apply_inv_sbox(&mut t);
            assert!(same(&t, &s));
        }
    }

    #[test]
    fn inv_sbox_twice() {
        // x^(INV_ALPHA^2) is not the identity map.
        let s = mkstate(300);
        let mut t = s;
        apply_inv_sbox(&mut t);
        apply_inv_sbox(&mut t);
        assert!(!same(&t, &s));
    }

    #[test]
    fn fixed_points() {
        let mut s = [GF64::ZERO; STATE_WIDTH];
        s[1] = GF64::ONE;
        s[2] = GF64::MINUS_ONE;
        let mut t = s;
        apply_inv_sbox(&mut t);
        assert!(same(&t, &s));
        apply_sbox(&mut t);
        assert!(same(&t, &s));
    }

    #[test]
    fn other_widths() {
        let s = mkstate(400);
        let mut one = [s[0]];
        apply_inv_sbox(&mut one);
        let mut full = s;
        apply_inv_sbox(&mut full);
        assert!(one[0].equals(full[0]) == 0xFFFFFFFF);

        let mut empty: [GF64; 0] = [];
        apply_inv_sbox(&mut empty);
        apply_sbox(&mut empty);
    }

    #[test]
    fn raw_words() {
        let s = mkstate(500);
        let mut w = [0u64; STATE_WIDTH];
        for i in 0..STATE_WIDTH {
            w[i] = s[i].to_montgomery();
        }
        apply_inv_sbox_words(&mut w);
        let mut t = s;
        apply_inv_sbox(&mut t);
        for i in 0..STATE_WIDTH {
            assert!(w[i] == t[i].to_montgomery());
            assert!(w[i] < GF64::MODULUS);
        }
    }
}
