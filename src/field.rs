//! Finite field.
//!
//! This module exposes the Goldilocks field (integers modulo
//! p = 2^64 - 2^32 + 1) as type `GF64`, and the word-level Montgomery
//! functions on which it is built. The latter operate on bare `u64`
//! values in Montgomery representation (`x*2^64 mod p` for an integer
//! `x`); they are meant for code that keeps field elements as raw words,
//! e.g. in vector registers.

pub use crate::backend::GF64;
pub use crate::backend::w64::gf64::{P, mont_red, mont_mul, mont_square};
