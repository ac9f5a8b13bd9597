//! Architecture-specific implementations.
//!
//! This module provides the structure that implements the Goldilocks
//! field, and the vector units used by the lane-parallel operations.
//!
//! The field type `GF64` has the following properties:
//!
//!  - An instance encapsulates a field element, in Montgomery
//!    representation, always fully reduced.
//!
//!  - The constant values `Self::ZERO`, `Self::ONE`, `Self::TWO` and
//!    `Self::MINUS_ONE` contain the elements of value 0, 1, 2 and -1,
//!    respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, `/`, and the compound assignments `+=`, `-=`, `*=` and `/=`).
//!    Division by zero is tolerated, and yields zero (regardless of the
//!    dividend). Operators can use both the raw types, and references
//!    thereof.
//!
//!  - Function `set_square(&mut self)` squares a field element (in place).
//!    Corresponding function `square(self) -> Self` returns the result
//!    as a new instance. Sequences of multiple squarings can be performed
//!    with `set_xsquare(&mut self, n: u32)` (and a corresponding
//!    `xsquare()` to get the result as a new instance).
//!
//!  - Function `set_neg(&mut self)` negates the instance on which it is
//!    applied.
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` sets
//!    the instance to the value of the other instance `a` if `ctl` is
//!    equal to 0xFFFFFFFF, or leaves the instance value unmodified if
//!    `ctl` is equal to 0x00000000.
//!
//!  - Function `select(a0: &Self, a1: &Self, ctl: u32) -> Self` returns
//!    a copy of `a0` if `ctl` is 0x00000000, or a copy of `a1` if
//!    `ctl` is 0xFFFFFFFF.
//!
//!  - Function `cswap(a: &mut Self, b: &mut Self, ctl: u32)`
//!    exchanges the contents of `a` and `b` if `ctl` is 0xFFFFFFFF,
//!    or leaves them unmodified if `ctl` is 0x00000000.
//!
//!  - Functions `set_half()` and `set_mul2()` multiply their operand (in
//!    place) by 1/2 and 2, respectively; `half()` and `mul2()` return
//!    a new instance.
//!
//!  - Constant values can be defined with the const-qualified `w64()`
//!    function. Conversions from `i32`, `u32`, `i64`, `u64`, `i128` and
//!    `u128` use the functions `from_i32()`, `from_u32()`, and so on;
//!    the value is reduced modulo p. The Montgomery representation is
//!    read and written with `from_montgomery()` and `to_montgomery()`;
//!    `to_u64()` returns the integer value (in the 0 to p-1 range).
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF
//!    if `self` and `rhs` represent the same value, or 0x00000000
//!    otherwise. Function `iszero(self) -> u32` is a specialized
//!    subcase that compares `self` with zero.
//!
//!  - Function `set_invert(&mut self)` (and `invert(self) -> Self`)
//!    computes the multiplicative inverse (the inverse of zero is zero).
//!    The `batch_invert(xx: &mut[Self])` function performs inversion of
//!    all field elements in the provided slice, mutualizing the internal
//!    inversion over batches of up to 200 elements. Zeros are tolerated.
//!
//!  - Function `encode(self) -> [u8; 8]` encodes an element as exactly
//!    8 bytes, with unsigned little-endian convention, always canonical.
//!
//!  - Function `decode_ct(buf: &[u8]) -> (Self, u32)` decodes 8 bytes.
//!    If the source slice does not have length exactly 8 bytes, or if
//!    it encodes an integer not lower than p, then decoding fails. On
//!    success, the decoded value and 0xFFFFFFFF are returned; on
//!    failure, zero and 0x00000000 are returned. For an 8-byte slice,
//!    both the value and the outcome are shielded from side channels.
//!    Function `decode(buf: &[u8]) -> Option<Self>` is the same, with
//!    an `Option` result.
//!
//!  - Function `decode_reduce(buf: &[u8]) -> Self` decodes some bytes
//!    with unsigned little-endian convention, of any length. The
//!    obtained integer is reduced modulo p, so the process never fails.
//!
//!  - Function `random(rng)` returns a uniformly random element (up to
//!    a bias of about 2^-64), from a cryptographically secure RNG.
//!
//! The vector units live in the `lanes` sub-module; they are documented
//! there and used through the public `lanes` module of this crate.

pub mod w64;

pub use w64::GF64;

pub mod lanes;
