//! Gfsbox is a Rust library for arithmetic in the Goldilocks field and
//! the S-box layers of permutations built over it.
//!
//! This library implements computations modulo the prime
//! p = 2^64 - 2^32 + 1, the power-map S-box x^7 and its inverse (as used
//! by arithmetization-oriented hash functions), and a lane-parallel
//! layer of word arithmetic with explicit overflow indicators, meant as
//! a substrate for multi-word computations on vector units.
//!
//! The field is implemented in `backend` (in the `w64` sub-module) and
//! exposed as type `GF64` in the `field` module. The S-box layers are in
//! `sbox`; they operate on a state of `sbox::STATE_WIDTH` field elements
//! (or any other fixed width). The lane-parallel operations are in
//! `lanes`; they run on a vector unit which is selected at compile time
//! (AVX2 on x86_64 when enabled, NEON on aarch64, otherwise a portable
//! emulation), with the option to pick another unit explicitly.
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the
//! standard library, but no functionality depends on it. The
//! `portable_lanes` feature forces the portable vector unit even when a
//! native one is available.
//!
//! # Conventions
//!
//! All functions on field elements and S-box states are strictly
//! constant-time. In order to avoid unwanted side-channel leaks,
//! Booleans are avoided (compilers tend to "optimize" things a bit too
//! eagerly when handling `bool` values). All functions that return or
//! use a potentially secret Boolean value use the `u32` type; the
//! convention is that 0xFFFFFFFF means "true", and 0x00000000 means
//! "false". No other value shall be used, for they would lead to
//! unpredictable results. Similarly, the `Eq` or `PartialEq` traits are
//! not implemented on field elements.
//!
//! Field operations are performed with the usual operators (e.g. `+`);
//! appropriate traits are defined so that field elements and references
//! to field elements can be used more or less interchangeably. Functions
//! that modify the object on which they are called tend to have a name
//! in `set_*()` (e.g. `x.set_square()` squares `x` in place, while
//! `x.square()` leaves `x` unmodified and returns the square as a new
//! instance).
//!
//! The lane-parallel operations are not meant for secret data: they
//! report overflows as plain `bool` flags, and the slice variants return
//! a `Result` when buffer lengths do not match. Such rejections are
//! logged (at debug level) through `tracing`, with only the buffer
//! lengths; field and S-box operations never log anything.
//!
//! No inline assembly is used. On x86-64 architectures, the
//! `_addcarry_u64()` and `_subborrow_u64()` intrinsics are used
//! (from `core::arch::x86_64`); however, plain implementations with
//! no intrinsics are available (and used on aarch64).

#![no_std]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[allow(unused_imports)]
pub(crate) use alloc::vec::Vec;

#[cfg(feature = "std")]
#[allow(unused_imports)]
pub(crate) use std::vec::Vec;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod backend;
pub mod field;
pub mod sbox;
pub mod lanes;
