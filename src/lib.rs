//! Ctscramble provides constant-time storage for the precomputed tables
//! of fixed-window exponentiation.
//!
//! Fixed-window modular exponentiation (e.g. for RSA) and fixed-window
//! scalar multiplication on elliptic curves first compute a small table
//! of `2^w` values (powers of the base, or multiples of the point), then
//! process the exponent by chunks of `w` bits, each chunk being used as
//! an index in the table. The exponent is secret, and so are the indices;
//! reading the table entry directly would leak the index through the
//! memory access pattern (cache-timing attacks). This crate stores the
//! values in a *scrambled* layout where each word of each entry is
//! interleaved with the corresponding words of all other entries, and
//! retrieves entries by reading the whole table and combining all values
//! with masks. The sequence of instructions and of memory accesses then
//! depends only on the table dimensions, not on the index.
//!
//! Table values are opaque sequences of machine words (type `Word`); the
//! arithmetic that produces them, and the exponentiation loop that uses
//! them, are not part of this crate.
//!
//! The `scramble` module contains the core functions, which work over
//! caller-provided buffers: `table_size()`, `scatter()`, `gather()` and
//! `gather_vartime()`. The `table` module (available when the `alloc`
//! feature is enabled, which is the default) defines `ScrambleTable`, an
//! owned, cache-line aligned table that validates its parameters on
//! creation and erases its contents when dropped.
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the standard
//! library. It can be compiled in `no_std` mode, with or without the
//! `alloc` feature; without `alloc`, `ScrambleTable` is not available,
//! but the slice-based functions still are.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions normally
//! have "vartime" in their name). Masks are words with value either
//! all-zeros ("false") or all-ones ("true"); no other value shall be
//! used. Booleans are avoided for secret data (compilers tend to
//! "optimize" things a bit too eagerly when handling `bool` values).
//!
//! The word size is 64 bits on architectures with 64-bit pointers, and
//! 32 bits on architectures with 32-bit pointers. It can be forced with
//! the `w64_backend` or `w32_backend` features.

#![no_std]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
pub(crate) use alloc::vec::Vec;

#[cfg(feature = "std")]
pub(crate) use std::vec::Vec;

#[allow(unused_macros)]
macro_rules! static_assert {
    ($condition:expr) => {
        let _ = &[()][1 - ($condition) as usize];
    }
}

pub mod backend;
pub mod scramble;

#[cfg(feature = "alloc")]
pub mod table;

pub use backend::{Word, WORD_BITS, WORD_BYTES};
pub use scramble::{
    gather, gather_vartime, offset, scatter, table_size,
    CACHE_LINE_SIZE, MAX_W,
};

#[cfg(feature = "alloc")]
pub use table::ScrambleTable;
