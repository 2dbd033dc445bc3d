//! Architecture-specific word type and word-level primitives.
//!
//! This module provides the `Word` type, i.e. the unsigned integer type
//! in which table entries are expressed. There are two implementations:
//! 32-bit words and 64-bit words. A relevant implementation is selected
//! based on configured compilation features (`w32_backend` or
//! `w64_backend`), or through auto-detection of the current target
//! (based on the pointer size).
//!
//! In general, the following properties apply to both implementations:
//!
//!  - `Word` is an unsigned primitive integer type (`u32` or `u64`).
//!
//!  - `WORD_BITS` and `WORD_BYTES` are the size of a word, in bits and
//!    in bytes, respectively.
//!
//!  - Crate-internal function `eq_mask(x: Word, y: Word) -> Word`
//!    returns an all-ones word if `x == y`, or zero otherwise. It is
//!    constant-time, provided that both operands are lower than
//!    2^(`WORD_BITS`-1).
//!
//! No other value than all-zeros and all-ones is ever used as a mask;
//! code that combines masks with `&` and `|` relies on that property.

#[cfg(not(any(
    feature = "w32_backend",
    feature = "w64_backend",
    target_pointer_width = "32",
    target_pointer_width = "64",
)))]
compile_error!("no backend specified; cannot infer from pointer size");

#[cfg(all(
    feature = "w32_backend",
    feature = "w64_backend",
))]
compile_error!("cannot use 32-bit and 64-bit words simultaneously");

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub mod w32;

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub use w32::{Word, WORD_BITS, WORD_BYTES};

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub(crate) use w32::eq_mask;

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub mod w64;

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub use w64::{Word, WORD_BITS, WORD_BYTES};

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub(crate) use w64::eq_mask;

/// Hides a value from the optimizer.
///
/// This is used on every freshly computed mask word, so that the
/// compiler cannot infer that the mask is either all-zeros or all-ones
/// and rebuild a conditional jump from it.
/// This is a best-effort barrier: `core::hint::black_box()` does not
/// come with a formal guarantee.
#[inline(always)]
pub(crate) fn value_barrier(x: Word) -> Word {
    core::hint::black_box(x)
}
