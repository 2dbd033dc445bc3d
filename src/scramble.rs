//! Scrambled tables for fixed-window exponentiation.
//!
//! A fixed-window exponentiation (or scalar multiplication) precomputes
//! `2^w` values, then performs one table lookup per window of `w` bits
//! of the exponent. When the exponent is secret, so is the lookup index,
//! and a direct array access would leak it through the cache. The
//! functions in this module store and retrieve such values in a layout
//! that allows a constant-time retrieval to read the whole table
//! sequentially.
//!
//! # Layout
//!
//! A table for window width `w` has `2^w` slots, each slot holding an
//! entry of `entry_len` words. Entries are *striped*: the table is a
//! sequence of `entry_len` rows of `2^w` words each, and row `i` contains
//! word `i` of every entry. In other words, word `i` of the entry in
//! slot `n` is located at index `offset(i, n, w) = i*2^w + n`. The
//! constant-time `gather()` function reads each row linearly and
//! produces one output word per row.
//!
//! The buffer itself is provided by the caller; its length, in words,
//! must be at least `table_size(entry_len, w)`, which rounds the raw size
//! up to a multiple of `CACHE_LINE_SIZE` bytes.
//!
//! # Preconditions
//!
//! The window width MUST be between 1 and `MAX_W` (inclusive); other
//! values trigger a panic (the width is not secret). Slot indices MUST
//! be lower than `2^w`. Index ranges are verified with debug assertions
//! only; in particular, `gather()` never branches on its index in release
//! builds. All calls on a given table must use the same window width and
//! the same entry length.

use super::backend::{eq_mask, value_barrier, Word, WORD_BYTES};

/// Cache line size (in bytes) to which table sizes are rounded up.
pub const CACHE_LINE_SIZE: usize = 64;

/// Maximum supported window width.
pub const MAX_W: u32 = 6;

/// Gets the required table length (in words) for `2^w` entries of
/// `entry_len` words each.
///
/// The length is rounded up so that the table size in bytes is a
/// multiple of `CACHE_LINE_SIZE`.
pub const fn table_size(entry_len: usize, w: u32) -> usize {
    let size = (1usize << w) * entry_len * WORD_BYTES;
    let size = size + (CACHE_LINE_SIZE - (size % CACHE_LINE_SIZE)) % CACHE_LINE_SIZE;
    size / WORD_BYTES
}

// Same as table_size(), but returns None when the size in bytes does not
// fit in an isize (the limit for a single allocation), instead of
// overflowing. The window width must be at most MAX_W.
#[cfg_attr(not(feature = "alloc"), allow(dead_code))]
pub(crate) fn checked_table_size(entry_len: usize, w: u32) -> Option<usize> {
    let size = entry_len.checked_mul(WORD_BYTES << w)?;
    let size = size.checked_add(CACHE_LINE_SIZE - 1)?;
    let size = size - (size % CACHE_LINE_SIZE);
    if size > (isize::MAX as usize) {
        return None;
    }
    Some(size / WORD_BYTES)
}

/// Gets the position of word `i` of the entry in slot `n`, in a table
/// with window width `w`.
#[inline(always)]
pub const fn offset(i: usize, n: usize, w: u32) -> usize {
    (i << w) + n
}

/// Stores entry `val` into slot `idx` of table `tbl`.
///
/// The entry length is `val.len()`. This function is NOT constant-time
/// with regard to `idx`; it is meant for the precomputation phase, where
/// slots are filled in a known order.
pub fn scatter(tbl: &mut [Word], idx: usize, val: &[Word], w: u32) {
    debug_assert!(w >= 1 && w <= MAX_W);
    debug_assert!(idx < (1usize << w));
    for i in 0..val.len() {
        tbl[offset(i, idx, w)] = val[i];
    }
}

/// Retrieves into `val` the entry in slot `idx` of table `tbl`.
///
/// The entry length is `val.len()`. WARNING: this function is not
/// constant-time; the memory addresses it reads depend on `idx`. It
/// MUST NOT be used with a secret index.
pub fn gather_vartime(val: &mut [Word], tbl: &[Word], idx: usize, w: u32) {
    debug_assert!(w >= 1 && w <= MAX_W);
    debug_assert!(idx < (1usize << w));
    for i in 0..val.len() {
        val[i] = tbl[offset(i, idx, w)];
    }
}

/// Retrieves into `val` the entry in slot `idx` of table `tbl`
/// (constant-time).
///
/// The entry length is `val.len()`. All `2^w` slots are read, in the
/// same order, whatever the value of `idx`; the requested entry is
/// extracted with masks. The sequence of executed instructions and of
/// accessed addresses depends only on `val.len()` and `w`.
pub fn gather(val: &mut [Word], tbl: &[Word], idx: usize, w: u32) {
    // Debug builds only: this is a branch on the secret index.
    debug_assert!(w > MAX_W || idx < (1usize << w));

    // Restrict the table to the rows actually used; this bounds check
    // involves only public values.
    let tbl = &tbl[..(val.len() << w)];
    gather_with(val, idx, w, |j| tbl[j]);
}

// Constant-time gather over an arbitrary word source: load(j) must return
// the table word at position j. The dispatch is on the window width,
// which is public.
#[inline(always)]
pub(crate) fn gather_with<F>(val: &mut [Word], idx: usize, w: u32, load: F)
    where F: FnMut(usize) -> Word
{
    match w {
        1 => gather_slots::<F, 2>(val, idx, load),
        2 => gather_slots::<F, 4>(val, idx, load),
        3 => gather_slots::<F, 8>(val, idx, load),
        4 => gather_slots::<F, 16>(val, idx, load),
        5 => gather_slots::<F, 32>(val, idx, load),
        6 => gather_slots::<F, 64>(val, idx, load),
        _ => panic!("unsupported window width: {}", w),
    }
}

/// Computes the selection masks for a table of `N` slots: `mask[n]` is
/// all-ones if `n == idx`, zero otherwise. Every index of `2^MAX_W` or
/// more, including indices that do not fit in a `Word`, gets all-zero
/// masks.
#[inline(always)]
pub(crate) fn slot_masks<const N: usize>(idx: usize) -> [Word; N] {
    // Fold the index into a word without truncation: the low MAX_W bits
    // are kept, and bit MAX_W is set if any higher bit is set. The
    // result is lower than 2^(MAX_W+1), as eq_mask() requires.
    let hi = idx >> MAX_W;
    let hi = (hi | hi.wrapping_neg()) >> (usize::BITS - 1);
    let idx = ((idx & ((1usize << MAX_W) - 1)) | (hi << MAX_W)) as Word;

    // Each mask word goes through the barrier; otherwise, the compiler
    // may notice that it is 0 or -1 and turn `load() & mask` into a
    // branch that skips the load.
    let mut mask = [0 as Word; N];
    for n in 0..N {
        mask[n] = value_barrier(eq_mask(n as Word, idx));
    }
    mask
}

#[inline(always)]
fn gather_slots<F, const N: usize>(val: &mut [Word], idx: usize, mut load: F)
    where F: FnMut(usize) -> Word
{
    let mask = slot_masks::<N>(idx);

    // Row i starts at offset(i, 0, w) = i*N.
    for i in 0..val.len() {
        let row = i * N;
        let mut acc: Word = 0;
        for n in 0..N {
            acc |= load(row + n) & mask[n];
        }
        val[i] = acc;
    }
}
