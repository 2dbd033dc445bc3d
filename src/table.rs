//! Owned scramble tables.
//!
//! `ScrambleTable` wraps a heap-allocated buffer laid out as described in
//! the `scramble` module. Parameters (window width and entry length) are
//! validated once, when the table is created, so that the lookups in the
//! exponentiation loop need no further checks on public values beyond
//! slice lengths. The buffer is aligned on a cache line boundary, and its
//! contents are erased when the table is dropped.

use core::slice;
use zeroize::Zeroize;

use super::Vec;
use super::backend::{Word, WORD_BYTES};
use super::scramble::{
    checked_table_size, gather, gather_vartime, scatter,
    CACHE_LINE_SIZE, MAX_W,
};

const LINE_WORDS: usize = CACHE_LINE_SIZE / WORD_BYTES;

// One cache line worth of words. The alignment MUST match CACHE_LINE_SIZE.
#[derive(Clone, Copy)]
#[repr(C, align(64))]
struct CacheLine([Word; LINE_WORDS]);

/// A table of `2^w` entries of `entry_len` words each, with
/// constant-time lookups.
///
/// Entries are stored with `put()` (normally during a precomputation
/// phase, with non-secret slot indices), then retrieved with `get()`
/// (constant-time, for secret indices) or `get_vartime()` (for public
/// indices only).
pub struct ScrambleTable {
    lines: Vec<CacheLine>,
    entry_len: usize,
    w: u32,
}

impl ScrambleTable {

    /// Creates a new table, with all entries set to zero.
    ///
    /// The window width `w` must be between 1 and `MAX_W` (inclusive),
    /// and the entry length must not be zero; otherwise, `None` is
    /// returned.
    pub fn new(entry_len: usize, w: u32) -> Option<Self> {
        static_assert!(core::mem::size_of::<CacheLine>() == CACHE_LINE_SIZE);
        static_assert!(core::mem::align_of::<CacheLine>() == CACHE_LINE_SIZE);

        if w < 1 || w > MAX_W || entry_len == 0 {
            return None;
        }
        let num_lines = checked_table_size(entry_len, w)? / LINE_WORDS;
        Some(Self {
            lines: vec![CacheLine([0; LINE_WORDS]); num_lines],
            entry_len,
            w,
        })
    }

    /// Creates a new table and fills it by calling `f(idx, val)` for
    /// every slot index `idx`, in ascending order; the callback must
    /// write the entry for slot `idx` into `val`.
    ///
    /// Returns `None` on invalid parameters (see `new()`).
    pub fn from_fn<F>(entry_len: usize, w: u32, mut f: F) -> Option<Self>
        where F: FnMut(usize, &mut [Word])
    {
        let mut t = Self::new(entry_len, w)?;
        let mut val = vec![0 as Word; entry_len];
        for idx in 0..t.slots() {
            f(idx, &mut val[..]);
            t.put(idx, &val[..]);
        }
        val[..].zeroize();
        Some(t)
    }

    /// Gets the window width.
    pub fn window(&self) -> u32 {
        self.w
    }

    /// Gets the length of an entry, in words.
    pub fn entry_len(&self) -> usize {
        self.entry_len
    }

    /// Gets the number of slots (`2^w`).
    pub fn slots(&self) -> usize {
        1usize << self.w
    }

    /// Gets the raw table contents, in scrambled layout. The length is
    /// `table_size(self.entry_len(), self.window())`.
    pub fn as_words(&self) -> &[Word] {
        // CacheLine is a padding-free array wrapper, hence the lines
        // are also a contiguous sequence of words.
        unsafe {
            slice::from_raw_parts(
                self.lines.as_ptr() as *const Word,
                self.lines.len() * LINE_WORDS)
        }
    }

    fn as_words_mut(&mut self) -> &mut [Word] {
        unsafe {
            slice::from_raw_parts_mut(
                self.lines.as_mut_ptr() as *mut Word,
                self.lines.len() * LINE_WORDS)
        }
    }

    /// Stores entry `val` in slot `idx`.
    ///
    /// The slot index is not considered secret. `val` must have length
    /// exactly `self.entry_len()`, and `idx` must be lower than
    /// `self.slots()`; otherwise, this function panics.
    pub fn put(&mut self, idx: usize, val: &[Word]) {
        assert!(idx < self.slots());
        assert!(val.len() == self.entry_len);
        let w = self.w;
        scatter(self.as_words_mut(), idx, val, w);
    }

    /// Retrieves the entry in slot `idx` into `val` (constant-time).
    ///
    /// `val` must have length exactly `self.entry_len()` (otherwise,
    /// this function panics); `idx` MUST be lower than `self.slots()`,
    /// but this is not verified (except in debug builds), since `idx`
    /// is secret. In release builds, an out-of-range index yields an
    /// all-zero entry.
    pub fn get(&self, val: &mut [Word], idx: usize) {
        assert!(val.len() == self.entry_len);
        gather(val, self.as_words(), idx, self.w);
    }

    /// Retrieves the entry in slot `idx` into `val`.
    ///
    /// WARNING: this function is not constant-time. It MUST NOT be used
    /// if `idx` is secret.
    pub fn get_vartime(&self, val: &mut [Word], idx: usize) {
        assert!(idx < self.slots());
        assert!(val.len() == self.entry_len);
        gather_vartime(val, self.as_words(), idx, self.w);
    }
}

impl Zeroize for ScrambleTable {
    fn zeroize(&mut self) {
        self.as_words_mut().zeroize();
    }
}

impl Drop for ScrambleTable {
    fn drop(&mut self) {
        self.zeroize();
    }
}
