// Word-level primitives with 64-bit words.
//
// All functions here are constant-time: they use only additions,
// subtractions, shifts and boolean operations, with no conditional
// jump and no memory access that depends on the operand values.

/// Machine word used for table entries.
pub type Word = u64;

/// Size of a word, in bits.
pub const WORD_BITS: u32 = 64;

/// Size of a word, in bytes.
pub const WORD_BYTES: usize = 8;

// Return 0xFFFFFFFFFFFFFFFF if x >= 0x8000000000000000, 0 otherwise
// (i.e. take the sign bit of the signed interpretation, and expand it
// to 64 bits).
#[inline(always)]
pub(crate) const fn sgnw(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}

/// Returns 0xFFFFFFFFFFFFFFFF if `x == y`, 0 otherwise.
///
/// Both `x` and `y` MUST be lower than 2^63.
#[inline(always)]
pub(crate) const fn eq_mask(x: u64, y: u64) -> u64 {
    // Values x-y and y-x both have their high bit equal to 0 only
    // if x == y.
    sgnw(!(x.wrapping_sub(y) | y.wrapping_sub(x)))
}
