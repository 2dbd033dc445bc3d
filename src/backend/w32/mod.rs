// Word-level primitives with 32-bit words.
//
// All functions here are constant-time: they use only additions,
// subtractions, shifts and boolean operations, with no conditional
// jump and no memory access that depends on the operand values.

/// Machine word used for table entries.
pub type Word = u32;

/// Size of a word, in bits.
pub const WORD_BITS: u32 = 32;

/// Size of a word, in bytes.
pub const WORD_BYTES: usize = 4;

// Return 0xFFFFFFFF if x >= 0x80000000, 0 otherwise.
#[inline(always)]
pub(crate) const fn sgnw(x: u32) -> u32 {
    ((x as i32) >> 31) as u32
}

/// Returns 0xFFFFFFFF if `x == y`, 0 otherwise.
///
/// Both `x` and `y` MUST be lower than 2^31.
#[inline(always)]
pub(crate) const fn eq_mask(x: u32, y: u32) -> u32 {
    sgnw(!(x.wrapping_sub(y) | y.wrapping_sub(x)))
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn masks() {
        for x in 0..70u32 {
            for y in 0..70u32 {
                let m = eq_mask(x, y);
                if x == y {
                    assert!(m == 0xFFFFFFFF);
                } else {
                    assert!(m == 0);
                }
            }
        }
        assert!(eq_mask(0x7FFFFFFF, 0x7FFFFFFF) == 0xFFFFFFFF);
        assert!(eq_mask(0x7FFFFFFF, 0) == 0);
        assert!(sgnw(0x80000000) == 0xFFFFFFFF);
    }
}
