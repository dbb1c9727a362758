//! Participant bitfield helpers
//!
//! A signature's bitfield is a `u32` where bit `i` marks signer index `i` as a
//! contributor. The 32-slot ceiling is a hard capacity of this encoding;
//! more participants need a wider bitfield type.

/// Number of signer slots in a bitfield
pub const MAX_SIGNERS: usize = u32::BITS as usize;

/// Number of contributors recorded in `bitfield`
pub fn popcount(bitfield: u32) -> usize {
    bitfield.count_ones() as usize
}

/// One past the highest set bit, or 0 for an empty bitfield.
///
/// This is the minimum key list length needed to reach every index.
pub fn highest_set_bit_plus_one(bitfield: u32) -> usize {
    if bitfield == 0 {
        return 0;
    }
    (u32::BITS - bitfield.leading_zeros()) as usize
}

/// Ascending positions of the set bits
pub fn set_bit_positions(bitfield: u32) -> SetBits {
    SetBits { remaining: bitfield }
}

/// Iterator over set bit positions, lowest first
#[derive(Debug, Clone)]
pub struct SetBits {
    remaining: u32,
}

impl Iterator for SetBits {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let position = self.remaining.trailing_zeros() as usize;
        // clear lowest set bit
        self.remaining &= self.remaining - 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = popcount(self.remaining);
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popcount() {
        assert_eq!(popcount(0), 0);
        assert_eq!(popcount(0b101), 2);
        assert_eq!(popcount(u32::MAX), 32);
    }

    #[test]
    fn test_highest_set_bit() {
        assert_eq!(highest_set_bit_plus_one(0), 0);
        assert_eq!(highest_set_bit_plus_one(1), 1);
        assert_eq!(highest_set_bit_plus_one(0b100000), 6);
        assert_eq!(highest_set_bit_plus_one(0b100101), 6);
        assert_eq!(highest_set_bit_plus_one(1 << 31), 32);
    }

    #[test]
    fn test_set_bit_positions() {
        assert_eq!(set_bit_positions(0).count(), 0);
        assert_eq!(set_bit_positions(0b1010_0101).collect::<Vec<_>>(), vec![0, 2, 5, 7]);
        assert_eq!(set_bit_positions(1 << 31).collect::<Vec<_>>(), vec![31]);
        assert_eq!(set_bit_positions(u32::MAX).len(), MAX_SIGNERS);
    }
}
