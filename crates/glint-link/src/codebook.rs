//! Command Codebook
//!
//! Fixed table of 16-bit codewords, one slot per raw command identifier
//! (0–15). Populated slots hold distinct words with a minimum pairwise
//! Hamming distance of 4; reserved slots (0, 11–15) are skipped by the
//! matcher so that an all-zeros or all-ones packet can never win a spurious
//! match.
//!
//! The words were screened for: odd value, no run of ones longer than three,
//! no run of zeros longer than two (slicer clock content), low
//! self-correlation under a one-bit shift (no preamble confusion), and high
//! byte-repetition redundancy (the upper and lower bytes agree on most
//! positions, which is what buys the single-flip tolerance).
//!
//! ## Example
//!
//! ```rust
//! use glint_link::codebook::Codebook;
//!
//! let book = Codebook::default();
//! let word = book.get(3).unwrap();
//!
//! // A clean word resolves to its own slot with a perfect score.
//! let m = book.best_match(word).unwrap();
//! assert_eq!((m.id, m.score), (3, 16));
//!
//! // Reserved slots never participate.
//! assert!(book.get(0).is_none());
//! assert!(book.get(15).is_none());
//! ```

use crate::correlator::matching_bits_u16;

/// Number of codebook slots — the raw command identifier space.
pub const CODEBOOK_SLOTS: usize = 16;

/// Width of every codeword in bits.
pub const CODEWORD_BITS: u32 = 16;

/// Production codeword assignment. Slot index = raw command identifier.
/// Slots 0 and 15 guard against degenerate packets; 11–14 are unassigned.
const CODEWORDS: [Option<u16>; CODEBOOK_SLOTS] = [
    None,           // 0: reserved (all-zeros guard)
    Some(0b1001_0011_1001_0011), // 1
    Some(0b0100_1001_0100_1001), // 2
    Some(0b1001_0101_1001_0101), // 3
    Some(0b0101_0011_0101_0011), // 4
    Some(0b0010_0101_0010_0101), // 5
    Some(0b1110_1001_1100_1101), // 6
    Some(0b0010_1011_0011_0111), // 7
    Some(0b1110_0110_1011_1001), // 8
    Some(0b0011_1001_0011_1001), // 9
    Some(0b1010_1001_1010_1001), // 10
    None,           // 11: unassigned
    None,           // 12: unassigned
    None,           // 13: unassigned
    None,           // 14: unassigned
    None,           // 15: reserved (all-ones guard)
];

/// Result of a nearest-codeword search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodebookMatch {
    /// Slot index of the best-scoring codeword.
    pub id: u8,
    /// Matching-bit score of that codeword (0–16).
    pub score: u8,
}

/// Immutable codeword table indexed by raw command identifier.
#[derive(Debug, Clone)]
pub struct Codebook {
    slots: [Option<u16>; CODEBOOK_SLOTS],
}

impl Default for Codebook {
    fn default() -> Self {
        Self { slots: CODEWORDS }
    }
}

impl Codebook {
    /// Codeword for a slot, or `None` for reserved/unassigned slots.
    pub fn get(&self, id: u8) -> Option<u16> {
        self.slots.get(id as usize).copied().flatten()
    }

    /// Iterate the populated slots as `(id, codeword)` pairs.
    pub fn populated(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.map(|word| (i as u8, word)))
    }

    /// Find the populated slot whose codeword best matches `word`.
    ///
    /// Reserved slots are excluded from the search, not merely left empty.
    /// Ties resolve to the lowest slot; the caller applies the acceptance
    /// threshold.
    pub fn best_match(&self, word: u16) -> Option<CodebookMatch> {
        let mut best: Option<CodebookMatch> = None;
        for (id, codeword) in self.populated() {
            let score = matching_bits_u16(word, codeword);
            if best.map_or(true, |b| score > b.score) {
                best = Some(CodebookMatch { id, score });
            }
        }
        best
    }

    /// Minimum Hamming distance over all populated codeword pairs.
    pub fn min_pairwise_distance(&self) -> u32 {
        let words: Vec<u16> = self.populated().map(|(_, w)| w).collect();
        let mut min = CODEWORD_BITS;
        for (i, &a) in words.iter().enumerate() {
            for &b in &words[i + 1..] {
                let d = (a ^ b).count_ones();
                if d < min {
                    min = d;
                }
            }
        }
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longest_run(mut word: u16, target: bool) -> u32 {
        let mut best = 0;
        let mut run = 0;
        for _ in 0..CODEWORD_BITS {
            if (word & 1 == 1) == target {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
            word >>= 1;
        }
        best
    }

    #[test]
    fn test_populated_slots() {
        let book = Codebook::default();
        let ids: Vec<u8> = book.populated().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_codewords_distinct() {
        let book = Codebook::default();
        let words: Vec<u16> = book.populated().map(|(_, w)| w).collect();
        for (i, &a) in words.iter().enumerate() {
            for &b in &words[i + 1..] {
                assert_ne!(a, b, "duplicate codeword {:04X}", a);
            }
        }
    }

    #[test]
    fn test_min_pairwise_distance_floor() {
        let book = Codebook::default();
        assert!(
            book.min_pairwise_distance() >= 4,
            "codebook distance floor violated: {}",
            book.min_pairwise_distance()
        );
    }

    #[test]
    fn test_distance_from_degenerate_words() {
        // A reserved-guard packet (all zeros / all ones) must stay at least
        // as far from every codeword as the distance floor.
        let book = Codebook::default();
        for (id, word) in book.populated() {
            assert!(
                word.count_ones() >= 4,
                "codeword {} too close to all-zeros",
                id
            );
            assert!(
                (word ^ u16::MAX).count_ones() >= 4,
                "codeword {} too close to all-ones",
                id
            );
        }
    }

    #[test]
    fn test_run_length_constraints() {
        let book = Codebook::default();
        for (id, word) in book.populated() {
            assert!(
                longest_run(word, true) <= 3,
                "codeword {} has a ones run longer than 3",
                id
            );
            assert!(
                longest_run(word, false) <= 2,
                "codeword {} has a zeros run longer than 2",
                id
            );
        }
    }

    #[test]
    fn test_round_trip_every_slot() {
        let book = Codebook::default();
        for (id, word) in book.populated() {
            let m = book.best_match(word).unwrap();
            assert_eq!(m.id, id);
            assert_eq!(m.score, 16);
        }
    }

    #[test]
    fn test_single_flip_resolves_to_same_slot() {
        // With a distance floor of 4, one flipped bit leaves the true
        // word at score 15 and every other word at 13 or below.
        let book = Codebook::default();
        for (id, word) in book.populated() {
            for bit in 0..CODEWORD_BITS {
                let corrupted = word ^ (1 << bit);
                let m = book.best_match(corrupted).unwrap();
                assert_eq!(
                    m.id, id,
                    "slot {} bit {} flip resolved to slot {}",
                    id, bit, m.id
                );
                assert_eq!(m.score, 15);
            }
        }
    }

    #[test]
    fn test_degenerate_words_score_low() {
        let book = Codebook::default();
        let zeros = book.best_match(0x0000).unwrap();
        let ones = book.best_match(0xFFFF).unwrap();
        assert!(zeros.score < 15, "all-zeros scored {}", zeros.score);
        assert!(ones.score < 15, "all-ones scored {}", ones.score);
    }
}
