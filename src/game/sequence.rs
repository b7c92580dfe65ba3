//! Round Sequence
//!
//! The chain the player has to repeat. It only ever grows: one random slot is
//! appended per round and the whole chain is replayed each time.

use crate::events::SlotIndex;
use rand::Rng;

/// Append-only list of slots for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    slots: Vec<SlotIndex>,
}

impl Sequence {
    /// Empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one slot drawn uniformly from `0..slot_count` and return it
    pub fn extend_random<R: Rng + ?Sized>(&mut self, rng: &mut R, slot_count: usize) -> SlotIndex {
        let slot = rng.gen_range(0..slot_count);
        self.slots.push(slot);
        slot
    }

    /// Number of rounds so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no round has started
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in playback order
    pub fn as_slice(&self) -> &[SlotIndex] {
        &self.slots
    }
}

impl FromIterator<SlotIndex> for Sequence {
    fn from_iter<I: IntoIterator<Item = SlotIndex>>(iter: I) -> Self {
        Sequence {
            slots: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grows_append_only() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sequence = Sequence::new();
        let mut previous: Vec<SlotIndex> = Vec::new();

        for round in 1..=20 {
            let slot = sequence.extend_random(&mut rng, 4);
            assert!(slot < 4);
            assert_eq!(sequence.len(), round);
            assert_eq!(&sequence.as_slice()[..round - 1], previous.as_slice());
            previous = sequence.as_slice().to_vec();
        }
    }

    #[test]
    fn test_same_seed_same_chain() {
        let mut a = Sequence::new();
        let mut b = Sequence::new();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        for _ in 0..8 {
            a.extend_random(&mut rng_a, 4);
            b.extend_random(&mut rng_b, 4);
        }
        assert_eq!(a, b);
    }
}
