//! Playback state machine — which record is current.
//!
//! [`PlaybackState`] exists only while a non-empty record set is loaded; the
//! engine drops it when the set empties and recreates it at index 0 when a
//! new set arrives.  Advancement is pure apart from the random source, which
//! is injectable so tests can seed it.

use rand::Rng;

use crate::config::PlaybackOrder;

/// Current position and mode of the playback cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the record currently shown; always `< record_count` when a
    /// tick fires.
    pub current_index: usize,
    /// Sequential or random advancement.
    pub order: PlaybackOrder,
    /// Set while the pointer hovers the overlay; the timer is cleared and
    /// the index frozen.
    pub is_paused: bool,
}

impl PlaybackState {
    /// Fresh state at index 0, running.
    pub fn new(order: PlaybackOrder) -> Self {
        Self {
            current_index: 0,
            order,
            is_paused: false,
        }
    }

    /// Advance to the next record index.
    ///
    /// Sequential order wraps after the last record; random order picks a
    /// uniform index and may repeat the current one.  `record_count` must be
    /// non-zero — empty record sets never tick.
    pub fn advance(&mut self, record_count: usize) {
        self.advance_with(record_count, &mut rand::rng());
    }

    /// [`advance`](Self::advance) with an explicit random source.
    pub fn advance_with<R: Rng + ?Sized>(&mut self, record_count: usize, rng: &mut R) {
        debug_assert!(record_count > 0, "empty record sets must not tick");

        self.current_index = match self.order {
            PlaybackOrder::Sequential => (self.current_index + 1) % record_count,
            PlaybackOrder::Random => rng.random_range(0..record_count),
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// N sequential ticks visit every index exactly once; the (N+1)-th tick
    /// returns to the first.
    #[test]
    fn sequential_order_cycles_through_every_index() {
        let n = 7;
        let mut state = PlaybackState::new(PlaybackOrder::Sequential);
        let mut visited = vec![state.current_index];

        for _ in 0..n - 1 {
            state.advance(n);
            visited.push(state.current_index);
        }

        let mut sorted = visited.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());

        state.advance(n);
        assert_eq!(state.current_index, visited[0]);
    }

    #[test]
    fn sequential_wraps_single_record_set() {
        let mut state = PlaybackState::new(PlaybackOrder::Sequential);
        state.advance(1);
        assert_eq!(state.current_index, 0);
    }

    /// Random ticks always land in `[0, N-1]` and cover the space roughly
    /// uniformly over a large sample.
    #[test]
    fn random_order_stays_in_range_and_spreads() {
        let n = 5;
        let samples = 5_000;
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = PlaybackState::new(PlaybackOrder::Random);
        let mut counts = vec![0usize; n];

        for _ in 0..samples {
            state.advance_with(n, &mut rng);
            assert!(state.current_index < n);
            counts[state.current_index] += 1;
        }

        // Expected 1000 per bucket; allow a generous band.
        for &count in &counts {
            assert!(
                (700..=1300).contains(&count),
                "distribution far from uniform: {counts:?}"
            );
        }
    }

    /// Immediate repeats are permitted in random order.
    #[test]
    fn random_order_allows_immediate_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = PlaybackState::new(PlaybackOrder::Random);
        let mut repeated = false;

        for _ in 0..200 {
            let before = state.current_index;
            state.advance_with(3, &mut rng);
            if state.current_index == before {
                repeated = true;
                break;
            }
        }

        assert!(repeated, "200 random ticks over 3 records never repeated");
    }
}
