//! Club separation for unseeded entrants.

use super::models::Participant;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::VecDeque;

/// Orders entrants so club mates are spread across the draw
///
/// The random source is owned by the separator so that a seeded instance
/// produces the same draw every time.
pub struct ClubSeparator<R = StdRng> {
    /// Random number generator
    rng: R,
}

impl ClubSeparator<StdRng> {
    /// Create a separator seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic separator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ClubSeparator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ClubSeparator<R> {
    /// Create a separator around an existing random source
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Access the random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Arrange entrants into draw order
    ///
    /// Seeded entrants come first in the order given. Unseeded entrants are
    /// shuffled, grouped by affiliation, and taken one per group in turn,
    /// largest group first. A roster from a single club keeps its shuffled
    /// order.
    ///
    /// # Arguments
    ///
    /// * `seeded` - Seeded entrants, already sorted by seed rank
    /// * `unseeded` - Remaining entrants
    ///
    /// # Returns
    ///
    /// * `Vec<Participant>` - All entrants in draw order
    pub fn arrange(&mut self, seeded: &[Participant], unseeded: &[Participant]) -> Vec<Participant> {
        let mut shuffled = unseeded.to_vec();
        shuffled.shuffle(&mut self.rng);

        // Groups keep first-appearance order so the stable sort below is deterministic
        let mut groups: Vec<(String, VecDeque<Participant>)> = Vec::new();
        for participant in shuffled {
            let key = participant.affiliation_key();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push_back(participant),
                None => groups.push((key, VecDeque::from([participant]))),
            }
        }
        groups.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

        let mut arranged = seeded.to_vec();
        arranged.reserve(unseeded.len());

        let mut group_idx = 0;
        for _ in 0..unseeded.len() {
            let mut attempts = 0;
            while groups[group_idx].1.is_empty() && attempts < groups.len() {
                group_idx = (group_idx + 1) % groups.len();
                attempts += 1;
            }
            if let Some(participant) = groups[group_idx].1.pop_front() {
                arranged.push(participant);
            }
            group_idx = (group_idx + 1) % groups.len();
        }

        arranged
    }
}
