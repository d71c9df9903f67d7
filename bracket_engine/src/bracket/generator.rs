//! Bracket generation with seeding, byes and bye cascading.

use super::{
    arrangement::ClubSeparator,
    models::{Match, MatchId, MatchStatus, Participant, SlotPosition},
    seeding::{next_power_of_two, seed_positions},
};
use rand::{Rng, rngs::StdRng};
use std::collections::HashMap;
use uuid::Builder;

/// Minimum number of entrants for a bracket
pub const MIN_PARTICIPANTS: usize = 2;

/// Single-elimination bracket generator
pub struct BracketGenerator<R = StdRng> {
    separator: ClubSeparator<R>,
}

impl BracketGenerator<StdRng> {
    /// Create a generator seeded from the operating system
    pub fn new() -> Self {
        Self {
            separator: ClubSeparator::new(),
        }
    }

    /// Create a deterministic generator (draw order and match IDs)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            separator: ClubSeparator::with_seed(seed),
        }
    }
}

impl Default for BracketGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BracketGenerator<R> {
    /// Create a generator around an existing separator
    pub fn from_separator(separator: ClubSeparator<R>) -> Self {
        Self { separator }
    }

    /// Generate every match of the bracket
    ///
    /// Round 1 holds the drawn pairings, later rounds start as empty
    /// placeholders. Byes are resolved before returning, so an entrant
    /// without an opponent already sits in the next round, possibly several
    /// rounds ahead when large parts of the draw are empty.
    ///
    /// # Arguments
    ///
    /// * `participants` - Category roster
    ///
    /// # Returns
    ///
    /// * `Vec<Match>` - All matches ordered by round and match number, empty
    ///   for fewer than two participants
    pub fn generate(&mut self, participants: &[Participant]) -> Vec<Match> {
        if participants.len() < MIN_PARTICIPANTS {
            return Vec::new();
        }

        let bracket_size = next_power_of_two(participants.len());
        let total_rounds = bracket_size.trailing_zeros();

        let mut seeded: Vec<Participant> = participants
            .iter()
            .filter(|p| p.is_seeded())
            .cloned()
            .collect();
        seeded.sort_by_key(|p| p.seed_number);
        let unseeded: Vec<Participant> = participants
            .iter()
            .filter(|p| !p.is_seeded())
            .cloned()
            .collect();

        let ordered = self.separator.arrange(&seeded, &unseeded);

        let mut slots = vec![None; bracket_size];
        for (participant, &position) in ordered.iter().zip(seed_positions(bracket_size).iter()) {
            slots[position] = Some(participant.id);
        }

        let mut matches = Vec::with_capacity(bracket_size - 1);
        for (idx, pair) in slots.chunks(2).enumerate() {
            let mut m = Match::placeholder(self.next_match_id(), 1, idx as u32 + 1);
            m.slot_a = pair[0];
            m.slot_b = pair[1];
            if m.entrant_count() < 2 {
                m.status = MatchStatus::Bye;
                m.winner_id = m.sole_entrant();
            }
            matches.push(m);
        }

        let mut matches_in_round = bracket_size / 4;
        for round in 2..=total_rounds {
            for number in 1..=matches_in_round {
                matches.push(Match::placeholder(self.next_match_id(), round, number as u32));
            }
            matches_in_round /= 2;
        }

        let walkovers = resolve_byes(&mut matches);
        log::debug!(
            "Generated bracket of size {} ({} rounds, {} walkovers) for {} participants",
            bracket_size,
            total_rounds,
            walkovers,
            participants.len()
        );

        matches
    }

    fn next_match_id(&mut self) -> MatchId {
        let bytes = self.separator.rng_mut().random::<u128>().to_le_bytes();
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Carry bye winners forward through every round
///
/// A bye with a winner places that winner into its next-round slot. A
/// next-round match fed by two byes is decided without a contest as well: one
/// entrant makes it a bye won by that entrant, none makes it an empty bye, two
/// leave it pending.
///
/// # Returns
///
/// * `usize` - Number of entrant placements made
pub fn resolve_byes(matches: &mut [Match]) -> usize {
    let index: HashMap<(u32, u32), usize> = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| ((m.round, m.match_number), idx))
        .collect();
    let total_rounds = super::models::total_rounds(matches);

    let mut placements = 0;
    for round in 1..total_rounds {
        let mut number = 1;
        while let Some(&idx) = index.get(&(round, number)) {
            let feeder = &matches[idx];
            if feeder.status == MatchStatus::Bye {
                if let Some(winner) = feeder.winner_id {
                    let slot = SlotPosition::for_feeder(feeder.match_number);
                    if let Some(&next_idx) = index.get(&feeder.next_position()) {
                        let next = &mut matches[next_idx];
                        match slot {
                            SlotPosition::A => next.slot_a = Some(winner),
                            SlotPosition::B => next.slot_b = Some(winner),
                        }
                        placements += 1;
                    }
                }
            }
            number += 1;
        }

        let mut number = 1;
        while let Some(&idx) = index.get(&(round + 1, number)) {
            let feeders_resolved = [2 * number - 1, 2 * number].iter().all(|feeder| {
                index
                    .get(&(round, *feeder))
                    .is_some_and(|&i| matches[i].status == MatchStatus::Bye)
            });
            let next = &mut matches[idx];
            if feeders_resolved && next.entrant_count() < 2 {
                next.status = MatchStatus::Bye;
                next.winner_id = next.sole_entrant();
            }
            number += 1;
        }
    }

    placements
}

/// Generate a bracket with a fresh random draw
pub fn generate_bracket(participants: &[Participant]) -> Vec<Match> {
    BracketGenerator::new().generate(participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: i64) -> Vec<Participant> {
        (1..=n)
            .map(|id| Participant::new(id, format!("Athlete {id}")))
            .collect()
    }

    fn seeded_roster(n: i64) -> Vec<Participant> {
        (1..=n)
            .map(|id| Participant::new(id, format!("Athlete {id}")).with_seed(id as u32))
            .collect()
    }

    fn find(matches: &[Match], round: u32, number: u32) -> &Match {
        matches
            .iter()
            .find(|m| m.round == round && m.match_number == number)
            .expect("match should exist")
    }

    #[test]
    fn test_fewer_than_two_is_empty() {
        let mut generator = BracketGenerator::with_seed(1);
        assert!(generator.generate(&[]).is_empty());
        assert!(generator.generate(&roster(1)).is_empty());
    }

    #[test]
    fn test_two_participants_single_final() {
        let matches = BracketGenerator::with_seed(1).generate(&roster(2));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].round, 1);
        assert_eq!(matches[0].status, MatchStatus::Pending);
        assert_eq!(matches[0].entrant_count(), 2);
    }

    #[test]
    fn test_round_sizes() {
        let matches = BracketGenerator::with_seed(4).generate(&roster(13));
        assert_eq!(matches.len(), 15);
        assert_eq!(matches.iter().filter(|m| m.round == 1).count(), 8);
        assert_eq!(matches.iter().filter(|m| m.round == 2).count(), 4);
        assert_eq!(matches.iter().filter(|m| m.round == 3).count(), 2);
        assert_eq!(matches.iter().filter(|m| m.round == 4).count(), 1);
    }

    #[test]
    fn test_three_participants_bye_advances() {
        let matches = BracketGenerator::with_seed(2).generate(&seeded_roster(3));

        // Slots: seed 1 -> 0, seed 2 -> 3, seed 3 -> 2
        let first = find(&matches, 1, 1);
        assert_eq!(first.status, MatchStatus::Bye);
        assert_eq!(first.slot_a, Some(1));
        assert_eq!(first.winner_id, Some(1));

        let second = find(&matches, 1, 2);
        assert_eq!(second.status, MatchStatus::Pending);
        assert_eq!((second.slot_a, second.slot_b), (Some(3), Some(2)));

        let final_match = find(&matches, 2, 1);
        assert_eq!(final_match.slot_a, Some(1));
        assert_eq!(final_match.slot_b, None);
        assert_eq!(final_match.status, MatchStatus::Pending);
    }

    #[test]
    fn test_five_seeded_layout() {
        let matches = BracketGenerator::with_seed(3).generate(&seeded_roster(5));

        // Slots 0..8 hold seeds [1, 4, -, -, 5, -, 3, 2]
        let m1 = find(&matches, 1, 1);
        assert_eq!((m1.slot_a, m1.slot_b, m1.status), (Some(1), Some(4), MatchStatus::Pending));

        let m2 = find(&matches, 1, 2);
        assert_eq!(m2.status, MatchStatus::Bye);
        assert_eq!(m2.winner_id, None);

        let m3 = find(&matches, 1, 3);
        assert_eq!((m3.status, m3.winner_id), (MatchStatus::Bye, Some(5)));

        let m4 = find(&matches, 1, 4);
        assert_eq!((m4.slot_a, m4.slot_b), (Some(3), Some(2)));

        // Seed 5 already waits in round 2, the other side is still open
        let r2m2 = find(&matches, 2, 2);
        assert_eq!((r2m2.slot_a, r2m2.slot_b), (Some(5), None));
        assert_eq!(r2m2.status, MatchStatus::Pending);
    }

    #[test]
    fn test_walkover_cascades_two_rounds() {
        let matches = BracketGenerator::with_seed(9).generate(&seeded_roster(9));

        // Seed 9 sits alone in round 1 match 5, whose sibling match 6 is empty
        let r1m5 = find(&matches, 1, 5);
        assert_eq!((r1m5.status, r1m5.winner_id), (MatchStatus::Bye, Some(9)));
        assert_eq!(find(&matches, 1, 6).entrant_count(), 0);

        let r2m3 = find(&matches, 2, 3);
        assert_eq!((r2m3.status, r2m3.winner_id), (MatchStatus::Bye, Some(9)));

        let r3m2 = find(&matches, 3, 2);
        assert_eq!(r3m2.slot_a, Some(9));
        assert_eq!(r3m2.status, MatchStatus::Pending);

        // Round 2 match 2 is fed by two empty matches
        let r2m2 = find(&matches, 2, 2);
        assert_eq!((r2m2.status, r2m2.winner_id), (MatchStatus::Bye, None));
    }

    #[test]
    fn test_match_ids_unique_and_deterministic() {
        let first = BracketGenerator::with_seed(21).generate(&roster(16));
        let second = BracketGenerator::with_seed(21).generate(&roster(16));
        assert_eq!(first, second);

        let mut ids: Vec<MatchId> = first.iter().map(|m| m.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 15);
        assert!(ids.iter().all(|id| id.get_version_num() == 4));
    }

    #[test]
    fn test_seed_ties_keep_roster_order() {
        let roster = vec![
            Participant::new(10, "A").with_seed(2),
            Participant::new(11, "B").with_seed(1),
            Participant::new(12, "C").with_seed(2),
            Participant::new(13, "D"),
        ];
        let matches = BracketGenerator::with_seed(8).generate(&roster);

        // Order: 11, 10, 12, 13 -> slots 0, 3, 2, 1
        let m1 = find(&matches, 1, 1);
        assert_eq!((m1.slot_a, m1.slot_b), (Some(11), Some(13)));
        let m2 = find(&matches, 1, 2);
        assert_eq!((m2.slot_a, m2.slot_b), (Some(12), Some(10)));
    }

    #[test]
    fn test_two_walkovers_meet_in_pending_match() {
        let walkover = |id: u128, number: u32, entrant: i64| {
            let mut m = Match::placeholder(uuid::Uuid::from_u128(id), 1, number);
            m.slot_a = Some(entrant);
            m.status = MatchStatus::Bye;
            m.winner_id = Some(entrant);
            m
        };
        let contested = |id: u128, number: u32, a: i64, b: i64| {
            let mut m = Match::placeholder(uuid::Uuid::from_u128(id), 1, number);
            m.slot_a = Some(a);
            m.slot_b = Some(b);
            m
        };
        let mut matches = vec![
            walkover(1, 1, 10),
            walkover(2, 2, 20),
            contested(3, 3, 30, 40),
            contested(4, 4, 50, 60),
            Match::placeholder(uuid::Uuid::from_u128(5), 2, 1),
            Match::placeholder(uuid::Uuid::from_u128(6), 2, 2),
            Match::placeholder(uuid::Uuid::from_u128(7), 3, 1),
        ];

        assert_eq!(resolve_byes(&mut matches), 2);

        let r2m1 = find(&matches, 2, 1);
        assert_eq!((r2m1.slot_a, r2m1.slot_b), (Some(10), Some(20)));
        assert_eq!(r2m1.status, MatchStatus::Pending);
        assert_eq!(r2m1.winner_id, None);

        let r2m2 = find(&matches, 2, 2);
        assert_eq!((r2m2.entrant_count(), r2m2.status), (0, MatchStatus::Pending));

        let final_match = find(&matches, 3, 1);
        assert_eq!(final_match.entrant_count(), 0);
        assert_eq!(final_match.status, MatchStatus::Pending);
    }
}
