//! Bracket data models for single-elimination categories.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Participant ID type (owned by the roster store)
pub type ParticipantId = i64;

/// Match ID type
pub type MatchId = Uuid;

/// Competition category ID type
pub type CategoryId = i64;

/// A roster entry taking part in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant ID
    pub id: ParticipantId,
    /// Name shown on the bracket
    pub display_name: String,
    /// Club or branch affiliation
    pub club: Option<String>,
    /// Training unit affiliation
    pub training_unit: Option<String>,
    /// Seed rank (1 is strongest, `None` or 0 means unseeded)
    pub seed_number: Option<u32>,
}

impl Participant {
    /// Create an unseeded participant without affiliation
    pub fn new(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            club: None,
            training_unit: None,
            seed_number: None,
        }
    }

    /// Set the club and training unit
    pub fn with_affiliation(mut self, club: &str, training_unit: &str) -> Self {
        self.club = Some(club.to_string());
        self.training_unit = Some(training_unit.to_string());
        self
    }

    /// Set the seed rank
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed_number = Some(seed);
        self
    }

    /// Whether this participant holds a positive seed rank
    pub fn is_seeded(&self) -> bool {
        self.seed_number.is_some_and(|seed| seed > 0)
    }

    /// Grouping key used to keep club mates apart in round 1
    pub fn affiliation_key(&self) -> String {
        format!(
            "{}|{}",
            self.club.as_deref().unwrap_or(""),
            self.training_unit.as_deref().unwrap_or("")
        )
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Waiting for entrants or for a result
    Pending,
    /// Fewer than two entrants, no contest takes place
    Bye,
    /// Winner recorded
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Bye => write!(f, "bye"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One of the two entrant slots of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPosition {
    /// Upper slot, fed by the odd-numbered match of the previous round
    A,
    /// Lower slot, fed by the even-numbered match of the previous round
    B,
}

impl SlotPosition {
    /// Slot a winner of `match_number` moves into in the next round
    pub fn for_feeder(match_number: u32) -> Self {
        if match_number % 2 == 1 {
            SlotPosition::A
        } else {
            SlotPosition::B
        }
    }

    /// The opposite slot
    pub fn other(self) -> Self {
        match self {
            SlotPosition::A => SlotPosition::B,
            SlotPosition::B => SlotPosition::A,
        }
    }
}

/// A single contest in the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID
    pub id: MatchId,
    /// Round number (1-indexed, 1 is the first round)
    pub round: u32,
    /// Match number within the round (1-indexed)
    pub match_number: u32,
    /// Upper entrant
    pub slot_a: Option<ParticipantId>,
    /// Lower entrant
    pub slot_b: Option<ParticipantId>,
    /// Winner, once known
    pub winner_id: Option<ParticipantId>,
    /// Current status
    pub status: MatchStatus,
    /// Order of play (1-indexed), set by the scheduler
    pub sequence_number: Option<u32>,
    /// Playing area (1-indexed), set by the scheduler
    pub area_index: Option<u32>,
    /// Local start time at the venue, set by the scheduler
    pub start_time: Option<NaiveDateTime>,
}

impl Match {
    /// Create an empty pending match
    pub fn placeholder(id: MatchId, round: u32, match_number: u32) -> Self {
        Self {
            id,
            round,
            match_number,
            slot_a: None,
            slot_b: None,
            winner_id: None,
            status: MatchStatus::Pending,
            sequence_number: None,
            area_index: None,
            start_time: None,
        }
    }

    /// Entrant in the given slot
    pub fn slot(&self, position: SlotPosition) -> Option<ParticipantId> {
        match position {
            SlotPosition::A => self.slot_a,
            SlotPosition::B => self.slot_b,
        }
    }

    /// Whether `participant_id` occupies either slot
    pub fn has_entrant(&self, participant_id: ParticipantId) -> bool {
        self.slot_a == Some(participant_id) || self.slot_b == Some(participant_id)
    }

    /// Number of occupied slots
    pub fn entrant_count(&self) -> usize {
        usize::from(self.slot_a.is_some()) + usize::from(self.slot_b.is_some())
    }

    /// The only entrant, if exactly one slot is occupied
    pub fn sole_entrant(&self) -> Option<ParticipantId> {
        match (self.slot_a, self.slot_b) {
            (Some(id), None) | (None, Some(id)) => Some(id),
            _ => None,
        }
    }

    /// Round and match number of the match this one's winner advances into
    pub fn next_position(&self) -> (u32, u32) {
        (self.round + 1, self.match_number.div_ceil(2))
    }

    /// Apply a single change
    pub fn apply(&mut self, change: &MatchChange) {
        match *change {
            MatchChange::Slot(SlotPosition::A, id) => self.slot_a = Some(id),
            MatchChange::Slot(SlotPosition::B, id) => self.slot_b = Some(id),
            MatchChange::Winner(winner) => self.winner_id = winner,
            MatchChange::Status(status) => self.status = status,
        }
    }
}

/// A field-level change to a persisted match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum MatchChange {
    /// Place an entrant into a slot
    Slot(SlotPosition, ParticipantId),
    /// Set or clear the winner
    Winner(Option<ParticipantId>),
    /// Set the status
    Status(MatchStatus),
}

/// Point update for one match, applied by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    /// Target match
    pub match_id: MatchId,
    /// Changes in application order
    pub changes: Vec<MatchChange>,
}

impl MatchUpdate {
    /// Create an update for `match_id`
    pub fn new(match_id: MatchId, changes: Vec<MatchChange>) -> Self {
        Self { match_id, changes }
    }
}

/// Scheduling annotation for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Target match
    pub match_id: MatchId,
    /// Order of play (1-indexed)
    pub sequence_number: u32,
    /// Playing area (1-indexed)
    pub area_index: u32,
    /// Local start time
    pub start_time: NaiveDateTime,
}

/// Read view over the full match set of one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    matches: Vec<Match>,
}

impl Bracket {
    /// Build a view, ordering matches by round then match number
    pub fn from_matches(mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(|m| (m.round, m.match_number));
        Self { matches }
    }

    /// All matches, ordered by round then match number
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Consume the view
    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }

    /// Whether no bracket has been generated
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of rounds (0 when empty)
    pub fn total_rounds(&self) -> u32 {
        total_rounds(&self.matches)
    }

    /// Number of first-round slots (0 when empty)
    pub fn bracket_size(&self) -> usize {
        match self.total_rounds() {
            0 => 0,
            rounds => 1 << rounds,
        }
    }

    /// Matches of one round
    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Find a match by ID
    pub fn find(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    /// Winner of the final, once it has been decided
    pub fn champion(&self) -> Option<ParticipantId> {
        let total = self.total_rounds();
        self.round(total)
            .find(|m| m.match_number == 1)
            .filter(|m| m.status == MatchStatus::Completed)
            .and_then(|m| m.winner_id)
    }
}

/// Highest round present in a match set
pub fn total_rounds(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.round).max().unwrap_or(0)
}
