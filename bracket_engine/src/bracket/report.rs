//! Order-of-play listing for printed match sheets.

use super::models::{Bracket, MatchStatus, Participant, ParticipantId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name shown for an empty slot
pub const BYE_LABEL: &str = "BYE";

/// Name shown for an ID missing from the roster
pub const UNKNOWN_LABEL: &str = "-";

/// Human-readable round name
///
/// The last three rounds are named, earlier ones are numbered.
pub fn round_label(round: u32, total_rounds: u32) -> String {
    match total_rounds.checked_sub(round) {
        Some(0) => "Final".to_string(),
        Some(1) => "Semi Final".to_string(),
        Some(2) => "Quarter Final".to_string(),
        _ => format!("Round {round}"),
    }
}

/// One line of the order of play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOfPlayRow {
    pub sequence_number: Option<u32>,
    pub round_label: String,
    pub area_index: Option<u32>,
    pub start_time: Option<NaiveDateTime>,
    pub slot_a: String,
    pub slot_b: String,
    pub winner: Option<String>,
    pub status: MatchStatus,
}

/// List every contested match with entrant names
///
/// Byes are left out. Scheduled matches come first in order of play,
/// unscheduled ones follow by round and match number.
pub fn order_of_play(bracket: &Bracket, participants: &[Participant]) -> Vec<OrderOfPlayRow> {
    let names: HashMap<ParticipantId, &str> = participants
        .iter()
        .map(|p| (p.id, p.display_name.as_str()))
        .collect();
    let name_of = |id: Option<ParticipantId>| match id {
        Some(id) => names.get(&id).copied().unwrap_or(UNKNOWN_LABEL).to_string(),
        None => BYE_LABEL.to_string(),
    };

    let total_rounds = bracket.total_rounds();
    let mut contested: Vec<_> = bracket
        .matches()
        .iter()
        .filter(|m| m.status != MatchStatus::Bye)
        .collect();
    contested.sort_by_key(|m| (m.sequence_number.unwrap_or(u32::MAX), m.round, m.match_number));

    contested
        .into_iter()
        .map(|m| OrderOfPlayRow {
            sequence_number: m.sequence_number,
            round_label: round_label(m.round, total_rounds),
            area_index: m.area_index,
            start_time: m.start_time,
            slot_a: name_of(m.slot_a),
            slot_b: name_of(m.slot_b),
            winner: m.winner_id.map(|id| name_of(Some(id))),
            status: m.status,
        })
        .collect()
}
