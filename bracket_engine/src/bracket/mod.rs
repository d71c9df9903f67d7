//! Single-elimination bracket module.
//!
//! This module provides the bracket engine for one competition category:
//! - Seed placement for power-of-two draws
//! - Club separation for unseeded entrants
//! - Bracket generation with bye cascading
//! - Winner recording and advancement
//! - Automatic order of play across playing areas
//! - Order-of-play listing for match sheets
//!
//! ## Example
//!
//! ```
//! use bracket_engine::bracket::{BracketGenerator, Participant, record_winner};
//!
//! let roster = vec![
//!     Participant::new(1, "Ayu").with_seed(1),
//!     Participant::new(2, "Bima").with_affiliation("Sleman", "Unit 2"),
//!     Participant::new(3, "Citra").with_affiliation("Bantul", "Unit 1"),
//! ];
//!
//! let matches = BracketGenerator::with_seed(42).generate(&roster);
//! assert_eq!(matches.len(), 3);
//!
//! // Seed 1 has a bye and already waits in the final
//! let opening = matches.iter().find(|m| m.round == 1 && m.match_number == 2).unwrap();
//! let winner = opening.slot_a.unwrap();
//! let updates = record_winner(&matches, opening.id, winner).unwrap();
//! assert_eq!(updates.len(), 2);
//! ```

pub mod advancement;
pub mod arrangement;
pub mod errors;
pub mod generator;
pub mod manager;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod seeding;

pub use advancement::{apply_updates, record_winner};
pub use arrangement::ClubSeparator;
pub use errors::{BracketError, BracketResult};
pub use generator::{BracketGenerator, MIN_PARTICIPANTS, generate_bracket, resolve_byes};
pub use manager::BracketManager;
pub use models::{
    Bracket, CategoryId, Match, MatchChange, MatchId, MatchStatus, MatchUpdate, Participant,
    ParticipantId, ScheduleEntry, SlotPosition,
};
pub use report::{OrderOfPlayRow, order_of_play, round_label};
pub use scheduler::{ScheduleConfig, apply_schedule, schedule};
pub use seeding::{next_power_of_two, round_count, seed_positions};
