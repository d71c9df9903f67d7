//! # Bracket Engine
//!
//! A single-elimination tournament engine for martial arts style
//! competitions, where each category is drawn, fought and scheduled
//! independently.
//!
//! The engine works on in-memory snapshots of a category's matches and
//! returns either a freshly generated match set or a list of updates for the
//! record store to apply. It holds no global state.
//!
//! ## Flow
//!
//! - **Generate**: roster in, every match of every round out, byes already
//!   carried forward
//! - **Schedule**: order of play, area and start time for each contested match
//! - **Advance**: record a result, move the winner into the next round
//!
//! ## Core Modules
//!
//! - [`bracket`]: Seeding, club separation, generation, advancement and scheduling
//! - [`store`]: Repository seam for match records

/// Bracket generation, advancement and scheduling.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketGenerator, BracketManager, BracketResult, Match, MatchStatus,
    Participant, ScheduleConfig,
};

/// Match record storage.
pub mod store;
pub use store::{InMemoryMatchRepository, MatchRepository};
