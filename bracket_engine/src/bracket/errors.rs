//! Bracket error types.

use super::models::{MatchId, ParticipantId};
use thiserror::Error;

/// Bracket errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    /// Not enough entrants to draw a bracket
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// Winner is not an entrant of the match
    #[error("Invalid winner {winner_id} for match {match_id}")]
    InvalidWinner {
        match_id: MatchId,
        winner_id: ParticipantId,
    },

    /// Match is not part of the supplied snapshot
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// An empty slot of the match is still fed by an undecided match
    #[error("Match {0} is waiting on an undecided earlier match")]
    MatchNotReady(MatchId),

    /// Scheduling parameters out of range
    #[error("Invalid schedule configuration: {0}")]
    InvalidScheduleConfig(String),
}

impl BracketError {
    /// Get a message that is safe to show to the person operating the bracket
    ///
    /// Internal identifiers are left out since the UI shows names, not IDs.
    pub fn client_message(&self) -> String {
        match self {
            BracketError::InsufficientParticipants { needed, .. } => {
                format!("At least {needed} participants are needed to generate a bracket")
            }
            BracketError::InvalidWinner { .. } => {
                "The selected winner is not an entrant of this match".to_string()
            }
            BracketError::MatchNotFound(_) => "Match not found".to_string(),
            BracketError::MatchNotReady(_) => {
                "This match is still waiting for an earlier result".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
