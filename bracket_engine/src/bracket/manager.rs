//! Bracket manager tying the engine to a match repository.

use super::{
    advancement,
    errors::{BracketError, BracketResult},
    generator::{BracketGenerator, MIN_PARTICIPANTS},
    models::{Bracket, CategoryId, Match, MatchId, MatchUpdate, Participant, ParticipantId, ScheduleEntry},
    scheduler::{self, ScheduleConfig},
};
use crate::store::MatchRepository;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Bracket manager
///
/// Each operation reads a fresh snapshot of the category, computes the
/// result in memory and hands the writes to the repository in one call.
/// Callers are expected to serialize edits per category.
#[derive(Clone)]
pub struct BracketManager {
    repository: Arc<dyn MatchRepository>,
    generator: Arc<Mutex<BracketGenerator>>,
}

impl BracketManager {
    /// Create a bracket manager with a random draw
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            repository,
            generator: Arc::new(Mutex::new(BracketGenerator::new())),
        }
    }

    /// Create a bracket manager with a reproducible draw
    pub fn with_seed(repository: Arc<dyn MatchRepository>, seed: u64) -> Self {
        Self {
            repository,
            generator: Arc::new(Mutex::new(BracketGenerator::with_seed(seed))),
        }
    }

    /// Generate a bracket, replacing any existing one for the category
    ///
    /// With fewer than two participants nothing is replaced and
    /// `InsufficientParticipants` is returned.
    pub async fn generate_bracket(
        &self,
        category_id: CategoryId,
        participants: &[Participant],
    ) -> BracketResult<Vec<Match>> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(BracketError::InsufficientParticipants {
                needed: MIN_PARTICIPANTS,
                current: participants.len(),
            });
        }

        let matches = self.generator.lock().await.generate(participants);
        self.repository
            .replace_matches(category_id, matches.clone())
            .await?;

        log::info!(
            "Generated bracket for category {}: {} participants, {} matches",
            category_id,
            participants.len(),
            matches.len()
        );

        Ok(matches)
    }

    /// Record a match result and advance the winner
    pub async fn record_winner(
        &self,
        category_id: CategoryId,
        match_id: MatchId,
        winner_id: ParticipantId,
    ) -> BracketResult<Vec<MatchUpdate>> {
        let matches = self.repository.list_matches(category_id).await?;
        let updates = advancement::record_winner(&matches, match_id, winner_id)?;
        self.repository
            .apply_updates(category_id, &updates)
            .await?;

        log::info!(
            "Recorded winner {} for match {} in category {}",
            winner_id,
            match_id,
            category_id
        );

        Ok(updates)
    }

    /// Assign order of play, areas and start times
    pub async fn auto_schedule(
        &self,
        category_id: CategoryId,
        config: &ScheduleConfig,
    ) -> BracketResult<Vec<ScheduleEntry>> {
        let matches = self.repository.list_matches(category_id).await?;
        let entries = scheduler::schedule(&matches, config)?;
        self.repository
            .apply_schedule(category_id, &entries)
            .await?;

        Ok(entries)
    }

    /// Load the current bracket of a category
    pub async fn bracket(&self, category_id: CategoryId) -> BracketResult<Bracket> {
        let matches = self.repository.list_matches(category_id).await?;
        Ok(Bracket::from_matches(matches))
    }
}
