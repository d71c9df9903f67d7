//! Command implementations over a JSON bracket file.

use std::{fs, path::Path, sync::Arc};

use anyhow::Error;
use bracket_engine::{
    InMemoryMatchRepository,
    bracket::{
        BracketManager, CategoryId, Match, MatchId, OrderOfPlayRow, Participant, ParticipantId,
        ScheduleConfig, order_of_play,
    },
};
use log::info;
use serde::{Deserialize, Serialize};

/// Category used when a roster file carries none
pub const DEFAULT_CATEGORY: CategoryId = 1;

/// Everything the tool persists for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketFile {
    pub category_id: CategoryId,
    pub participants: Vec<Participant>,
    pub matches: Vec<Match>,
}

impl BracketFile {
    /// Read a bracket file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    /// Write a bracket file
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))
    }

    fn manager(&self, rng_seed: Option<u64>) -> BracketManager {
        let repo = Arc::new(InMemoryMatchRepository::with_matches(
            self.category_id,
            self.matches.clone(),
        ));
        match rng_seed {
            Some(seed) => BracketManager::with_seed(repo, seed),
            None => BracketManager::new(repo),
        }
    }
}

/// Read a roster file (a JSON array of participants)
pub fn load_roster(path: &Path) -> Result<Vec<Participant>, Error> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("Failed to parse roster: {}", e))
}

/// Draw a new bracket from a roster
pub async fn generate(
    participants: Vec<Participant>,
    category_id: CategoryId,
    rng_seed: Option<u64>,
) -> Result<BracketFile, Error> {
    let mut file = BracketFile {
        category_id,
        participants,
        matches: Vec::new(),
    };
    let manager = file.manager(rng_seed);

    file.matches = manager
        .generate_bracket(category_id, &file.participants)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.client_message()))?;

    info!(
        "Drew {} participants into {} matches",
        file.participants.len(),
        file.matches.len()
    );
    Ok(file)
}

/// Assign order of play to every contested match
pub async fn schedule(file: &mut BracketFile, config: &ScheduleConfig) -> Result<usize, Error> {
    let manager = file.manager(None);
    let entries = manager
        .auto_schedule(file.category_id, config)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.client_message()))?;

    file.matches = manager.bracket(file.category_id).await?.into_matches();
    Ok(entries.len())
}

/// Record a result and advance the winner
pub async fn winner(
    file: &mut BracketFile,
    match_id: MatchId,
    winner_id: ParticipantId,
) -> Result<Option<ParticipantId>, Error> {
    let manager = file.manager(None);
    manager
        .record_winner(file.category_id, match_id, winner_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.client_message()))?;

    let bracket = manager.bracket(file.category_id).await?;
    let champion = bracket.champion();
    file.matches = bracket.into_matches();
    Ok(champion)
}

/// Order of play rows for display
pub fn show(file: &BracketFile) -> Vec<OrderOfPlayRow> {
    let bracket = bracket_engine::Bracket::from_matches(file.matches.clone());
    order_of_play(&bracket, &file.participants)
}

/// Render order of play rows as a plain text table
pub fn render_table(rows: &[OrderOfPlayRow]) -> String {
    let mut out = format!(
        "{:<6} {:<14} {:<5} {:<17} {:<20} {:<20} {:<20} {}\n",
        "No", "Round", "Area", "Start", "Entrant A", "Entrant B", "Winner", "Status"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<6} {:<14} {:<5} {:<17} {:<20} {:<20} {:<20} {}\n",
            row.sequence_number.map_or("-".to_string(), |n| n.to_string()),
            row.round_label,
            row.area_index.map_or("-".to_string(), |a| a.to_string()),
            row.start_time
                .map_or("-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
            row.slot_a,
            row.slot_b,
            row.winner.as_deref().unwrap_or("-"),
            row.status
        ));
    }
    out
}
