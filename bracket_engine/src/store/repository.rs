//! Repository trait for match records, with an in-memory implementation.
//!
//! The record store is owned by the surrounding application; the engine only
//! needs the handful of operations below.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::bracket::{
    BracketError, BracketResult, CategoryId, Match, MatchUpdate, ScheduleEntry, apply_schedule,
    apply_updates,
};

/// Trait for match record operations
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// All matches of a category (empty when no bracket exists)
    async fn list_matches(&self, category_id: CategoryId) -> BracketResult<Vec<Match>>;

    /// Delete every match of a category and insert `matches` as one unit
    async fn replace_matches(&self, category_id: CategoryId, matches: Vec<Match>)
    -> BracketResult<()>;

    /// Apply point updates as one unit
    async fn apply_updates(
        &self,
        category_id: CategoryId,
        updates: &[MatchUpdate],
    ) -> BracketResult<()>;

    /// Store scheduling annotations as one unit
    async fn apply_schedule(
        &self,
        category_id: CategoryId,
        entries: &[ScheduleEntry],
    ) -> BracketResult<()>;

    /// Delete every match of a category, returning how many were removed
    async fn delete_matches(&self, category_id: CategoryId) -> BracketResult<usize>;
}

/// In-memory implementation of `MatchRepository`
///
/// Writes for a category happen under one write lock, and every update is
/// validated before any record changes.
#[derive(Clone, Default)]
pub struct InMemoryMatchRepository {
    categories: Arc<RwLock<HashMap<CategoryId, Vec<Match>>>>,
}

impl InMemoryMatchRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding one existing bracket
    pub fn with_matches(category_id: CategoryId, matches: Vec<Match>) -> Self {
        let mut categories = HashMap::new();
        categories.insert(category_id, matches);
        Self {
            categories: Arc::new(RwLock::new(categories)),
        }
    }

    /// Number of categories with a bracket
    pub async fn category_count(&self) -> usize {
        self.categories.read().await.len()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn list_matches(&self, category_id: CategoryId) -> BracketResult<Vec<Match>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&category_id).cloned().unwrap_or_default())
    }

    async fn replace_matches(
        &self,
        category_id: CategoryId,
        matches: Vec<Match>,
    ) -> BracketResult<()> {
        let mut categories = self.categories.write().await;
        let previous = categories.insert(category_id, matches);
        log::debug!(
            "Replaced {} match(es) for category {}",
            previous.map_or(0, |m| m.len()),
            category_id
        );
        Ok(())
    }

    async fn apply_updates(
        &self,
        category_id: CategoryId,
        updates: &[MatchUpdate],
    ) -> BracketResult<()> {
        let mut categories = self.categories.write().await;
        let Some(matches) = categories.get_mut(&category_id) else {
            return match updates.first() {
                Some(update) => Err(BracketError::MatchNotFound(update.match_id)),
                None => Ok(()),
            };
        };
        apply_updates(matches, updates)
    }

    async fn apply_schedule(
        &self,
        category_id: CategoryId,
        entries: &[ScheduleEntry],
    ) -> BracketResult<()> {
        let mut categories = self.categories.write().await;
        let Some(matches) = categories.get_mut(&category_id) else {
            return match entries.first() {
                Some(entry) => Err(BracketError::MatchNotFound(entry.match_id)),
                None => Ok(()),
            };
        };
        apply_schedule(matches, entries)
    }

    async fn delete_matches(&self, category_id: CategoryId) -> BracketResult<usize> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&category_id).map_or(0, |m| m.len()))
    }
}
