//! Automatic order of play across concurrent playing areas.

use super::{
    errors::{BracketError, BracketResult},
    models::{Match, MatchStatus, ScheduleEntry},
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Default first call of the day
pub const DEFAULT_START_HOUR: u32 = 8;

/// Default length of one contest slot
pub const DEFAULT_MATCH_DURATION_MINUTES: u32 = 20;

/// Scheduling parameters for one competition day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of areas running contests at the same time
    pub area_count: u32,
    /// Minutes reserved per contest
    pub match_duration_minutes: u32,
    /// Competition day
    pub start_date: NaiveDate,
    /// First call of the day
    pub start_time: NaiveTime,
}

impl ScheduleConfig {
    /// Create a configuration starting at 08:00
    pub fn new(area_count: u32, match_duration_minutes: u32, start_date: NaiveDate) -> Self {
        Self {
            area_count,
            match_duration_minutes,
            start_date,
            start_time: NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Override the first call of the day
    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self
    }

    /// Check area count and duration
    pub fn validate(&self) -> BracketResult<()> {
        if self.area_count == 0 {
            return Err(BracketError::InvalidScheduleConfig(
                "area count must be at least 1".to_string(),
            ));
        }
        if self.match_duration_minutes == 0 {
            return Err(BracketError::InvalidScheduleConfig(
                "match duration must be greater than 0 minutes".to_string(),
            ));
        }
        Ok(())
    }

    /// Start of the first time slot
    pub fn first_call(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }
}

/// Assign order of play, area and start time to every contested match
///
/// Byes are skipped. The rest are taken by round, then match number, and
/// dealt across areas in turn; each full pass over the areas starts one
/// slot later. Dependencies between rounds are not modelled.
///
/// # Arguments
///
/// * `matches` - Snapshot of every match in the category
/// * `config` - Scheduling parameters
///
/// # Returns
///
/// * `BracketResult<Vec<ScheduleEntry>>` - One entry per scheduled match, in
///   order of play
pub fn schedule(matches: &[Match], config: &ScheduleConfig) -> BracketResult<Vec<ScheduleEntry>> {
    config.validate()?;

    let mut contested: Vec<&Match> = matches
        .iter()
        .filter(|m| m.status != MatchStatus::Bye)
        .collect();
    contested.sort_by_key(|m| (m.round, m.match_number));

    let first_call = config.first_call();
    let slot_length = Duration::minutes(i64::from(config.match_duration_minutes));

    let entries: Vec<ScheduleEntry> = contested
        .iter()
        .enumerate()
        .map(|(k, m)| {
            let k = k as u32;
            let time_slot = k / config.area_count;
            ScheduleEntry {
                match_id: m.id,
                sequence_number: k + 1,
                area_index: k % config.area_count + 1,
                start_time: first_call + slot_length * time_slot as i32,
            }
        })
        .collect();

    log::info!(
        "Scheduled {} matches over {} area(s), last call at {}",
        entries.len(),
        config.area_count,
        entries
            .last()
            .map(|e| e.start_time.to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    Ok(entries)
}

/// Apply schedule entries to a match snapshot
///
/// Every target is checked before anything changes.
pub fn apply_schedule(matches: &mut [Match], entries: &[ScheduleEntry]) -> BracketResult<()> {
    let mut targets = Vec::with_capacity(entries.len());
    for entry in entries {
        let idx = matches
            .iter()
            .position(|m| m.id == entry.match_id)
            .ok_or(BracketError::MatchNotFound(entry.match_id))?;
        targets.push(idx);
    }

    for (idx, entry) in targets.into_iter().zip(entries) {
        let m = &mut matches[idx];
        m.sequence_number = Some(entry.sequence_number);
        m.area_index = Some(entry.area_index);
        m.start_time = Some(entry.start_time);
    }

    Ok(())
}
