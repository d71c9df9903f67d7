//! Integration tests for the bracket lifecycle
//!
//! These tests drive a category from roster through generation, scheduling
//! and result entry until a champion is known.

use bracket_engine::{
    InMemoryMatchRepository, MatchRepository,
    bracket::{
        Bracket, BracketManager, Match, MatchStatus, Participant, ScheduleConfig, order_of_play,
    },
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

const CATEGORY: i64 = 12;

fn roster(n: i64) -> Vec<Participant> {
    let clubs = ["Sleman", "Bantul", "Kulon Progo"];
    (1..=n)
        .map(|id| {
            Participant::new(id, format!("Athlete {id}"))
                .with_affiliation(clubs[(id as usize) % clubs.len()], "Unit 1")
        })
        .collect()
}

fn find(bracket: &Bracket, round: u32, number: u32) -> &Match {
    bracket
        .round(round)
        .find(|m| m.match_number == number)
        .expect("match should exist")
}

fn competition_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 17).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    competition_day().and_hms_opt(hour, minute, 0).unwrap()
}

/// Decide contested matches first, confirm byes only when nothing else is open
async fn play_out(manager: &BracketManager) -> i64 {
    for _ in 0..64 {
        let bracket = manager.bracket(CATEGORY).await.unwrap();
        if let Some(champion) = bracket.champion() {
            return champion;
        }

        let contested = bracket
            .matches()
            .iter()
            .find(|m| m.status == MatchStatus::Pending && m.entrant_count() == 2);
        let next = contested.or_else(|| {
            bracket.matches().iter().find(|m| {
                m.status == MatchStatus::Bye && m.winner_id.is_some() && m.round > 1
            })
        });

        let m = next.expect("an open match should exist until the final is decided");
        let winner = m.slot_a.or(m.slot_b).unwrap();
        manager.record_winner(CATEGORY, m.id, winner).await.unwrap();
    }
    panic!("bracket did not finish");
}

#[tokio::test]
async fn test_five_participants_end_to_end() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 2025);

    let matches = manager.generate_bracket(CATEGORY, &roster(5)).await.unwrap();
    assert_eq!(matches.len(), 7);

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    assert_eq!(bracket.bracket_size(), 8);
    assert_eq!(bracket.total_rounds(), 3);
    assert_eq!(bracket.round(1).count(), 4);

    // Slots 0, 1, 4, 6 and 7 are filled; three are empty
    let empty_slots: usize = bracket.round(1).map(|m| 2 - m.entrant_count()).sum();
    assert_eq!(empty_slots, 3);

    assert_eq!(find(&bracket, 1, 1).status, MatchStatus::Pending);
    assert_eq!(find(&bracket, 1, 2).status, MatchStatus::Bye);
    assert_eq!(find(&bracket, 1, 2).winner_id, None);
    assert_eq!(find(&bracket, 1, 3).status, MatchStatus::Bye);
    assert_eq!(find(&bracket, 1, 4).status, MatchStatus::Pending);

    // The lone entrant of match 3 already waits in round 2
    let walkover = find(&bracket, 1, 3).winner_id;
    assert!(walkover.is_some());
    assert_eq!(find(&bracket, 2, 2).slot_a, walkover);

    let champion = play_out(&manager).await;
    assert!((1..=5).contains(&champion));

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    let final_match = find(&bracket, 3, 1);
    assert_eq!(final_match.status, MatchStatus::Completed);
    assert_eq!(final_match.entrant_count(), 2);
}

#[tokio::test]
async fn test_schedule_then_order_of_play() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 7);
    let participants = roster(6);
    manager.generate_bracket(CATEGORY, &participants).await.unwrap();

    let config = ScheduleConfig::new(2, 20, competition_day());
    let entries = manager.auto_schedule(CATEGORY, &config).await.unwrap();

    // 8 slots, 6 entrants: 2 round-1 byes, 2 contested round-1 matches, 3 later matches
    assert_eq!(entries.len(), 5);
    let areas: Vec<u32> = entries.iter().map(|e| e.area_index).collect();
    assert_eq!(areas, vec![1, 2, 1, 2, 1]);
    let times: Vec<NaiveDateTime> = entries.iter().map(|e| e.start_time).collect();
    assert_eq!(times, vec![at(8, 0), at(8, 0), at(8, 20), at(8, 20), at(8, 40)]);

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    let rows = order_of_play(&bracket, &participants);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].sequence_number, Some(1));
    assert_eq!(rows[0].round_label, "Quarter Final");
    assert_eq!(rows[4].round_label, "Final");
    assert!(bracket
        .matches()
        .iter()
        .filter(|m| m.status == MatchStatus::Bye)
        .all(|m| m.sequence_number.is_none()));
}

#[tokio::test]
async fn test_regenerate_replaces_previous_bracket() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 3);

    let first = manager.generate_bracket(CATEGORY, &roster(8)).await.unwrap();
    let second = manager.generate_bracket(CATEGORY, &roster(3)).await.unwrap();

    let stored = repo.list_matches(CATEGORY).await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored, second);
    assert!(stored.iter().all(|m| first.iter().all(|f| f.id != m.id)));
}

#[tokio::test]
async fn test_recording_result_twice_keeps_state() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 11);
    manager.generate_bracket(CATEGORY, &roster(8)).await.unwrap();

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    let m3 = find(&bracket, 1, 3).clone();
    let winner = m3.slot_b.unwrap();

    manager.record_winner(CATEGORY, m3.id, winner).await.unwrap();
    let once = repo.list_matches(CATEGORY).await.unwrap();
    manager.record_winner(CATEGORY, m3.id, winner).await.unwrap();
    let twice = repo.list_matches(CATEGORY).await.unwrap();

    assert_eq!(once, twice);
    let bracket = Bracket::from_matches(twice);
    assert_eq!(find(&bracket, 2, 2).slot_a, Some(winner));
}

#[tokio::test]
async fn test_invalid_winner_rejected_without_changes() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 5);
    manager.generate_bracket(CATEGORY, &roster(4)).await.unwrap();

    let before = repo.list_matches(CATEGORY).await.unwrap();
    let m1 = before
        .iter()
        .find(|m| m.round == 1 && m.match_number == 1)
        .unwrap();
    let outsider = (1..=4).find(|id| !m1.has_entrant(*id)).unwrap();

    let err = manager
        .record_winner(CATEGORY, m1.id, outsider)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        bracket_engine::BracketError::InvalidWinner { .. }
    ));
    assert_eq!(repo.list_matches(CATEGORY).await.unwrap(), before);
}

#[tokio::test]
async fn test_final_refused_until_semi_final_decided() {
    let repo = Arc::new(InMemoryMatchRepository::new());
    let manager = BracketManager::with_seed(repo.clone(), 31);
    manager.generate_bracket(CATEGORY, &roster(3)).await.unwrap();

    // Three entrants fill slots 0, 3 and 2, so round 1 match 1 is the walkover
    let bracket = manager.bracket(CATEGORY).await.unwrap();
    let walkover = find(&bracket, 1, 1).clone();
    let lucky = walkover.winner_id.unwrap();
    manager
        .record_winner(CATEGORY, walkover.id, lucky)
        .await
        .unwrap();

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    let final_match = find(&bracket, 2, 1).clone();
    let before = repo.list_matches(CATEGORY).await.unwrap();
    let err = manager
        .record_winner(CATEGORY, final_match.id, lucky)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        bracket_engine::BracketError::MatchNotReady(final_match.id)
    );
    assert_eq!(repo.list_matches(CATEGORY).await.unwrap(), before);
    assert_eq!(Bracket::from_matches(before).champion(), None);

    let semi = find(&bracket, 1, 2).clone();
    let challenger = semi.slot_b.unwrap();
    manager
        .record_winner(CATEGORY, semi.id, challenger)
        .await
        .unwrap();
    manager
        .record_winner(CATEGORY, final_match.id, challenger)
        .await
        .unwrap();

    let bracket = manager.bracket(CATEGORY).await.unwrap();
    assert_eq!(bracket.champion(), Some(challenger));
}
