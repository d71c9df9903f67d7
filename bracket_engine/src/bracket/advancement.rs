//! Winner recording and propagation into the next round.

use super::{
    errors::{BracketError, BracketResult},
    models::{
        Match, MatchChange, MatchId, MatchStatus, MatchUpdate, ParticipantId, SlotPosition,
        total_rounds,
    },
};

/// Record the winner of a match
///
/// The winner moves one round forward: into slot A of the next match when
/// the match number is odd, slot B when even. If the other slot of that
/// match is still empty it becomes a bye already won by the advancing
/// entrant; confirming that bye later moves the entrant on by one more round.
/// A provisional bye whose other slot has since been filled is reopened.
///
/// A match cannot be decided while one of its empty slots is still fed by a
/// pending match, since that match's winner has yet to arrive.
///
/// Calling this twice with the same arguments produces the same updates.
///
/// # Arguments
///
/// * `matches` - Snapshot of every match in the category
/// * `match_id` - Match being decided
/// * `winner_id` - Winning entrant, must occupy one of the match slots
///
/// # Returns
///
/// * `BracketResult<Vec<MatchUpdate>>` - Updates to apply, decided match first
pub fn record_winner(
    matches: &[Match],
    match_id: MatchId,
    winner_id: ParticipantId,
) -> BracketResult<Vec<MatchUpdate>> {
    let decided = matches
        .iter()
        .find(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;

    if !decided.has_entrant(winner_id) {
        return Err(BracketError::InvalidWinner {
            match_id,
            winner_id,
        });
    }

    if awaits_feeder(matches, decided) {
        return Err(BracketError::MatchNotReady(match_id));
    }

    let mut updates = vec![MatchUpdate::new(
        match_id,
        vec![
            MatchChange::Winner(Some(winner_id)),
            MatchChange::Status(MatchStatus::Completed),
        ],
    )];

    if decided.round >= total_rounds(matches) {
        log::info!("Final decided: participant {} wins", winner_id);
        return Ok(updates);
    }

    let (next_round, next_number) = decided.next_position();
    let Some(next) = matches
        .iter()
        .find(|m| m.round == next_round && m.match_number == next_number)
    else {
        log::warn!(
            "Match {} has no successor at round {} match {}",
            match_id,
            next_round,
            next_number
        );
        return Ok(updates);
    };

    let slot = SlotPosition::for_feeder(decided.match_number);
    let mut changes = vec![MatchChange::Slot(slot, winner_id)];
    match next.slot(slot.other()) {
        None => {
            changes.push(MatchChange::Status(MatchStatus::Bye));
            changes.push(MatchChange::Winner(Some(winner_id)));
        }
        Some(_) if next.status == MatchStatus::Bye => {
            changes.push(MatchChange::Status(MatchStatus::Pending));
            changes.push(MatchChange::Winner(None));
        }
        Some(_) => {}
    }
    updates.push(MatchUpdate::new(next.id, changes));

    log::debug!(
        "Participant {} advances to round {} match {}",
        winner_id,
        next_round,
        next_number
    );

    Ok(updates)
}

/// Whether an empty slot of `m` is fed by a match that is still pending
fn awaits_feeder(matches: &[Match], m: &Match) -> bool {
    if m.round <= 1 {
        return false;
    }
    [(SlotPosition::A, 2 * m.match_number - 1), (SlotPosition::B, 2 * m.match_number)]
        .into_iter()
        .filter(|(slot, _)| m.slot(*slot).is_none())
        .any(|(_, feeder)| {
            matches.iter().any(|f| {
                f.round == m.round - 1
                    && f.match_number == feeder
                    && f.status == MatchStatus::Pending
            })
        })
}

/// Apply updates to a match snapshot
///
/// Every target is checked before anything changes, so a failed call leaves
/// the snapshot untouched.
pub fn apply_updates(matches: &mut [Match], updates: &[MatchUpdate]) -> BracketResult<()> {
    let mut targets = Vec::with_capacity(updates.len());
    for update in updates {
        let idx = matches
            .iter()
            .position(|m| m.id == update.match_id)
            .ok_or(BracketError::MatchNotFound(update.match_id))?;
        targets.push(idx);
    }

    for (idx, update) in targets.into_iter().zip(updates) {
        for change in &update.changes {
            matches[idx].apply(change);
        }
    }

    Ok(())
}
