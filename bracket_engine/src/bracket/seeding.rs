//! Seed placement for power-of-two draws.

/// Smallest power of two that is `>= n` (1 for `n <= 1`)
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Number of rounds needed for `participant_count` entrants
pub fn round_count(participant_count: usize) -> u32 {
    next_power_of_two(participant_count).trailing_zeros()
}

/// Slot order by seed rank
///
/// Element `i` of the result is the 0-indexed slot the `i`-th ranked entrant
/// occupies. Built by repeatedly doubling `[0, 1]`, replacing each position
/// `p` with `2p` and `2 * size - 1 - 2p`. Seed 1 always takes the first slot
/// and seed 2 the last, so the two can only meet in the final.
///
/// # Arguments
///
/// * `bracket_size` - Number of slots, a power of two
pub fn seed_positions(bracket_size: usize) -> Vec<usize> {
    debug_assert!(bracket_size.is_power_of_two());

    if bracket_size <= 1 {
        return vec![0];
    }

    let mut positions = vec![0, 1];
    let mut size = 2;
    while size < bracket_size {
        positions = positions
            .iter()
            .flat_map(|&pos| [pos * 2, size * 2 - 1 - pos * 2])
            .collect();
        size *= 2;
    }
    positions
}
