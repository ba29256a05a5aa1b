//! Knockout: single elimination bracket with byes and advancement links.
//!
//! First round positions follow standard seeding (1 v 8, 4 v 5, 2 v 7, 3 v 6 for
//! eight teams), so the top two seeds can only meet in the Final. When the team
//! count is not a power of two, the seeds that would face a missing opponent get
//! a bye: they are written straight into their second round slot and no match is
//! created for them. That is always the first `byes` seeds.

use crate::models::{DraftMatch, Slot, TeamId, ValidationError};

/// What fills one slot of the next round: a drafted match's winner, or a team on a bye.
#[derive(Clone, Copy, Debug)]
enum Feeder {
    Match(usize),
    Bye(TeamId),
}

/// Smallest power of two that fits `teams` entrants.
pub fn bracket_size(teams: usize) -> usize {
    teams.next_power_of_two()
}

/// 1-based seeds in bracket position order. Consecutive pairs meet in the first round.
///
/// `seed_positions(8)` is `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn seed_positions(size: usize) -> Vec<usize> {
    let mut positions = vec![1];
    while positions.len() < size {
        let n = positions.len() * 2;
        positions = positions.iter().flat_map(|&s| [s, n + 1 - s]).collect();
    }
    positions
}

/// Label for a round (0-based) of a bracket with `total_rounds` rounds,
/// counted back from the Final.
pub fn round_label(round: usize, total_rounds: usize) -> String {
    match total_rounds - round {
        1 => "Final".to_string(),
        2 => "Semi Final".to_string(),
        3 => "Quarter Final".to_string(),
        _ => format!("Round {}", round + 1),
    }
}

/// Build the whole bracket for `teams` (seed order).
///
/// Drafts come out round by round; within a round in bracket position order.
/// Every match but the Final links to the later match its winner feeds, and match
/// `i` of a round feeds match `i / 2` of the next (home slot for even `i`).
pub fn build_knockout(teams: &[TeamId]) -> Result<Vec<DraftMatch>, ValidationError> {
    let n = teams.len();
    if n < 2 {
        return Err(ValidationError::InsufficientTeams { found: n });
    }
    let size = bracket_size(n);
    let total_rounds = size.trailing_zeros() as usize;
    let byes = size - n;
    log::debug!("Knockout bracket: {n} teams, size {size}, {byes} byes, {total_rounds} rounds");

    let mut drafts: Vec<DraftMatch> = Vec::with_capacity(size - 1);

    let label = round_label(0, total_rounds);
    let mut feeders: Vec<Feeder> = seed_positions(size)
        .chunks_exact(2)
        .map(|pair| {
            let (high, low) = (pair[0], pair[1]);
            if low > n {
                Feeder::Bye(teams[high - 1])
            } else {
                drafts.push(DraftMatch::fixture(&label, teams[high - 1], teams[low - 1]));
                Feeder::Match(drafts.len() - 1)
            }
        })
        .collect();

    for round in 1..total_rounds {
        let label = round_label(round, total_rounds);
        let first = drafts.len();
        let count = feeders.len() / 2;
        drafts.extend((0..count).map(|_| DraftMatch::shell(&label)));

        for (i, feeder) in feeders.iter().enumerate() {
            let target = first + i / 2;
            match *feeder {
                Feeder::Match(idx) => drafts[idx].next = Some(target),
                Feeder::Bye(team) => {
                    let slot = if i % 2 == 0 { Slot::Home } else { Slot::Away };
                    *drafts[target].slot_mut(slot) = Some(team);
                }
            }
        }
        feeders = (first..first + count).map(Feeder::Match).collect();
    }

    Ok(drafts)
}
