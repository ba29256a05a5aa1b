//! Round robin and league schedules using the circle method.

use crate::models::{DraftMatch, TeamId, ValidationError};

/// Pairings per round, `(home, away)`, for a single round robin.
///
/// With an odd team count an empty seat is added; whoever draws it sits the
/// round out. Position 0 stays fixed while the rest rotate one step clockwise
/// per round, and position `i` meets position `count - 1 - i`. The fixed team
/// alternates home and away from round to round.
pub fn circle_rounds(teams: &[TeamId]) -> Vec<Vec<(TeamId, TeamId)>> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let mut seats: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let count = seats.len();

    let mut rounds = Vec::with_capacity(count - 1);
    for round in 0..count - 1 {
        let pairs = (0..count / 2)
            .filter_map(|i| match (seats[i], seats[count - 1 - i]) {
                (Some(home), Some(away)) if i == 0 && round % 2 == 1 => Some((away, home)),
                (Some(home), Some(away)) => Some((home, away)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);
        seats[1..].rotate_right(1);
    }
    rounds
}

/// Draft a round robin with custom round labels (`label` gets the 1-based round number).
///
/// `double_round` plays the whole schedule a second time with home and away
/// swapped, numbering those rounds on from the first leg.
pub fn build_round_robin_with(
    teams: &[TeamId],
    double_round: bool,
    label: impl Fn(usize) -> String,
) -> Result<Vec<DraftMatch>, ValidationError> {
    if teams.len() < 2 {
        return Err(ValidationError::InsufficientTeams { found: teams.len() });
    }
    let first_leg = circle_rounds(teams);
    let second_leg: Vec<Vec<(TeamId, TeamId)>> = if double_round {
        first_leg
            .iter()
            .map(|pairs| pairs.iter().map(|&(home, away)| (away, home)).collect())
            .collect()
    } else {
        Vec::new()
    };
    log::debug!(
        "Round robin: {} teams, {} rounds",
        teams.len(),
        first_leg.len() + second_leg.len()
    );

    let drafts: Vec<DraftMatch> = first_leg
        .iter()
        .chain(second_leg.iter())
        .enumerate()
        .flat_map(|(round, pairs)| {
            let round_label = label(round + 1);
            pairs
                .iter()
                .map(move |&(home, away)| DraftMatch::fixture(round_label.clone(), home, away))
        })
        .collect();
    Ok(drafts)
}

/// Draft a round robin (`double_round = false`) or league (`true`) labelled "Round 1".."Round M".
pub fn build_round_robin(
    teams: &[TeamId],
    double_round: bool,
) -> Result<Vec<DraftMatch>, ValidationError> {
    build_round_robin_with(teams, double_round, |round| format!("Round {round}"))
}
