//! Edits after generation: date, venue and status, plus results with knockout advancement.

use crate::models::{
    GameMatch, MatchId, MatchStatus, Slot, StoreError, TeamId, TournamentError, ValidationError,
};
use crate::store::ScheduleStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fields a caller may change on a scheduled match. `None` leaves the field as it is.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub status: Option<MatchStatus>,
}

/// Final score of a match. `winner` overrides the score, e.g. after a shoot-out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub winner: Option<TeamId>,
}

fn match_error(match_id: MatchId) -> impl Fn(StoreError) -> TournamentError {
    move |e| match e {
        StoreError::NotFound => TournamentError::MatchNotFound(match_id),
        e => TournamentError::Persistence(e),
    }
}

fn get_match<S: ScheduleStore + ?Sized>(
    store: &S,
    match_id: MatchId,
) -> Result<GameMatch, TournamentError> {
    store
        .get_match(match_id)
        .map_err(match_error(match_id))?
        .ok_or(TournamentError::MatchNotFound(match_id))
}

/// Change date, venue and/or status of one match.
pub fn update_match_details<S: ScheduleStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    details: MatchDetails,
) -> Result<GameMatch, TournamentError> {
    let mut game = get_match(store, match_id)?;
    if let Some(at) = details.scheduled_at {
        game.scheduled_at = Some(at);
    }
    if let Some(venue) = details.venue {
        let venue = venue.trim();
        game.venue = (!venue.is_empty()).then(|| venue.to_string());
    }
    if let Some(status) = details.status {
        game.status = status;
    }
    store.update_match(&game).map_err(match_error(match_id))?;
    Ok(game)
}

/// Record the result of a match and complete it.
///
/// A knockout match must produce a winner; the winner is then written into its
/// slot of the next match. Once that next match is live or decided, the result
/// can no longer be changed.
pub fn record_result<S: ScheduleStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    result: MatchResult,
) -> Result<GameMatch, TournamentError> {
    let mut game = get_match(store, match_id)?;
    let (home, away) = match (game.home_team, game.away_team) {
        (Some(home), Some(away)) => (home, away),
        _ => return Err(ValidationError::TeamsNotDetermined.into()),
    };

    let winner = match result.winner {
        Some(w) if w == home || w == away => Some(w),
        Some(_) => return Err(ValidationError::WinnerNotInMatch.into()),
        None => match result.home_score.cmp(&result.away_score) {
            Ordering::Greater => Some(home),
            Ordering::Less => Some(away),
            Ordering::Equal => None,
        },
    };
    if winner.is_none() && game.next_match_id.is_some() {
        return Err(ValidationError::UndecidedKnockout.into());
    }
    let next = match game.next_match_id {
        Some(next_id) => Some(get_match(store, next_id)?),
        None => None,
    };
    if let Some(next) = &next {
        let started = matches!(next.status, MatchStatus::Live | MatchStatus::Completed);
        if started || next.winner.is_some() {
            return Err(ValidationError::NextMatchStarted.into());
        }
    }

    game.home_score = Some(result.home_score);
    game.away_score = Some(result.away_score);
    game.winner = winner;
    game.status = MatchStatus::Completed;
    store.update_match(&game).map_err(match_error(match_id))?;

    if let (Some(next), Some(winner)) = (next, winner) {
        let slot = advancement_slot(store, &game, &next)?;
        store
            .assign_team(next.id, slot, winner)
            .map_err(match_error(next.id))?;
        log::debug!(
            "Match {} winner advances to match {} ({slot:?})",
            game.match_number,
            next.match_number
        );
    }
    Ok(game)
}

/// Which slot of `next` the winner of `game` fills.
///
/// With two feeding matches the lower numbered one feeds home. A lone feeder
/// takes whichever slot was not pre-filled by a bye.
pub fn advancement_slot<S: ScheduleStore + ?Sized>(
    store: &S,
    game: &GameMatch,
    next: &GameMatch,
) -> Result<Slot, TournamentError> {
    let feeders: Vec<GameMatch> = store
        .list_matches(game.tournament_id)
        .map_err(TournamentError::Persistence)?
        .into_iter()
        .filter(|m| m.next_match_id == Some(next.id))
        .collect();

    let slot = match feeders.as_slice() {
        [first, _] if first.id == game.id => Slot::Home,
        [_, _] => Slot::Away,
        _ => match next.home_team {
            Some(team) if !game.involves(team) => Slot::Away,
            _ => Slot::Home,
        },
    };
    Ok(slot)
}
