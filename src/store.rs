//! Storage boundary for tournaments and their matches.
//!
//! The engine only needs a handful of operations, two of which are conditional
//! writes: [`ScheduleStore::insert_matches`] refuses to write into a tournament
//! that is scheduled, already has matches or whose teams changed since the
//! schedule was planned, and
//! [`ScheduleStore::mark_schedule_generated`] is a compare-and-swap on the flag.
//! Concurrent generation requests for one tournament are serialized by the
//! first of those: only one bulk write can succeed.

use crate::models::{GameMatch, MatchId, Slot, StoreError, Team, TeamId, Tournament, TournamentId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations used by registration, generation and match edits.
pub trait ScheduleStore: Send + Sync {
    fn insert_tournament(&self, tournament: Tournament) -> StoreResult<()>;

    fn get_tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>>;

    /// Append a team to an unscheduled tournament.
    ///
    /// `Conflict` once the schedule is flagged or any match of the tournament is stored.
    fn append_team(&self, tournament_id: TournamentId, team: Team) -> StoreResult<()>;

    /// Write all matches or none.
    ///
    /// `Conflict` if the tournament is scheduled or already has matches. `Stale`
    /// if its teams are no longer exactly `planned_teams`, in seed order.
    fn insert_matches(
        &self,
        tournament_id: TournamentId,
        planned_teams: &[TeamId],
        matches: &[GameMatch],
    ) -> StoreResult<()>;

    /// Set `schedule_generated` if it is false. Returns whether this call flipped it.
    fn mark_schedule_generated(&self, tournament_id: TournamentId) -> StoreResult<bool>;

    /// Matches of a tournament ordered by `match_number`.
    fn list_matches(&self, tournament_id: TournamentId) -> StoreResult<Vec<GameMatch>>;

    fn get_match(&self, id: MatchId) -> StoreResult<Option<GameMatch>>;

    /// Replace a stored match. `NotFound` if it does not exist.
    fn update_match(&self, game: &GameMatch) -> StoreResult<()>;

    /// Put `team` into one slot of a match without touching the rest of it.
    fn assign_team(&self, match_id: MatchId, slot: Slot, team: TeamId) -> StoreResult<()>;
}

/// In-memory store: tournaments and matches by id.
///
/// Lock order is always tournaments before matches.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    matches: RwLock<HashMap<MatchId, GameMatch>>,
}

fn lock_error() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tournaments(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<TournamentId, Tournament>>> {
        self.tournaments.read().map_err(|_| lock_error())
    }

    fn tournaments_mut(
        &self,
    ) -> StoreResult<RwLockWriteGuard<'_, HashMap<TournamentId, Tournament>>> {
        self.tournaments.write().map_err(|_| lock_error())
    }

    fn matches(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<MatchId, GameMatch>>> {
        self.matches.read().map_err(|_| lock_error())
    }

    fn matches_mut(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<MatchId, GameMatch>>> {
        self.matches.write().map_err(|_| lock_error())
    }

    /// Number of stored matches for a tournament.
    pub fn match_count(&self, tournament_id: TournamentId) -> StoreResult<usize> {
        Ok(self
            .matches()?
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .count())
    }
}

impl ScheduleStore for InMemoryStore {
    fn insert_tournament(&self, tournament: Tournament) -> StoreResult<()> {
        let mut g = self.tournaments_mut()?;
        if g.contains_key(&tournament.id) {
            return Err(StoreError::Conflict(format!("tournament {} exists", tournament.id)));
        }
        g.insert(tournament.id, tournament);
        Ok(())
    }

    fn get_tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>> {
        Ok(self.tournaments()?.get(&id).cloned())
    }

    fn append_team(&self, tournament_id: TournamentId, team: Team) -> StoreResult<()> {
        let mut g = self.tournaments_mut()?;
        let tournament = g.get_mut(&tournament_id).ok_or(StoreError::NotFound)?;
        if tournament.schedule_generated {
            return Err(StoreError::Conflict("schedule already generated".to_string()));
        }
        if self.matches()?.values().any(|m| m.tournament_id == tournament_id) {
            return Err(StoreError::Conflict("tournament already has matches".to_string()));
        }
        tournament.teams.push(team);
        Ok(())
    }

    fn insert_matches(
        &self,
        tournament_id: TournamentId,
        planned_teams: &[TeamId],
        matches: &[GameMatch],
    ) -> StoreResult<()> {
        let tournaments = self.tournaments()?;
        let tournament = tournaments.get(&tournament_id).ok_or(StoreError::NotFound)?;
        if tournament.schedule_generated {
            return Err(StoreError::Conflict("schedule already generated".to_string()));
        }
        if !tournament.teams.iter().map(|t| t.id).eq(planned_teams.iter().copied()) {
            let reason = "teams changed since the schedule was planned";
            return Err(StoreError::Stale(reason.to_string()));
        }

        let mut g = self.matches_mut()?;
        if g.values().any(|m| m.tournament_id == tournament_id) {
            return Err(StoreError::Conflict("tournament already has matches".to_string()));
        }
        if matches.iter().any(|m| m.tournament_id != tournament_id || g.contains_key(&m.id)) {
            return Err(StoreError::Conflict("match does not belong to tournament".to_string()));
        }
        g.extend(matches.iter().map(|m| (m.id, m.clone())));
        Ok(())
    }

    fn mark_schedule_generated(&self, tournament_id: TournamentId) -> StoreResult<bool> {
        let mut g = self.tournaments_mut()?;
        let tournament = g.get_mut(&tournament_id).ok_or(StoreError::NotFound)?;
        if tournament.schedule_generated {
            return Ok(false);
        }
        tournament.schedule_generated = true;
        Ok(true)
    }

    fn list_matches(&self, tournament_id: TournamentId) -> StoreResult<Vec<GameMatch>> {
        let mut matches: Vec<GameMatch> = self
            .matches()?
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.match_number);
        Ok(matches)
    }

    fn get_match(&self, id: MatchId) -> StoreResult<Option<GameMatch>> {
        Ok(self.matches()?.get(&id).cloned())
    }

    fn update_match(&self, game: &GameMatch) -> StoreResult<()> {
        let mut g = self.matches_mut()?;
        let stored = g.get_mut(&game.id).ok_or(StoreError::NotFound)?;
        *stored = game.clone();
        Ok(())
    }

    fn assign_team(&self, match_id: MatchId, slot: Slot, team: TeamId) -> StoreResult<()> {
        let mut g = self.matches_mut()?;
        let stored = g.get_mut(&match_id).ok_or(StoreError::NotFound)?;
        *stored.team_mut(slot) = Some(team);
        Ok(())
    }
}
