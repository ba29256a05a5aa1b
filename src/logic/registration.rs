//! Setup phase: create tournaments and register teams before the schedule exists.

use crate::models::{StoreError, Team, Tournament, TournamentError, TournamentFormat, TournamentId};
use crate::store::ScheduleStore;

/// Load a tournament, mapping a missing record to `TournamentNotFound`.
pub fn get_tournament<S: ScheduleStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Tournament, TournamentError> {
    store
        .get_tournament(tournament_id)
        .map_err(TournamentError::Persistence)?
        .ok_or(TournamentError::TournamentNotFound(tournament_id))
}

/// Create and store a new tournament with no teams.
pub fn create_tournament<S: ScheduleStore + ?Sized>(
    store: &S,
    name: &str,
    format: TournamentFormat,
) -> Result<Tournament, TournamentError> {
    let tournament = Tournament::new(name.trim(), format);
    store
        .insert_tournament(tournament.clone())
        .map_err(TournamentError::Persistence)?;
    log::info!("Created {format} tournament {} ({})", tournament.id, tournament.name);
    Ok(tournament)
}

/// Register a team at the end of the seed order. Rejected once the schedule is generated.
pub fn register_team<S: ScheduleStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
    name: &str,
) -> Result<Team, TournamentError> {
    let tournament = get_tournament(store, tournament_id)?;
    let team = Team::new(tournament.check_new_team(name)?);

    store
        .append_team(tournament_id, team.clone())
        .map_err(|e| match e {
            StoreError::Conflict(_) => TournamentError::AlreadyScheduled(tournament_id),
            StoreError::NotFound => TournamentError::TournamentNotFound(tournament_id),
            e => TournamentError::Persistence(e),
        })?;
    Ok(team)
}
