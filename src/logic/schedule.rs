//! Schedule generation: validate, dispatch to the format's builder, number, commit.

use crate::logic::bracket::build_knockout;
use crate::logic::groups::build_group_stage;
use crate::logic::numbering::number_matches;
use crate::logic::registration::get_tournament;
use crate::logic::round_robin::build_round_robin;
use crate::models::{
    DraftMatch, GameMatch, ScheduleOptions, StoreError, TeamId, Tournament, TournamentError,
    TournamentFormat, TournamentId, ValidationError, MAX_TEAMS,
};
use crate::store::ScheduleStore;

/// Draft matches for `teams` (seed order) in the given format.
pub fn draft_schedule(
    format: TournamentFormat,
    teams: &[TeamId],
    options: &ScheduleOptions,
) -> Result<Vec<DraftMatch>, ValidationError> {
    match format {
        TournamentFormat::Knockout => build_knockout(teams),
        TournamentFormat::RoundRobin => build_round_robin(teams, false),
        TournamentFormat::League => build_round_robin(teams, true),
        TournamentFormat::GroupStage => build_group_stage(teams, options.groups),
    }
}

/// Build the numbered schedule for a tournament without storing anything.
///
/// Checks the same preconditions as [`generate_schedule`]. Identical teams and
/// format always give identical `match_number` to pairing assignments; only
/// the match ids differ between calls.
pub fn plan_schedule(
    tournament: &Tournament,
    options: &ScheduleOptions,
) -> Result<Vec<GameMatch>, TournamentError> {
    if tournament.schedule_generated {
        return Err(TournamentError::AlreadyScheduled(tournament.id));
    }
    let teams = tournament.team_ids();
    if teams.len() < 2 {
        return Err(ValidationError::InsufficientTeams { found: teams.len() }.into());
    }
    if teams.len() > MAX_TEAMS {
        return Err(ValidationError::TooManyTeams { max: MAX_TEAMS }.into());
    }
    let drafts = draft_schedule(tournament.format, &teams, options)?;
    Ok(number_matches(tournament.id, drafts))
}

/// Generate and commit the schedule of a tournament. Succeeds at most once per tournament.
///
/// All matches go out in one bulk write, then the tournament is flagged as
/// scheduled. A failed bulk write left nothing behind and is retryable
/// ([`TournamentError::Persistence`]); this includes a team registering
/// between reading the tournament and writing its matches. If the flag cannot be set after the
/// matches were written, [`TournamentError::Inconsistent`] is returned and
/// must not be retried.
pub fn generate_schedule<S: ScheduleStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
    options: &ScheduleOptions,
) -> Result<Vec<GameMatch>, TournamentError> {
    let tournament = get_tournament(store, tournament_id)?;
    let matches = match plan_schedule(&tournament, options) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("Schedule for tournament {tournament_id} rejected: {e}");
            return Err(e);
        }
    };

    match store.insert_matches(tournament_id, &tournament.team_ids(), &matches) {
        Ok(()) => {}
        Err(StoreError::Conflict(reason)) => {
            log::warn!("Schedule for tournament {tournament_id} already written: {reason}");
            return Err(TournamentError::AlreadyScheduled(tournament_id));
        }
        Err(e @ StoreError::Stale(_)) => {
            log::warn!("Schedule for tournament {tournament_id} not written: {e}");
            return Err(TournamentError::Persistence(e));
        }
        Err(StoreError::NotFound) => return Err(TournamentError::TournamentNotFound(tournament_id)),
        Err(e) => return Err(TournamentError::Persistence(e)),
    }

    let flag = match store.mark_schedule_generated(tournament_id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(StoreError::Conflict("schedule flag was already set".to_string())),
        Err(e) => Err(e),
    };
    if let Err(source) = flag {
        log::error!(
            "Stored {} matches for tournament {tournament_id} \
             but could not set the schedule flag: {source}",
            matches.len()
        );
        return Err(TournamentError::Inconsistent {
            tournament_id,
            source,
        });
    }

    log::info!(
        "Generated {} {} matches for tournament {tournament_id}",
        matches.len(),
        tournament.format
    );
    Ok(matches)
}
