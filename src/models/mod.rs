//! Data structures for schedule generation: teams, tournaments, matches, errors.

mod error;
mod game;
mod team;
mod tournament;

pub use error::{ErrorKind, StoreError, TournamentError, ValidationError};
pub use game::{DraftMatch, GameMatch, MatchId, MatchStatus, Slot};
pub use team::{Team, TeamId};
pub use tournament::{
    GroupSpec, ScheduleOptions, Tournament, TournamentFormat, TournamentId, MAX_GROUPS, MAX_TEAMS,
};
