//! Error types for schedule generation, registration and match edits.

use crate::models::game::MatchId;
use crate::models::tournament::TournamentId;
use thiserror::Error;

/// Input that can never succeed as given. Not retryable without changing the input.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Need at least 2 teams to generate a schedule (found {found})")]
    InsufficientTeams { found: usize },

    #[error("A tournament can have at most {max} teams")]
    TooManyTeams { max: usize },

    #[error("Unknown tournament format: {0}")]
    UnknownFormat(String),

    #[error("Cannot split {teams} teams into groups: {reason}")]
    InvalidGroups { teams: usize, reason: String },

    #[error("Team name must not be empty")]
    EmptyTeamName,

    #[error("A team with this name already exists")]
    DuplicateTeamName,

    #[error("Both teams must be known before a result can be recorded")]
    TeamsNotDetermined,

    #[error("Winner does not play in this match")]
    WinnerNotInMatch,

    #[error("A knockout match needs a winner")]
    UndecidedKnockout,

    #[error("The next match has already started, so this result can no longer change")]
    NextMatchStarted,
}

/// Failure reported by a [`crate::store::ScheduleStore`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    /// The precondition of a conditional write did not hold.
    #[error("Conflicting write: {0}")]
    Conflict(String),

    /// The data a write was planned from has changed. Nothing was written.
    #[error("Stale write: {0}")]
    Stale(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Coarse classification of a [`TournamentError`], used by callers to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    State,
    Persistence,
    Inconsistency,
}

/// Errors that can occur during tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    /// The schedule exists already and is authoritative.
    #[error("Schedule already generated for tournament {0}")]
    AlreadyScheduled(TournamentId),

    /// Nothing was written; safe to retry.
    #[error("Failed to store matches: {0}")]
    Persistence(#[source] StoreError),

    /// Matches are stored but the tournament is not flagged as scheduled.
    /// Needs manual reconciliation.
    #[error(
        "Matches for tournament {tournament_id} were stored but the schedule flag was not set: \
         {source}"
    )]
    Inconsistent {
        tournament_id: TournamentId,
        #[source]
        source: StoreError,
    },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::Validation(_) => ErrorKind::Validation,
            TournamentError::TournamentNotFound(_) | TournamentError::MatchNotFound(_) => {
                ErrorKind::NotFound
            }
            TournamentError::AlreadyScheduled(_) => ErrorKind::State,
            TournamentError::Persistence(_) => ErrorKind::Persistence,
            TournamentError::Inconsistent { .. } => ErrorKind::Inconsistency,
        }
    }

    /// Only a failed bulk write may be retried; everything else needs different input or a human.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Persistence
    }
}
