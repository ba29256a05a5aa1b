//! Tournament, TournamentFormat and schedule options.

use crate::models::error::{TournamentError, ValidationError};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Upper bound on registered teams per tournament.
pub const MAX_TEAMS: usize = 64;

/// Group labels run A..Z, so this is also the maximum number of groups.
pub const MAX_GROUPS: usize = 26;

/// Competition format; decides which builder produces the schedule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Single elimination bracket.
    Knockout,
    /// Everyone plays everyone once.
    RoundRobin,
    /// Everyone plays everyone twice, home and away.
    League,
    /// Teams split into groups, round robin inside each group.
    GroupStage,
}

impl TournamentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentFormat::Knockout => "knockout",
            TournamentFormat::RoundRobin => "round_robin",
            TournamentFormat::League => "league",
            TournamentFormat::GroupStage => "group_stage",
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "knockout" => Ok(TournamentFormat::Knockout),
            "round_robin" => Ok(TournamentFormat::RoundRobin),
            "league" => Ok(TournamentFormat::League),
            "group_stage" => Ok(TournamentFormat::GroupStage),
            other => Err(ValidationError::UnknownFormat(other.to_string())),
        }
    }
}

/// How a group stage is partitioned: a fixed number of groups or a target group size.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSpec {
    Count(usize),
    Size(usize),
}

impl Default for GroupSpec {
    fn default() -> Self {
        GroupSpec::Size(4)
    }
}

/// Options that only some formats read. Knockout and round robin ignore them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    #[serde(default)]
    pub groups: GroupSpec,
}

/// A tournament: format, teams in seed order and whether its schedule exists.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    /// Registered teams; registration order is seed order.
    pub teams: Vec<Team>,
    /// Flips false -> true once, when the schedule is committed.
    pub schedule_generated: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new, unscheduled tournament with no teams.
    pub fn new(name: impl Into<String>, format: TournamentFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            teams: Vec::new(),
            schedule_generated: false,
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with teams already registered (in seed order).
    pub fn with_teams(name: impl Into<String>, format: TournamentFormat, teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::new(name, format)
        }
    }

    /// Team ids in seed order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id).collect()
    }

    /// Check that a team with this name may be registered and return the trimmed name.
    pub fn check_new_team(&self, name: &str) -> Result<String, TournamentError> {
        if self.schedule_generated {
            return Err(TournamentError::AlreadyScheduled(self.id));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTeamName.into());
        }
        if self.teams.len() >= MAX_TEAMS {
            return Err(ValidationError::TooManyTeams { max: MAX_TEAMS }.into());
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(ValidationError::DuplicateTeamName.into());
        }
        Ok(name.to_string())
    }
}
