//! Match (game), Slot, MatchStatus and the draft form produced by the schedule builders.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = uuid::Uuid;

/// Which side of a match a team plays on (also the advancement slot in the next round).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    Home,
    Away,
}

/// Where a match stands. Only `Scheduled` is set by generation; the rest come from later edits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Postponed,
    Cancelled,
}

/// A single committed match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based, unique and gap-free within the tournament, in generation order.
    pub match_number: u32,
    /// Human readable round label, also used as the grouping key.
    pub round: String,
    /// None means "to be determined" (bracket slot not filled yet).
    pub home_team: Option<TeamId>,
    pub away_team: Option<TeamId>,
    pub status: MatchStatus,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub winner: Option<TeamId>,
    /// Knockout only: the match the winner of this one advances into.
    pub next_match_id: Option<MatchId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub venue: Option<String>,
}

impl GameMatch {
    /// Mutable access to the given slot.
    pub fn team_mut(&mut self, slot: Slot) -> &mut Option<TeamId> {
        match slot {
            Slot::Home => &mut self.home_team,
            Slot::Away => &mut self.away_team,
        }
    }

    /// True if `team` plays in this match.
    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == Some(team) || self.away_team == Some(team)
    }
}

/// A match as produced by a schedule builder, before numbering and ids.
///
/// `next` is an index into the same draft list (always a later entry), which
/// numbering resolves into a `next_match_id`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DraftMatch {
    pub round: String,
    pub home_team: Option<TeamId>,
    pub away_team: Option<TeamId>,
    pub next: Option<usize>,
}

impl DraftMatch {
    /// A fixture between two known teams.
    pub fn fixture(round: impl Into<String>, home: TeamId, away: TeamId) -> Self {
        Self {
            round: round.into(),
            home_team: Some(home),
            away_team: Some(away),
            next: None,
        }
    }

    /// A bracket shell with both slots still empty.
    pub fn shell(round: impl Into<String>) -> Self {
        Self {
            round: round.into(),
            ..Self::default()
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<TeamId> {
        match slot {
            Slot::Home => &mut self.home_team,
            Slot::Away => &mut self.away_team,
        }
    }
}
