//! Tournament schedule generator: library with models, schedule builders and storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_group_stage, build_knockout, build_round_robin, create_tournament, draft_schedule,
    generate_schedule, get_tournament, number_matches, plan_schedule, record_result,
    register_team, update_match_details, MatchDetails, MatchResult,
};
pub use models::{
    DraftMatch, ErrorKind, GameMatch, GroupSpec, MatchId, MatchStatus, ScheduleOptions, Slot,
    StoreError, Team, TeamId, Tournament, TournamentError, TournamentFormat, TournamentId,
    ValidationError, MAX_GROUPS, MAX_TEAMS,
};
pub use store::{InMemoryStore, ScheduleStore, StoreResult};
