//! Schedule business logic: builders per format, numbering, generation, edits.

pub mod bracket;
pub mod groups;
mod numbering;
mod registration;
mod results;
pub mod round_robin;
mod schedule;

pub use bracket::build_knockout;
pub use groups::build_group_stage;
pub use numbering::number_matches;
pub use registration::{create_tournament, get_tournament, register_team};
pub use results::{advancement_slot, record_result, update_match_details, MatchDetails, MatchResult};
pub use round_robin::build_round_robin;
pub use schedule::{draft_schedule, generate_schedule, plan_schedule};
