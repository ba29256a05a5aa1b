//! Turn drafts into numbered matches with ids and resolved advancement links.

use crate::models::{DraftMatch, GameMatch, MatchId, MatchStatus, TournamentId};
use uuid::Uuid;

/// Number `drafts` 1..=len in the order given and give each a fresh id.
///
/// A draft's `next` index becomes the `next_match_id` of the match at that index.
pub fn number_matches(tournament_id: TournamentId, drafts: Vec<DraftMatch>) -> Vec<GameMatch> {
    let ids: Vec<MatchId> = drafts.iter().map(|_| Uuid::new_v4()).collect();

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            debug_assert!(draft.next.map_or(true, |next| next > i));
            GameMatch {
                id: ids[i],
                tournament_id,
                match_number: i as u32 + 1,
                round: draft.round,
                home_team: draft.home_team,
                away_team: draft.away_team,
                status: MatchStatus::Scheduled,
                home_score: None,
                away_score: None,
                winner: None,
                next_match_id: draft.next.and_then(|next| ids.get(next).copied()),
                scheduled_at: None,
                venue: None,
            }
        })
        .collect()
}
