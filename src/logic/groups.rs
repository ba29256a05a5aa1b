//! Group stage: split teams into balanced groups, then a single round robin inside each.

use crate::logic::round_robin::build_round_robin_with;
use crate::models::{DraftMatch, GroupSpec, TeamId, ValidationError, MAX_GROUPS};

/// Resolve a [`GroupSpec`] into a number of groups for `teams` teams.
///
/// A target size becomes `ceil(teams / size)` groups, reduced if needed so no
/// group ends up with fewer than 2 teams.
pub fn group_count(teams: usize, spec: GroupSpec) -> Result<usize, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidGroups {
        teams,
        reason: reason.to_string(),
    };
    if teams < 2 {
        return Err(ValidationError::InsufficientTeams { found: teams });
    }
    let count = match spec {
        GroupSpec::Count(count) => count,
        GroupSpec::Size(size) if size < 2 => return Err(invalid("group size must be at least 2")),
        GroupSpec::Size(size) => teams.div_ceil(size).min(teams / 2),
    };
    if count == 0 {
        return Err(invalid("need at least one group"));
    }
    if count > MAX_GROUPS {
        return Err(invalid("at most 26 groups are supported"));
    }
    if teams / count < 2 {
        return Err(invalid("every group needs at least 2 teams"));
    }
    Ok(count)
}

/// Letter for the group at `index` (0 -> 'A').
pub fn group_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Split `teams` sequentially (seed order) into `count` groups whose sizes differ by at most one.
/// The larger groups come first, e.g. 10 teams in 3 groups gives sizes 4, 3, 3.
pub fn partition(teams: &[TeamId], count: usize) -> Vec<&[TeamId]> {
    if count == 0 {
        return Vec::new();
    }
    let base = teams.len() / count;
    let extra = teams.len() % count;

    let mut groups = Vec::with_capacity(count);
    let mut rest = teams;
    for i in 0..count {
        let size = if i < extra { base + 1 } else { base };
        let (group, tail) = rest.split_at(size);
        groups.push(group);
        rest = tail;
    }
    groups
}

/// Draft every group's round robin, group A first, labelled "Group {letter} - Round {n}".
pub fn build_group_stage(
    teams: &[TeamId],
    spec: GroupSpec,
) -> Result<Vec<DraftMatch>, ValidationError> {
    let count = group_count(teams.len(), spec)?;
    log::debug!("Group stage: {} teams in {count} groups", teams.len());

    let mut drafts = Vec::new();
    for (i, group) in partition(teams, count).into_iter().enumerate() {
        let letter = group_letter(i);
        drafts.extend(build_round_robin_with(group, false, |round| {
            format!("Group {letter} - Round {round}")
        })?);
    }
    Ok(drafts)
}
