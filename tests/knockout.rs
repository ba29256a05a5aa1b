//! Integration tests for the knockout bracket builder.

use std::collections::HashMap;
use tournament_schedule::logic::bracket::{round_label, seed_positions};
use tournament_schedule::{
    build_knockout, plan_schedule, DraftMatch, ScheduleOptions, Team, TeamId, Tournament,
    TournamentFormat, ValidationError,
};
use uuid::Uuid;

fn teams(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn rounds(drafts: &[DraftMatch]) -> Vec<&str> {
    drafts.iter().map(|d| d.round.as_str()).collect()
}

#[test]
fn seed_positions_follow_standard_seeding() {
    assert_eq!(seed_positions(2), vec![1, 2]);
    assert_eq!(seed_positions(4), vec![1, 4, 2, 3]);
    assert_eq!(seed_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
}

#[test]
fn round_labels_count_back_from_final() {
    assert_eq!(round_label(4, 5), "Final");
    assert_eq!(round_label(3, 5), "Semi Final");
    assert_eq!(round_label(2, 5), "Quarter Final");
    assert_eq!(round_label(1, 5), "Round 2");
    assert_eq!(round_label(0, 5), "Round 1");
}

#[test]
fn fewer_than_two_teams_is_rejected() {
    assert_eq!(
        build_knockout(&teams(1)),
        Err(ValidationError::InsufficientTeams { found: 1 })
    );
    assert_eq!(
        build_knockout(&[]),
        Err(ValidationError::InsufficientTeams { found: 0 })
    );
}

#[test]
fn two_teams_play_a_single_final() {
    let t = teams(2);
    let drafts = build_knockout(&t).unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].round, "Final");
    assert_eq!(drafts[0].home_team, Some(t[0]));
    assert_eq!(drafts[0].away_team, Some(t[1]));
    assert_eq!(drafts[0].next, None);
}

#[test]
fn eight_teams_without_byes() {
    let t = teams(8);
    let drafts = build_knockout(&t).unwrap();
    assert_eq!(drafts.len(), 7);
    assert_eq!(
        rounds(&drafts),
        vec![
            "Quarter Final",
            "Quarter Final",
            "Quarter Final",
            "Quarter Final",
            "Semi Final",
            "Semi Final",
            "Final"
        ]
    );
    // 1 v 8, 4 v 5, 2 v 7, 3 v 6
    let pairs: Vec<_> = drafts[..4]
        .iter()
        .map(|d| (d.home_team.unwrap(), d.away_team.unwrap()))
        .collect();
    assert_eq!(pairs, vec![(t[0], t[7]), (t[3], t[4]), (t[1], t[6]), (t[2], t[5])]);

    // Matches 1 and 2 feed the same semi final, 3 and 4 the other.
    assert_eq!(drafts[0].next, Some(4));
    assert_eq!(drafts[1].next, Some(4));
    assert_eq!(drafts[2].next, Some(5));
    assert_eq!(drafts[3].next, Some(5));
    assert_eq!(drafts[4].next, Some(6));
    assert_eq!(drafts[5].next, Some(6));
    assert_eq!(drafts[6].next, None);
    for d in &drafts[4..] {
        assert_eq!(d.home_team, None);
        assert_eq!(d.away_team, None);
    }
}

#[test]
fn eight_teams_numbered_matches_link_by_id() {
    let tournament = Tournament::with_teams(
        "Cup",
        TournamentFormat::Knockout,
        (0..8).map(|i| Team::new(format!("T{i}"))).collect(),
    );
    let matches = plan_schedule(&tournament, &ScheduleOptions::default()).unwrap();
    assert_eq!(matches.len(), 7);
    assert_eq!(matches[0].match_number, 1);
    assert_eq!(matches[1].match_number, 2);
    assert_eq!(matches[0].next_match_id, Some(matches[4].id));
    assert_eq!(matches[1].next_match_id, Some(matches[4].id));
    assert_eq!(matches[4].round, "Semi Final");
}

#[test]
fn five_teams_give_the_top_three_seeds_byes() {
    let t = teams(5);
    let drafts = build_knockout(&t).unwrap();
    assert_eq!(
        rounds(&drafts),
        vec!["Quarter Final", "Semi Final", "Semi Final", "Final"]
    );

    // Only seeds 4 and 5 play in the first round.
    assert_eq!(drafts[0].home_team, Some(t[3]));
    assert_eq!(drafts[0].away_team, Some(t[4]));
    assert_eq!(drafts[0].next, Some(1));

    // Seed 1 waits for the winner of 4 v 5; seeds 2 and 3 meet directly.
    assert_eq!(drafts[1].home_team, Some(t[0]));
    assert_eq!(drafts[1].away_team, None);
    assert_eq!(drafts[2].home_team, Some(t[1]));
    assert_eq!(drafts[2].away_team, Some(t[2]));
    assert_eq!(drafts[1].next, Some(3));
    assert_eq!(drafts[2].next, Some(3));

    let round_one: Vec<_> = drafts.iter().filter(|d| d.round == "Quarter Final").collect();
    for seed in &t[..3] {
        assert!(!round_one
            .iter()
            .any(|d| d.home_team == Some(*seed) || d.away_team == Some(*seed)));
    }
}

#[test]
fn seventeen_teams_use_generic_round_names() {
    let drafts = build_knockout(&teams(17)).unwrap();
    assert_eq!(drafts.len(), 16);
    let mut per_round: Vec<(&str, usize)> = Vec::new();
    for d in &drafts {
        match per_round.last_mut() {
            Some((round, count)) if *round == d.round.as_str() => *count += 1,
            _ => per_round.push((d.round.as_str(), 1)),
        }
    }
    assert_eq!(
        per_round,
        vec![
            ("Round 1", 1),
            ("Round 2", 8),
            ("Quarter Final", 4),
            ("Semi Final", 2),
            ("Final", 1)
        ]
    );
}

#[test]
fn bracket_invariants_hold_for_every_team_count() {
    for n in 2..=64 {
        let t = teams(n);
        let drafts = build_knockout(&t).unwrap();
        assert_eq!(drafts.len(), n - 1, "{n} teams");

        let mut feeders: HashMap<usize, usize> = HashMap::new();
        for (i, d) in drafts.iter().enumerate() {
            if i == drafts.len() - 1 {
                assert_eq!(d.round, "Final");
                assert_eq!(d.next, None);
            } else {
                let next = d.next.expect("non-final match must feed a later one");
                assert!(next > i);
                *feeders.entry(next).or_default() += 1;
            }
        }

        // Every slot of every match is filled by exactly one team or feeder.
        for (i, d) in drafts.iter().enumerate() {
            let prefilled = d.home_team.is_some() as usize + d.away_team.is_some() as usize;
            let fed = feeders.get(&i).copied().unwrap_or(0);
            assert!(fed <= 2);
            assert_eq!(prefilled + fed, 2, "{n} teams, match {i}");
        }

        // Every team enters the bracket exactly once.
        let mut entered: Vec<TeamId> = drafts
            .iter()
            .flat_map(|d| [d.home_team, d.away_team])
            .flatten()
            .collect();
        entered.sort();
        let mut expected = t.clone();
        expected.sort();
        assert_eq!(entered, expected, "{n} teams");
    }
}
