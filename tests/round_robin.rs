//! Integration tests for round robin and league schedules (circle method).

use std::collections::{HashMap, HashSet};
use tournament_schedule::logic::round_robin::circle_rounds;
use tournament_schedule::{build_round_robin, DraftMatch, TeamId, ValidationError};
use uuid::Uuid;

fn teams(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn pair(d: &DraftMatch) -> (TeamId, TeamId) {
    (d.home_team.unwrap(), d.away_team.unwrap())
}

fn unordered(d: &DraftMatch) -> (TeamId, TeamId) {
    let (a, b) = pair(d);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn round_sizes(drafts: &[DraftMatch]) -> Vec<(String, usize)> {
    let mut sizes: Vec<(String, usize)> = Vec::new();
    for d in drafts {
        match sizes.last_mut() {
            Some((round, count)) if *round == d.round => *count += 1,
            _ => sizes.push((d.round.clone(), 1)),
        }
    }
    sizes
}

#[test]
fn fewer_than_two_teams_is_rejected() {
    assert_eq!(
        build_round_robin(&teams(1), false),
        Err(ValidationError::InsufficientTeams { found: 1 })
    );
    assert!(circle_rounds(&teams(1)).is_empty());
}

#[test]
fn two_teams_play_once_or_twice() {
    let t = teams(2);
    let single = build_round_robin(&t, false).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].round, "Round 1");

    let league = build_round_robin(&t, true).unwrap();
    assert_eq!(league.len(), 2);
    assert_eq!(league[1].round, "Round 2");
    assert_eq!(pair(&league[1]), (pair(&league[0]).1, pair(&league[0]).0));
}

#[test]
fn four_teams_single_round() {
    let t = teams(4);
    let drafts = build_round_robin(&t, false).unwrap();
    assert_eq!(drafts.len(), 6);
    assert_eq!(
        round_sizes(&drafts),
        vec![
            ("Round 1".to_string(), 2),
            ("Round 2".to_string(), 2),
            ("Round 3".to_string(), 2)
        ]
    );

    let pairs: HashSet<_> = drafts.iter().map(unordered).collect();
    assert_eq!(pairs.len(), 6);
    for (i, a) in t.iter().enumerate() {
        for b in &t[i + 1..] {
            let key = if a < b { (*a, *b) } else { (*b, *a) };
            assert!(pairs.contains(&key));
        }
    }
}

#[test]
fn four_teams_league_plays_every_ordered_pair_once() {
    let t = teams(4);
    let drafts = build_round_robin(&t, true).unwrap();
    assert_eq!(drafts.len(), 12);
    let labels: Vec<String> = round_sizes(&drafts).into_iter().map(|(r, _)| r).collect();
    assert_eq!(
        labels,
        (1..=6).map(|r| format!("Round {r}")).collect::<Vec<_>>()
    );

    let ordered: HashSet<_> = drafts.iter().map(pair).collect();
    assert_eq!(ordered.len(), 12);
    for a in &t {
        for b in &t {
            if a != b {
                assert!(ordered.contains(&(*a, *b)));
            }
        }
    }

    // Second leg mirrors the first round by round.
    for (first, second) in drafts[..6].iter().zip(&drafts[6..]) {
        let (home, away) = pair(first);
        assert_eq!(pair(second), (away, home));
    }
}

#[test]
fn odd_team_count_gives_everyone_one_bye() {
    let t = teams(5);
    let rounds = circle_rounds(&t);
    assert_eq!(rounds.len(), 5);

    let mut sat_out: HashMap<TeamId, usize> = HashMap::new();
    for pairs in &rounds {
        assert_eq!(pairs.len(), 2);
        let playing: HashSet<TeamId> = pairs.iter().flat_map(|&(h, a)| [h, a]).collect();
        assert_eq!(playing.len(), 4);
        for team in t.iter().filter(|team| !playing.contains(team)) {
            *sat_out.entry(*team).or_default() += 1;
        }
    }
    assert_eq!(sat_out.len(), 5);
    assert!(sat_out.values().all(|&n| n == 1));

    let drafts = build_round_robin(&t, false).unwrap();
    assert_eq!(drafts.len(), 10);
    let pairs: HashSet<_> = drafts.iter().map(unordered).collect();
    assert_eq!(pairs.len(), 10);
}

#[test]
fn every_pair_meets_once_for_every_team_count() {
    for n in 2..=20 {
        let t = teams(n);
        let rounds = circle_rounds(&t);
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        assert_eq!(rounds.len(), expected_rounds, "{n} teams");

        for pairs in &rounds {
            assert_eq!(pairs.len(), n / 2);
            let playing: HashSet<TeamId> = pairs.iter().flat_map(|&(h, a)| [h, a]).collect();
            assert_eq!(playing.len(), 2 * pairs.len(), "a team plays twice in one round");
        }

        let drafts = build_round_robin(&t, false).unwrap();
        let pairs: HashSet<_> = drafts.iter().map(unordered).collect();
        assert_eq!(drafts.len(), n * (n - 1) / 2);
        assert_eq!(pairs.len(), drafts.len());
    }
}

#[test]
fn home_and_away_stay_balanced() {
    let t = teams(6);
    let drafts = build_round_robin(&t, false).unwrap();
    let mut home_games: HashMap<TeamId, usize> = HashMap::new();
    for d in &drafts {
        *home_games.entry(d.home_team.unwrap()).or_default() += 1;
    }
    for team in &t {
        let home = home_games.get(team).copied().unwrap_or(0);
        assert!((2..=3).contains(&home), "team with {home} home games out of 5");
    }
}
