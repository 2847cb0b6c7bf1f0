use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Level, Submission, SENTINEL_TEAM_ID};
use crate::util::levels::LEVEL_COUNT;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Per-team aggregate over one submission snapshot. Derived and ephemeral:
/// recomputed from scratch on every refresh, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    pub team_id: String,
    pub max_level: Level,
    pub submission_count: u32,
    pub average_rating: f64,
    pub first_submission: DateTime<Utc>,
    pub last_submission: DateTime<Utc>,
    // Earliest timestamp at which the team reached its final max_level.
    // The leaderboard tie-break key.
    pub max_level_at: DateTime<Utc>,
}

impl TeamStats {
    pub fn time_to_complete_minutes(&self) -> i64 {
        (self.last_submission - self.first_submission).num_minutes()
    }
}

fn non_sentinel(submissions: &[Submission]) -> impl Iterator<Item = &Submission> {
    submissions.iter().filter(|s| s.team_id != SENTINEL_TEAM_ID)
}

/// Folds a submission snapshot into one `TeamStats` per distinct team, in
/// team-id order. Input order is irrelevant: timestamps are compared as
/// timestamps, not by position. Every insert counts toward submission_count
/// and the rating average, including re-submissions of already-passed levels.
/// Ratings outside 1..=5 are clamped on ingress.
pub fn aggregate_teams(submissions: &[Submission]) -> Vec<TeamStats> {
    let mut teams: BTreeMap<&str, TeamStats> = BTreeMap::new();

    for sub in non_sentinel(submissions) {
        let rating = sub.difficulty_rating.clamp(MIN_RATING, MAX_RATING) as f64;
        match teams.entry(sub.team_id.as_str()) {
            Entry::Occupied(mut entry) => {
                let stats = entry.get_mut();
                let count = stats.submission_count as f64;
                stats.average_rating = (stats.average_rating * count + rating) / (count + 1.0);
                stats.submission_count += 1;

                if sub.level > stats.max_level {
                    stats.max_level = sub.level;
                    stats.max_level_at = sub.created_at;
                } else if sub.level == stats.max_level && sub.created_at < stats.max_level_at {
                    stats.max_level_at = sub.created_at;
                }

                if sub.created_at < stats.first_submission {
                    stats.first_submission = sub.created_at;
                }
                if sub.created_at > stats.last_submission {
                    stats.last_submission = sub.created_at;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(TeamStats {
                    team_id: sub.team_id.clone(),
                    max_level: sub.level,
                    submission_count: 1,
                    average_rating: rating,
                    first_submission: sub.created_at,
                    last_submission: sub.created_at,
                    max_level_at: sub.created_at,
                });
            }
        }
    }

    teams.into_values().collect()
}

/// How many teams reached at least each level.
pub fn level_reached_counts(team_stats: &[TeamStats]) -> [i64; LEVEL_COUNT as usize] {
    let mut counts = [0i64; LEVEL_COUNT as usize];
    for stats in team_stats {
        for level in 1..=stats.max_level.clamp(0, LEVEL_COUNT) {
            counts[(level - 1) as usize] += 1;
        }
    }
    counts
}

/// How many submissions landed at exactly each level. Levels outside 1..=10
/// never occur when the resolver runs before every insert; ignore them rather
/// than index out of bounds.
pub fn level_submission_histogram(submissions: &[Submission]) -> [i64; LEVEL_COUNT as usize] {
    let mut counts = [0i64; LEVEL_COUNT as usize];
    for sub in non_sentinel(submissions) {
        if (1..=LEVEL_COUNT).contains(&sub.level) {
            counts[(sub.level - 1) as usize] += 1;
        }
    }
    counts
}

/// Mean difficulty rating over the whole snapshot; 0.0 on an empty snapshot,
/// never NaN.
pub fn overall_average_rating(submissions: &[Submission]) -> f64 {
    let mut sum = 0i64;
    let mut count = 0i64;
    for sub in non_sentinel(submissions) {
        sum += sub.difficulty_rating.clamp(MIN_RATING, MAX_RATING) as i64;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub fn countable_submissions(submissions: &[Submission]) -> usize {
    non_sentinel(submissions).count()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn submission(
        id: i64,
        team_id: &str,
        level: Level,
        rating: i32,
        at_secs: i64,
    ) -> Submission {
        Submission {
            id,
            team_id: team_id.to_string(),
            level,
            password: format!("secret-{level}"),
            difficulty_rating: rating,
            created_at: Utc.timestamp_opt(at_secs, 0).unwrap(),
        }
    }

    #[test]
    fn aggregates_the_worked_example() {
        let subs = vec![
            submission(1, "101", 3, 2, 100),
            submission(2, "101", 1, 4, 200),
            submission(3, "101", 5, 4, 300),
        ];
        let stats = aggregate_teams(&subs);
        assert_eq!(stats.len(), 1);
        let team = &stats[0];
        assert_eq!(team.team_id, "101");
        assert_eq!(team.max_level, 5);
        assert_eq!(team.submission_count, 3);
        assert!((team.average_rating - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(team.first_submission, Utc.timestamp_opt(100, 0).unwrap());
        assert_eq!(team.last_submission, Utc.timestamp_opt(300, 0).unwrap());
        assert_eq!(team.max_level_at, Utc.timestamp_opt(300, 0).unwrap());
    }

    #[test]
    fn sentinel_team_is_excluded_everywhere() {
        let subs = vec![
            submission(1, "101", 3, 2, 100),
            submission(2, SENTINEL_TEAM_ID, 10, 5, 200),
        ];
        let stats = aggregate_teams(&subs);
        assert_eq!(stats.len(), 1);
        assert!(stats.iter().all(|s| s.team_id != SENTINEL_TEAM_ID));
        assert_eq!(level_submission_histogram(&subs)[9], 0);
        assert_eq!(countable_submissions(&subs), 1);
        assert!((overall_average_rating(&subs) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = vec![
            submission(1, "101", 3, 2, 100),
            submission(2, "101", 1, 4, 200),
            submission(3, "101", 5, 4, 300),
            submission(4, "102", 5, 3, 250),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate_teams(&forward);
        let b = aggregate_teams(&reversed);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.team_id, y.team_id);
            assert_eq!(x.max_level, y.max_level);
            assert_eq!(x.submission_count, y.submission_count);
            assert!((x.average_rating - y.average_rating).abs() < 1e-9);
            assert_eq!(x.first_submission, y.first_submission);
            assert_eq!(x.last_submission, y.last_submission);
            assert_eq!(x.max_level_at, y.max_level_at);
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let subs = vec![
            submission(1, "101", 3, 2, 100),
            submission(2, "102", 7, 5, 200),
        ];
        assert_eq!(aggregate_teams(&subs), aggregate_teams(&subs));
    }

    #[test]
    fn empty_snapshot_yields_empty_aggregates() {
        assert!(aggregate_teams(&[]).is_empty());
        assert_eq!(level_submission_histogram(&[]), [0i64; 10]);
        assert_eq!(level_reached_counts(&[]), [0i64; 10]);
        assert_eq!(overall_average_rating(&[]), 0.0);
    }

    #[test]
    fn reached_counts_are_cumulative() {
        let subs = vec![
            submission(1, "101", 5, 3, 100),
            submission(2, "102", 7, 3, 200),
            submission(3, "103", 7, 3, 300),
        ];
        let counts = level_reached_counts(&aggregate_teams(&subs));
        assert_eq!(counts[0], 3); // level 1: everyone
        assert_eq!(counts[4], 3); // level 5: everyone
        assert_eq!(counts[6], 2); // level 7: the two level-7 teams
        assert_eq!(counts[9], 0); // level 10: nobody
    }

    #[test]
    fn max_level_at_is_the_earliest_time_at_the_final_level() {
        // Two submissions at the same (final) level; the earlier one counts.
        let subs = vec![
            submission(1, "101", 5, 3, 500),
            submission(2, "101", 5, 3, 100),
        ];
        let stats = aggregate_teams(&subs);
        assert_eq!(stats[0].max_level_at, Utc.timestamp_opt(100, 0).unwrap());
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        let subs = vec![
            submission(1, "101", 3, 99, 100),
            submission(2, "101", 3, -7, 200),
        ];
        let stats = aggregate_teams(&subs);
        assert!((stats[0].average_rating - 3.0).abs() < 1e-9); // (5 + 1) / 2
    }
}
