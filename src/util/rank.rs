use crate::util::stat::TeamStats;

/// Orders team stats into the canonical leaderboard sequence: highest level
/// first; among equal levels, the team that reached it first; equal
/// timestamps fall back to team id so the order is total and stable across
/// re-runs.
pub fn rank_teams(mut stats: Vec<TeamStats>) -> Vec<TeamStats> {
    stats.sort_by(|a, b| {
        b.max_level
            .cmp(&a.max_level)
            .then_with(|| a.max_level_at.cmp(&b.max_level_at))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    stats
}

/// The victory-ceremony podium: the first three ranked teams.
pub fn podium(ranked: &[TeamStats]) -> &[TeamStats] {
    &ranked[..ranked.len().min(3)]
}
