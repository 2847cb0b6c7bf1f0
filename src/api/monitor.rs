use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::util::cache::Cache;
use crate::util::levels::LEVEL_COUNT;
use crate::util::rank::{podium, rank_teams};
use crate::util::stat::{
    aggregate_teams, countable_submissions, level_reached_counts, level_submission_histogram,
    overall_average_rating, TeamStats,
};
use crate::util::teams::{team_branch, team_name};
use crate::util::api_util::*;
use crate::Ext;

#[derive(Debug, Serialize)]
struct DashboardResponse {
    teams: Vec<TeamStats>,
    // Submissions at exactly each level, and teams that reached at least it.
    level_histogram: [i64; LEVEL_COUNT as usize],
    level_reached: [i64; LEVEL_COUNT as usize],
    active_teams: usize,
    total_submissions: usize,
    highest_level: i32,
    average_rating: f64,
    snapshot_time: DateTime<Utc>,
}

// [[API]]
// desp: Aggregate view for the polling admin dashboard
// Method: GET
// URL: /dashboard
// Response Body: `DashboardResponse`
#[get("/dashboard")]
pub async fn dashboard(cache: web::Data<Cache>) -> Result<impl Responder, APIError> {
    let location = "dashboard";

    let snapshot = cache
        .get_snapshot()
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    let ranked = rank_teams(aggregate_teams(&snapshot.submissions));
    let highest_level = ranked.first().map(|t| t.max_level).unwrap_or(0);

    Ok(HttpResponse::Ok().json(DashboardResponse {
        level_histogram: level_submission_histogram(&snapshot.submissions),
        level_reached: level_reached_counts(&ranked),
        active_teams: ranked.len(),
        total_submissions: countable_submissions(&snapshot.submissions),
        highest_level,
        average_rating: overall_average_rating(&snapshot.submissions),
        snapshot_time: snapshot.time,
        teams: ranked,
    }))
}

#[derive(Debug, Serialize)]
struct LeaderboardEntry {
    rank: usize,
    team_id: String,
    team_name: String,
    max_level: i32,
    submission_count: u32,
    average_rating: f64,
    last_submission: DateTime<Utc>,
}

// [[API]]
// desp: The canonical ranked leaderboard with display names
// Method: GET
// URL: /leaderboard
// Response Body: `Vec<LeaderboardEntry>`
#[get("/leaderboard")]
pub async fn leaderboard(cache: web::Data<Cache>) -> Result<impl Responder, APIError> {
    let location = "leaderboard";

    let snapshot = cache
        .get_snapshot()
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    let ranked = rank_teams(aggregate_teams(&snapshot.submissions));
    let entries: Vec<LeaderboardEntry> = ranked
        .iter()
        .enumerate()
        .map(|(index, team)| LeaderboardEntry {
            rank: index + 1,
            team_id: team.team_id.clone(),
            team_name: team_name(&team.team_id),
            max_level: team.max_level,
            submission_count: team.submission_count,
            average_rating: team.average_rating,
            last_submission: team.last_submission,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

#[derive(Debug, Serialize)]
struct PodiumEntry {
    rank: usize,
    team_id: String,
    team_name: String,
    branch: &'static str,
    max_level: i32,
    average_rating: f64,
    max_level_at: DateTime<Utc>,
    time_to_complete_minutes: i64,
}

// [[API]]
// desp: Top three teams for the victory ceremony
// Method: GET
// URL: /victory
// Response Body: `Vec<PodiumEntry>`
#[get("/victory")]
pub async fn victory(cache: web::Data<Cache>) -> Result<impl Responder, APIError> {
    let location = "victory";

    let snapshot = cache
        .get_snapshot()
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    let ranked = rank_teams(aggregate_teams(&snapshot.submissions));
    let entries: Vec<PodiumEntry> = podium(&ranked)
        .iter()
        .enumerate()
        .map(|(index, team)| PodiumEntry {
            rank: index + 1,
            team_id: team.team_id.clone(),
            team_name: team_name(&team.team_id),
            branch: team_branch(&team.team_id),
            max_level: team.max_level,
            average_rating: team.average_rating,
            max_level_at: team.max_level_at,
            time_to_complete_minutes: team.time_to_complete_minutes(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}
