use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

pub type SubmissionId = i64;
pub type Level = i32;

/// Reserved for admin connectivity probes; excluded from every aggregate view.
pub const SENTINEL_TEAM_ID: &str = "999";

#[derive(Queryable, Selectable, Serialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::submissions)]
pub struct Submission {
    pub id: SubmissionId,
    pub team_id: String,
    pub level: Level,
    // The raw secret the team entered, kept for audit.
    pub password: String,
    pub difficulty_rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::submissions)]
pub struct NewSubmission<'a> {
    pub team_id: &'a str,
    pub level: Level,
    pub password: &'a str,
    pub difficulty_rating: i32,
}
