use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::{Level, NewSubmission, Submission};
use crate::store::{Order, PgStore, SubmissionStore};
use crate::util::cache::Cache;
use crate::util::levels::resolve_password;
use crate::util::{api_util::*, stat::{MAX_RATING, MIN_RATING}};
use crate::Ext;

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    team_id: String,
    password: String,
    difficulty_rating: i32,
}

impl APIRequest for SubmitRequest {
    fn ok(&self) -> bool {
        !self.team_id.is_empty()
            && self.team_id.len() <= 16
            && !self.password.is_empty()
            && self.password.len() <= 64
            && (MIN_RATING..=MAX_RATING).contains(&self.difficulty_rating)
    }
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    level: Level,
    submission: Submission,
}

// [[API]]
// desp: Validate a level secret and record the submission
// Method: POST
// URL: /submit
// Request Body: `SubmitRequest`
// Response Body: `SubmitResponse`
#[post("/submit")]
pub async fn submit(
    store: web::Data<PgStore>,
    cache: web::Data<Cache>,
    form: web::Json<SubmitRequest>,
) -> Result<impl Responder, APIError> {
    let location = "submit";
    form.sanity()?;

    // The resolver runs before every insert; an invalid secret never
    // reaches the store.
    let level = resolve_password(&form.password).ok_or(APIError::InvalidPassword)?;

    let saved = store
        .insert(NewSubmission {
            team_id: &form.team_id,
            level,
            password: &form.password,
            difficulty_rating: form.difficulty_rating,
        })
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    cache.invalidate().await;

    Ok(HttpResponse::Ok().json(SubmitResponse {
        level,
        submission: saved,
    }))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    order: Option<Order>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    submissions: Vec<Submission>,
}

// [[API]]
// desp: Every raw submission row, ordering explicitly requested
// Method: GET
// URL: /submissions?order=asc|desc
// Response Body: `ListResponse`
#[get("/submissions")]
pub async fn list_submissions(
    store: web::Data<PgStore>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, APIError> {
    let location = "list_submissions";

    let rows = store
        .list_all(query.order.unwrap_or(Order::Desc))
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    Ok(HttpResponse::Ok().json(ListResponse { submissions: rows }))
}

#[derive(Debug, Serialize)]
struct CountResponse {
    count: i64,
}

// [[API]]
// desp: Cheap row count, for display and reset verification
// Method: GET
// URL: /count
// Response Body: `CountResponse`
#[get("/count")]
pub async fn count(store: web::Data<PgStore>) -> Result<impl Responder, APIError> {
    let location = "count";

    let count = store
        .count()
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    Ok(HttpResponse::Ok().json(CountResponse { count }))
}
