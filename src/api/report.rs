use actix_web::{get, http::header::ContentType, web, HttpResponse, Responder};
use chrono::Utc;

use crate::store::{Order, PgStore, SubmissionStore};
use crate::util::api_util::*;
use crate::util::report::{build_event_summary, render_html_report};
use crate::Ext;

// [[API]]
// desp: Event analytics: team analytics, branch stats, level progression
// Method: GET
// URL: /summary
// Response Body: `EventSummary`
#[get("/summary")]
pub async fn summary(store: web::Data<PgStore>) -> Result<impl Responder, APIError> {
    let location = "summary";

    // Fresh read in event order; the report walks the event chronologically.
    let rows = store
        .list_all(Order::Asc)
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    Ok(HttpResponse::Ok().json(build_event_summary(&rows)))
}

// [[API]]
// desp: The downloadable, print-ready HTML report document
// Method: GET
// URL: /report
// Response Body: text/html
#[get("/report")]
pub async fn report(store: web::Data<PgStore>) -> Result<impl Responder, APIError> {
    let location = "report";

    let rows = store
        .list_all(Order::Asc)
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    let html = render_html_report(&build_event_summary(&rows), Utc::now());

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(html))
}
