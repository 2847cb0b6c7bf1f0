use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::store::PgStore;
use crate::util::api_util::*;
use crate::util::cache::Cache;
use crate::util::reset::{reset_all, verify_reset_secret, ResetOutcome};
use crate::Ext;

#[derive(Debug, Deserialize)]
struct ResetRequest {
    password: String,
}

impl APIRequest for ResetRequest {
    fn ok(&self) -> bool {
        !self.password.is_empty() && self.password.len() <= 64
    }
}

#[derive(Debug, Serialize)]
enum ResetResponse {
    AlreadyEmpty,
    Success { deleted: i64 },
}

// [[API]]
// desp: Delete every submission. Gated by the shared admin secret.
// Method: POST
// URL: /reset
// Request Body: `ResetRequest`
// Response Body: `ResetResponse`
#[post("/reset")]
pub async fn reset(
    store: web::Data<PgStore>,
    cache: web::Data<Cache>,
    form: web::Json<ResetRequest>,
) -> Result<impl Responder, APIError> {
    let location = "reset";
    form.sanity()?;

    if !verify_reset_secret(&form.password) {
        return Err(APIError::Unauthorized);
    }

    let outcome = reset_all(store.get_ref())
        .await
        .map_err(|e| e.set_location(location).tap(APIError::log))?;

    cache.invalidate().await;

    let response = match outcome {
        ResetOutcome::AlreadyEmpty => ResetResponse::AlreadyEmpty,
        ResetOutcome::Cleared { deleted } => ResetResponse::Success { deleted },
    };
    Ok(HttpResponse::Ok().json(response))
}
