use std::sync::Arc;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use log::warn;
use serde::Deserialize;

use crate::models::{NewSubmission, Submission, SubmissionId};
use crate::util::api_util::{classify_store_error, APIError};
use crate::util::levels::LEVEL_COUNT;
use crate::util::stat::{MAX_RATING, MIN_RATING};
use crate::DbPool;

/// Listing order over `created_at`. Callers must pick one explicitly: the
/// dashboard wants newest-first, the report wants the event in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

/// One way of saying "all rows" to a store that may reject certain predicate
/// forms. Tried in `RESET_STRATEGIES` order by the reset engine.
#[derive(Debug, Clone, Copy)]
pub enum DeleteStrategy {
    /// `id >= n`; with n = 0 this matches every store-assigned id.
    IdAtLeast(SubmissionId),
    /// `id != n` for an id that can never exist.
    IdNotEqual(SubmissionId),
    /// Select all ids, then delete them in fixed-size batches.
    ByIdBatch,
}

pub const RESET_STRATEGIES: [DeleteStrategy; 3] = [
    DeleteStrategy::IdAtLeast(0),
    DeleteStrategy::IdNotEqual(-999_999),
    DeleteStrategy::ByIdBatch,
];

const DELETE_BATCH_SIZE: usize = 100;

/// The system of record for submissions. Injected rather than reached through
/// a process-wide handle so the reset engine and aggregation paths run
/// against an in-memory stand-in in tests.
#[allow(async_fn_in_trait)]
pub trait SubmissionStore {
    async fn list_all(&self, order: Order) -> Result<Vec<Submission>, APIError>;
    async fn insert(&self, record: NewSubmission<'_>) -> Result<Submission, APIError>;
    /// Reported counts are advisory; the reset engine re-counts instead of
    /// trusting them.
    async fn delete_where(&self, strategy: DeleteStrategy) -> Result<usize, APIError>;
    async fn count(&self) -> Result<i64, APIError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: Arc<DbPool>,
}

impl PgStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

fn pool_unavailable<E: std::fmt::Display>(e: E) -> APIError {
    warn!("submission store unreachable: {e}");
    APIError::StoreUnavailable { msg: e.to_string() }
}

impl SubmissionStore for PgStore {
    async fn list_all(&self, order: Order) -> Result<Vec<Submission>, APIError> {
        use crate::schema::submissions::dsl::*;

        let mut conn = self.pool.get().await.map_err(pool_unavailable)?;
        let query = submissions.select(Submission::as_select());
        let rows = match order {
            Order::Asc => query.order(created_at.asc()).load(&mut conn).await,
            Order::Desc => query.order(created_at.desc()).load(&mut conn).await,
        };
        rows.map_err(classify_store_error)
    }

    async fn insert(&self, record: NewSubmission<'_>) -> Result<Submission, APIError> {
        use crate::schema::submissions::dsl::*;

        // Mirror the table's CHECK constraints before touching the wire.
        if !(1..=LEVEL_COUNT).contains(&record.level) {
            return Err(APIError::ConstraintViolation {
                constraint: "level must be within 1..=10".to_string(),
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&record.difficulty_rating) {
            return Err(APIError::ConstraintViolation {
                constraint: "difficulty_rating must be within 1..=5".to_string(),
            });
        }

        let mut conn = self.pool.get().await.map_err(pool_unavailable)?;
        diesel::insert_into(submissions)
            .values(&record)
            .returning(Submission::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(classify_store_error)
    }

    async fn delete_where(&self, strategy: DeleteStrategy) -> Result<usize, APIError> {
        use crate::schema::submissions::dsl::*;

        let mut conn = self.pool.get().await.map_err(pool_unavailable)?;
        match strategy {
            DeleteStrategy::IdAtLeast(min_id) => {
                diesel::delete(submissions.filter(id.ge(min_id)))
                    .execute(&mut conn)
                    .await
                    .map_err(classify_store_error)
            }
            DeleteStrategy::IdNotEqual(impossible_id) => {
                diesel::delete(submissions.filter(id.ne(impossible_id)))
                    .execute(&mut conn)
                    .await
                    .map_err(classify_store_error)
            }
            DeleteStrategy::ByIdBatch => {
                let ids: Vec<SubmissionId> = submissions
                    .select(id)
                    .load(&mut conn)
                    .await
                    .map_err(classify_store_error)?;

                let mut removed = 0;
                for chunk in ids.chunks(DELETE_BATCH_SIZE) {
                    removed += diesel::delete(submissions.filter(id.eq_any(chunk.to_vec())))
                        .execute(&mut conn)
                        .await
                        .map_err(classify_store_error)?;
                }
                Ok(removed)
            }
        }
    }

    async fn count(&self) -> Result<i64, APIError> {
        use crate::schema::submissions::dsl::*;

        let mut conn = self.pool.get().await.map_err(pool_unavailable)?;
        submissions
            .count()
            .get_result(&mut conn)
            .await
            .map_err(classify_store_error)
    }
}
