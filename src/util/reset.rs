use dotenv::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::env;

use crate::store::{SubmissionStore, RESET_STRATEGIES};
use crate::util::api_util::APIError;

#[derive(Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    AlreadyEmpty,
    Cleared { deleted: i64 },
}

/// Best-effort bulk delete of every submission. Tries each predicate
/// strategy in order and trusts only a re-count of the table, never a
/// strategy's own success report. A non-zero remainder after the whole
/// sequence is `ResetIncomplete`, not success.
pub async fn reset_all<S: SubmissionStore>(store: &S) -> Result<ResetOutcome, APIError> {
    let initial = store.count().await?;
    if initial == 0 {
        return Ok(ResetOutcome::AlreadyEmpty);
    }

    for strategy in RESET_STRATEGIES {
        match store.delete_where(strategy).await {
            Ok(_) => {
                let remaining = store.count().await?;
                if remaining == 0 {
                    return Ok(ResetOutcome::Cleared { deleted: initial });
                }
                warn!("delete strategy {strategy:?} left {remaining} rows");
            }
            Err(e) => warn!("delete strategy {strategy:?} failed: {e}"),
        }
    }

    let remaining = store.count().await?;
    if remaining == 0 {
        Ok(ResetOutcome::Cleared { deleted: initial })
    } else {
        Err(APIError::ResetIncomplete { remaining })
    }
}

static RESET_TOKEN: Lazy<String> = Lazy::new(|| {
    dotenv().ok();
    env::var("RESET_TOKEN").expect("Environment variable RESET_TOKEN not set")
});

/// Gate for the reset endpoint. A shared static secret known to the event
/// staff; a deterrent, not an authentication boundary.
pub fn verify_reset_secret(candidate: &str) -> bool {
    verify_secret(candidate, RESET_TOKEN.as_str())
}

// Compared as digests so equality does not leak length or prefix timing.
fn verify_secret(candidate: &str, expected: &str) -> bool {
    secret_digest(candidate) == secret_digest(expected)
}

fn secret_digest(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSubmission, Submission};
    use crate::store::{DeleteStrategy, Order};
    use crate::util::stat::tests::submission;
    use std::sync::Mutex;

    // In-memory stand-in with failure knobs: predicate strategies can be
    // made to error, and every successful delete can leave rows behind.
    struct MemStore {
        rows: Mutex<Vec<Submission>>,
        fail_predicates: bool,
        sticky_rows: usize,
    }

    impl MemStore {
        fn with_rows(count: i64) -> Self {
            Self {
                rows: Mutex::new(
                    (0..count)
                        .map(|i| submission(i, "101", 1, 3, i * 10))
                        .collect(),
                ),
                fail_predicates: false,
                sticky_rows: 0,
            }
        }
    }

    impl SubmissionStore for MemStore {
        async fn list_all(&self, order: Order) -> Result<Vec<Submission>, APIError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by_key(|r| r.created_at);
            if order == Order::Desc {
                rows.reverse();
            }
            Ok(rows)
        }

        async fn insert(&self, record: NewSubmission<'_>) -> Result<Submission, APIError> {
            let mut rows = self.rows.lock().unwrap();
            let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let row = submission(
                next_id,
                record.team_id,
                record.level,
                record.difficulty_rating,
                next_id * 10,
            );
            rows.push(row.clone());
            Ok(row)
        }

        async fn delete_where(&self, strategy: DeleteStrategy) -> Result<usize, APIError> {
            if self.fail_predicates
                && matches!(
                    strategy,
                    DeleteStrategy::IdAtLeast(_) | DeleteStrategy::IdNotEqual(_)
                )
            {
                return Err(APIError::PermissionDenied);
            }
            let mut rows = self.rows.lock().unwrap();
            let removed = rows.len().saturating_sub(self.sticky_rows);
            rows.truncate(self.sticky_rows);
            Ok(removed)
        }

        async fn count(&self) -> Result<i64, APIError> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }
    }

    #[tokio::test]
    async fn clearing_reports_the_initial_count() {
        let store = MemStore::with_rows(3);
        assert_eq!(
            reset_all(&store).await.unwrap(),
            ResetOutcome::Cleared { deleted: 3 }
        );
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_store_short_circuits() {
        let store = MemStore::with_rows(0);
        assert_eq!(reset_all(&store).await.unwrap(), ResetOutcome::AlreadyEmpty);
    }

    #[tokio::test]
    async fn falls_back_when_predicate_deletes_fail() {
        let store = MemStore {
            fail_predicates: true,
            ..MemStore::with_rows(5)
        };
        // Both predicate strategies error; the batch strategy clears.
        assert_eq!(
            reset_all(&store).await.unwrap(),
            ResetOutcome::Cleared { deleted: 5 }
        );
    }

    #[tokio::test]
    async fn partial_deletion_is_reset_incomplete_not_success() {
        let store = MemStore {
            sticky_rows: 1,
            ..MemStore::with_rows(4)
        };
        assert_eq!(
            reset_all(&store).await,
            Err(APIError::ResetIncomplete { remaining: 1 })
        );
    }

    #[test]
    fn secret_comparison_is_exact() {
        assert!(verify_secret("GDG-IET", "GDG-IET"));
        assert!(!verify_secret("gdg-iet", "GDG-IET"));
        assert!(!verify_secret("GDG-IET ", "GDG-IET"));
        assert!(!verify_secret("", "GDG-IET"));
    }
}
