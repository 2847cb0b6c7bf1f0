use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use moka::future::Cache as MokaCache;
use moka::Expiry;

use crate::models::Submission;
use crate::store::{Order, PgStore, SubmissionStore};
use crate::util::api_util::APIError;

/// An enum to represent the expiration of a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Expiration {
    AtOnce,
    Short,
    Middle,
    Long,
    Never,
}

impl Expiration {
    /// Returns the duration of this expiration.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Expiration::AtOnce => Some(Duration::from_secs(0)),
            Expiration::Short => Some(Duration::from_secs(2)),
            Expiration::Middle => Some(Duration::from_secs(600)),
            Expiration::Long => Some(Duration::from_secs(7200)),
            Expiration::Never => None,
        }
    }
}

pub struct MyExpiry;

impl<K, V> Expiry<K, (Expiration, V)> for MyExpiry
where
    K: Clone + std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn expire_after_create(
        &self,
        _key: &K,
        value: &(Expiration, V),
        _created_at: std::time::Instant,
    ) -> Option<Duration> {
        value.0.as_duration()
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &(Expiration, V),
        _updated_at: std::time::Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.0.as_duration()
    }
}

/// One fully-fetched view of the submission table. All aggregation runs over
/// a snapshot, never over a half-read table.
pub struct EventSnapshot {
    pub submissions: Vec<Submission>,
    pub time: DateTime<Utc>,
}

/// The dashboard is polled on a fixed 3 s cadence by every open admin view;
/// the snapshot is shared across those polls for a short TTL instead of
/// re-reading the table per request.
pub struct Cache {
    snapshot: MokaCache<(), (Expiration, Arc<EventSnapshot>)>,
    store: PgStore,
}

impl Cache {
    pub fn new(store: PgStore) -> Self {
        Self {
            snapshot: MokaCache::builder()
                .max_capacity(2)
                .expire_after(MyExpiry)
                .build(),
            store,
        }
    }

    pub async fn get_snapshot(&self) -> Result<Arc<EventSnapshot>, APIError> {
        if let Some((_, data)) = self.snapshot.get(&()).await {
            return Ok(data);
        }
        let rows = self.store.list_all(Order::Desc).await?;
        let new_data = Arc::new(EventSnapshot {
            submissions: rows,
            time: Utc::now(),
        });
        self.snapshot
            .get_with((), async { (Expiration::Short, new_data.clone()) })
            .await;
        Ok(new_data)
    }

    /// Dropped after a write so the next poll sees it immediately.
    pub async fn invalidate(&self) {
        self.snapshot.invalidate(&()).await
    }
}
