//! Record store adapter over the external attendance collection.
//!
//! The store persists documents and signals changes; it makes no ordering
//! promise. Callers sort after every fetch (see `model::attendance`).

#[cfg(test)]
pub mod memory;
mod mysql;

pub use mysql::MySqlStore;

use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::NaiveDate;
use futures_util::Stream;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewRecord};

/// Equality filter for a live query: one employee's records on one date.
#[derive(Debug, Clone)]
pub struct SubscriptionFilter {
    pub employee_name: String,
    pub date: NaiveDate,
}

pub trait RecordStore: Clone + Send + Sync + 'static {
    /// Persists `new` and returns the stored record with its assigned id.
    async fn create(&self, new: NewRecord) -> Result<AttendanceRecord, StoreError>;

    /// Records matching both equality keys. Unordered.
    async fn query_by_employee_and_date(
        &self,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Full collection scan. Unordered.
    async fn query_all(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Signalled after every successful `create`.
    fn changes(&self) -> broadcast::Receiver<()>;

    /// Live query: delivers the full current matching set immediately, then
    /// again after every collection change, until the handle is cancelled or
    /// dropped. A re-query that fails is logged and the subscription waits
    /// for the next change instead of tearing down.
    fn subscribe(&self, filter: Option<SubscriptionFilter>) -> Subscription {
        let (tx, rx) = mpsc::channel(8);
        let mut changes = self.changes();
        let store = self.clone();

        let task = actix_web::rt::spawn(async move {
            loop {
                let snapshot = match &filter {
                    Some(f) => {
                        store
                            .query_by_employee_and_date(&f.employee_name, f.date)
                            .await
                    }
                    None => store.query_all().await,
                };

                match snapshot {
                    Ok(records) => {
                        // Consumer gone means we are done.
                        if tx.send(records).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "subscription re-query failed"),
                }

                match changes.recv().await {
                    Ok(()) => {}
                    // Missed signals collapse into one re-query.
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Subscription { rx, task }
    }
}

/// Handle to a live query. Dropping it stops delivery and releases the
/// underlying task; holders must not outlive the page/connection they serve.
pub struct Subscription {
    rx: mpsc::Receiver<Vec<AttendanceRecord>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Next full matching snapshot. `None` once the store side has closed.
    pub async fn next_snapshot(&mut self) -> Option<Vec<AttendanceRecord>> {
        self.rx.recv().await
    }

    /// Explicit cancellation; equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Stream for Subscription {
    type Item = Vec<AttendanceRecord>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::model::attendance::EventKind;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn new_record(name: &str, kind: EventKind, date: NaiveDate) -> NewRecord {
        NewRecord {
            employee_name: name.to_string(),
            job_position: Some("Teller".to_string()),
            kind,
            date,
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap(),
            formatted_date_time: "01/06/2024 08:00:00".to_string(),
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[actix_web::test]
    async fn create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store
            .create(new_record("Budi", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
        let b = store
            .create(new_record("Siti", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[actix_web::test]
    async fn equality_query_matches_both_keys() {
        let store = MemoryStore::new();
        let other_day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        store
            .create(new_record("Budi", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
        store
            .create(new_record("Budi", EventKind::CheckIn, other_day))
            .await
            .unwrap();
        store
            .create(new_record("Siti", EventKind::CheckIn, june_first()))
            .await
            .unwrap();

        let records = store
            .query_by_employee_and_date("Budi", june_first())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_name, "Budi");
        assert_eq!(records[0].date, june_first());

        assert_eq!(store.query_all().await.unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn subscription_delivers_initial_and_updated_snapshots() {
        let store = MemoryStore::new();
        let mut subscription = store.subscribe(None);

        let initial = subscription.next_snapshot().await.unwrap();
        assert!(initial.is_empty());

        store
            .create(new_record("Budi", EventKind::CheckIn, june_first()))
            .await
            .unwrap();

        let updated = subscription.next_snapshot().await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].employee_name, "Budi");
    }

    #[actix_web::test]
    async fn filtered_subscription_only_sees_matching_records() {
        let store = MemoryStore::new();
        let mut subscription = store.subscribe(Some(SubscriptionFilter {
            employee_name: "Budi".to_string(),
            date: june_first(),
        }));

        assert!(subscription.next_snapshot().await.unwrap().is_empty());

        store
            .create(new_record("Siti", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
        let snapshot = subscription.next_snapshot().await.unwrap();
        assert!(snapshot.is_empty(), "other employees stay invisible");

        store
            .create(new_record("Budi", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
        let snapshot = subscription.next_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[actix_web::test]
    async fn cancelled_subscription_stops_delivering() {
        let store = MemoryStore::new();
        let mut subscription = store.subscribe(None);
        assert!(subscription.next_snapshot().await.is_some());

        subscription.cancel();

        // The change signal still has listeners on the store side only.
        store
            .create(new_record("Budi", EventKind::CheckIn, june_first()))
            .await
            .unwrap();
    }
}
