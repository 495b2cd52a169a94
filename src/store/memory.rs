use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::RecordStore;
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewRecord};

/// In-memory stand-in for the hosted collection, used by the flow and
/// subscription tests. Same contract as the real adapter: unordered results,
/// change signal on every create.
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<AttendanceRecord>>>,
    changed: broadcast::Sender<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changed, _) = broadcast::channel(32);
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            changed,
        }
    }
}

impl RecordStore for MemoryStore {
    async fn create(&self, new: NewRecord) -> Result<AttendanceRecord, StoreError> {
        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_name: new.employee_name,
            job_position: new.job_position,
            kind: new.kind,
            date: new.date,
            time: new.time,
            timestamp: new.timestamp,
            formatted_date_time: new.formatted_date_time,
        };
        self.records.lock().unwrap().push(record.clone());
        let _ = self.changed.send(());
        Ok(record)
    }

    async fn query_by_employee_and_date(
        &self,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_name == employee_name && r.date == date)
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn changes(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }
}
