use chrono::NaiveDate;
use sqlx::MySqlPool;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::RecordStore;
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, NewRecord};

/// sqlx-backed adapter over the `attendance_records` collection.
///
/// Queries filter by equality only and never ORDER BY; callers sort after
/// fetch. The change signal fires on every create so live queries can
/// re-fetch their matching set.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
    changed: broadcast::Sender<()>,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        let (changed, _) = broadcast::channel(32);
        Self { pool, changed }
    }
}

const SELECT_FIELDS: &str =
    "id, employee_name, job_position, kind, `date`, `time`, `timestamp`, formatted_date_time";

impl RecordStore for MySqlStore {
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

        sqlx::query(
            r#"
            INSERT INTO attendance_records
            (id, employee_name, job_position, kind, `date`, `time`, `timestamp`, formatted_date_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.employee_name)
        .bind(&record.job_position)
        .bind(record.kind)
        .bind(record.date)
        .bind(record.time)
        .bind(record.timestamp)
        .bind(&record.formatted_date_time)
        .execute(&self.pool)
        .await?;

        // Nobody subscribed is fine.
        let _ = self.changed.send(());

        Ok(record)
    }

    async fn query_by_employee_and_date(
        &self,
        employee_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let sql = format!(
            "SELECT {SELECT_FIELDS} FROM attendance_records WHERE employee_name = ? AND `date` = ?"
        );
        let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_name)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn query_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let sql = format!("SELECT {SELECT_FIELDS} FROM attendance_records");
        let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    fn changes(&self) -> broadcast::Receiver<()> {
        self.changed.subscribe()
    }
}
