use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance event. Created exactly once by the submission flow,
/// never updated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    /// Store-assigned document id.
    #[schema(example = "a3f1c9d2-5b0e-4f3a-9c1d-2e6b7a8f0c4d")]
    pub id: String,
    #[schema(example = "Budi")]
    pub employee_name: String,
    #[schema(example = "Teller")]
    pub job_position: Option<String>,
    pub kind: EventKind,
    /// Local calendar key (WIB), `yyyy-MM-dd`.
    #[schema(example = "2024-06-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// Local wall-clock time (WIB), `HH:mm:ss`.
    #[schema(example = "08:00:00", value_type = String)]
    pub time: NaiveTime,
    pub timestamp: DateTime<Utc>,
    /// Display form, `dd/MM/yyyy HH:mm:ss` in WIB.
    #[schema(example = "01/06/2024 08:00:00")]
    pub formatted_date_time: String,
}

/// What the submission flow hands to the store; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub employee_name: String,
    pub job_position: Option<String>,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub timestamp: DateTime<Utc>,
    pub formatted_date_time: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    CheckIn,
    CheckOut,
}

impl EventKind {
    /// Indonesian event name used in user-facing messages.
    pub fn local_name(&self) -> &'static str {
        match self {
            EventKind::CheckIn => "masuk",
            EventKind::CheckOut => "pulang",
        }
    }

    /// Status label shown in the admin table and the export.
    pub fn status_label(&self) -> &'static str {
        match self {
            EventKind::CheckIn => "Masuk",
            EventKind::CheckOut => "Pulang",
        }
    }
}

// The store returns records in no particular order; every consumer sorts
// after fetch. Both sorts are stable, so records with equal timestamps keep
// their insertion order.

/// Newest first, for admin views.
pub fn sort_newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by_key(|r| std::cmp::Reverse(r.timestamp));
}

/// Chronological, for a single employee's daily history.
pub fn sort_chronological(records: &mut [AttendanceRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, secs: i64) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_name: "Budi".to_string(),
            job_position: Some("Teller".to_string()),
            kind: EventKind::CheckIn,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            formatted_date_time: "01/06/2024 08:00:00".to_string(),
        }
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&EventKind::CheckIn).unwrap(),
            "\"check_in\""
        );
        assert_eq!(
            serde_json::from_str::<EventKind>("\"check_out\"").unwrap(),
            EventKind::CheckOut
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EventKind::CheckIn.local_name(), "masuk");
        assert_eq!(EventKind::CheckOut.local_name(), "pulang");
        assert_eq!(EventKind::CheckIn.status_label(), "Masuk");
        assert_eq!(EventKind::CheckOut.status_label(), "Pulang");
    }

    #[test]
    fn sorts_by_timestamp() {
        let mut records = vec![record("a", 30), record("b", 10), record("c", 20)];

        sort_chronological(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);

        sort_newest_first(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let mut records = vec![record("first", 10), record("second", 10)];
        sort_newest_first(&mut records);
        assert_eq!(records[0].id, "first");
        assert_eq!(records[1].id, "second");
    }
}
