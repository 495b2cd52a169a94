//! The attendance submission flow: input validation, time-window check,
//! duplicate and sequence guards, then a single create against the store.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::info;

use crate::error::SubmitError;
use crate::model::attendance::{AttendanceRecord, EventKind, NewRecord};
use crate::store::RecordStore;
use crate::time_policy;

/// Records one attendance event for `employee_name` at the current WIB time.
pub async fn submit<S: RecordStore>(
    store: &S,
    employee_name: &str,
    job_position: &str,
    kind: EventKind,
) -> Result<AttendanceRecord, SubmitError> {
    submit_at(store, employee_name, job_position, kind, time_policy::wib_now()).await
}

/// `submit` with an explicit instant, so tests can drive simulated clocks.
///
/// The load-check-create sequence is not transactional: two devices racing it
/// for the same employee can both pass the guards and write the same event
/// twice. The store's single-document create is the only atomic unit here.
pub(crate) async fn submit_at<S: RecordStore>(
    store: &S,
    employee_name: &str,
    job_position: &str,
    kind: EventKind,
    now: DateTime<FixedOffset>,
) -> Result<AttendanceRecord, SubmitError> {
    let employee_name = employee_name.trim();
    if employee_name.is_empty() {
        return Err(SubmitError::MissingName);
    }

    let job_position = job_position.trim();
    if job_position.is_empty() {
        return Err(SubmitError::MissingPosition);
    }

    if !time_policy::is_within_window(kind, now) {
        return Err(SubmitError::OutsideWindow(kind));
    }

    let today = now.date_naive();
    let todays = store
        .query_by_employee_and_date(employee_name, today)
        .await?;

    if todays.iter().any(|r| r.kind == kind) {
        return Err(SubmitError::AlreadyRecorded(kind));
    }

    if kind == EventKind::CheckOut && !todays.iter().any(|r| r.kind == EventKind::CheckIn) {
        return Err(SubmitError::NotCheckedIn);
    }

    let record = store
        .create(NewRecord {
            employee_name: employee_name.to_string(),
            job_position: Some(job_position.to_string()),
            kind,
            date: today,
            time: now.time(),
            timestamp: now.with_timezone(&Utc),
            formatted_date_time: now.format("%d/%m/%Y %H:%M:%S").to_string(),
        })
        .await?;

    info!(employee = %record.employee_name, kind = %record.kind, "attendance recorded");
    Ok(record)
}
