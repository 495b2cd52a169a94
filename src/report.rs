//! Client-side filtering and statistics over an in-memory record set.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::{AttendanceRecord, EventKind};
use crate::time_policy;

/// Admin-view filter. Absent fields match everything; supplied fields must
/// all match.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RecordFilter {
    /// Exact calendar date.
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring on the employee name.
    pub name: Option<String>,
    /// Case-insensitive substring on the job position.
    pub position: Option<String>,
    /// Exact event kind.
    pub kind: Option<EventKind>,
}

/// Records matching every supplied predicate, in input order.
pub fn apply_filters(records: &[AttendanceRecord], filter: &RecordFilter) -> Vec<AttendanceRecord> {
    let name = normalized(filter.name.as_deref());
    let position = normalized(filter.position.as_deref());

    records
        .iter()
        .filter(|r| filter.date.map_or(true, |d| r.date == d))
        .filter(|r| {
            name.as_deref()
                .map_or(true, |n| r.employee_name.to_lowercase().contains(n))
        })
        .filter(|r| {
            position.as_deref().map_or(true, |p| {
                r.job_position
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(p)
            })
        })
        .filter(|r| filter.kind.map_or(true, |k| r.kind == k))
        .cloned()
        .collect()
}

// Blank search boxes behave like no filter at all.
fn normalized(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceStats {
    pub total_records: usize,
    pub unique_employees: usize,
    pub today_check_ins: usize,
    pub today_check_outs: usize,
}

/// Statistics over `records`; "today" is the WIB date taken once, here.
pub fn compute_statistics(records: &[AttendanceRecord]) -> AttendanceStats {
    statistics_on(records, time_policy::wib_now().date_naive())
}

pub fn statistics_on(records: &[AttendanceRecord], today: NaiveDate) -> AttendanceStats {
    let unique_employees = records
        .iter()
        .map(|r| r.employee_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    AttendanceStats {
        total_records: records.len(),
        unique_employees,
        today_check_ins: records
            .iter()
            .filter(|r| r.date == today && r.kind == EventKind::CheckIn)
            .count(),
        today_check_outs: records
            .iter()
            .filter(|r| r.date == today && r.kind == EventKind::CheckOut)
            .count(),
    }
}
