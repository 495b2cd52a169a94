use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::api::sse_response;
use crate::flow;
use crate::model::attendance::{self, AttendanceRecord, EventKind};
use crate::store::{MySqlStore, RecordStore, SubscriptionFilter};
use crate::time_policy;

#[derive(Deserialize, ToSchema)]
pub struct SubmitRequest {
    #[schema(example = "Budi")]
    pub employee_name: String,
    #[schema(example = "Teller")]
    pub job_position: String,
    #[schema(example = "check_in")]
    pub kind: EventKind,
}

#[derive(Deserialize, IntoParams)]
pub struct TodayQuery {
    pub employee_name: String,
}

/// Submit one attendance event
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Rejected by validation, time window, duplicate or sequence rules", body = Object, example = json!({
            "message": "Anda sudah melakukan absensi masuk hari ini"
        })),
        (status = 500, description = "Record store failure")
    ),
    tag = "Attendance"
)]
pub async fn submit(
    store: web::Data<MySqlStore>,
    payload: web::Json<SubmitRequest>,
) -> actix_web::Result<impl Responder> {
    let record = flow::submit(
        store.get_ref(),
        &payload.employee_name,
        &payload.job_position,
        payload.kind,
    )
    .await?;

    Ok(HttpResponse::Ok().json(record))
}

/// Today's records for one employee, chronological
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    params(TodayQuery),
    responses(
        (status = 200, description = "Today's records, oldest first", body = Vec<AttendanceRecord>),
        (status = 500, description = "Record store failure")
    ),
    tag = "Attendance"
)]
pub async fn today(
    store: web::Data<MySqlStore>,
    query: web::Query<TodayQuery>,
) -> actix_web::Result<impl Responder> {
    let today = time_policy::wib_now().date_naive();

    let mut records = store
        .query_by_employee_and_date(query.employee_name.trim(), today)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch today's records");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    attendance::sort_chronological(&mut records);
    Ok(HttpResponse::Ok().json(records))
}

/// Live snapshots of one employee's records for today
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today/live",
    params(TodayQuery),
    responses(
        (status = 200, description = "text/event-stream of snapshot frames, oldest first")
    ),
    tag = "Attendance"
)]
pub async fn today_live(
    store: web::Data<MySqlStore>,
    query: web::Query<TodayQuery>,
) -> impl Responder {
    let filter = SubscriptionFilter {
        employee_name: query.employee_name.trim().to_string(),
        date: time_policy::wib_now().date_naive(),
    };
    sse_response(store.subscribe(Some(filter)), attendance::sort_chronological)
}

/// Allowed time windows and the current WIB clock
#[utoipa::path(
    get,
    path = "/api/v1/attendance/windows",
    responses(
        (status = 200, description = "Window labels and current time", body = Object, example = json!({
            "now": "01/06/2024 08:00:00",
            "check_in": "07:00 - 12:00 WIB",
            "check_out": "12:00 - 18:00 WIB"
        }))
    ),
    tag = "Attendance"
)]
pub async fn windows() -> impl Responder {
    let now = time_policy::wib_now();
    HttpResponse::Ok().json(json!({
        "now": now.format("%d/%m/%Y %H:%M:%S").to_string(),
        "check_in": time_policy::window_label(EventKind::CheckIn),
        "check_out": time_policy::window_label(EventKind::CheckOut),
    }))
}
