use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::sse_response;
use crate::auth::AdminAuth;
use crate::config::Config;
use crate::export;
use crate::model::attendance::{self, AttendanceRecord};
use crate::report::{self, AttendanceStats, RecordFilter};
use crate::store::{MySqlStore, RecordStore};
use crate::time_policy;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "rahasia")]
    pub password: String,
}

#[derive(Deserialize, IntoParams)]
pub struct RangeQuery {
    /// First date of the range, inclusive.
    pub start: NaiveDate,
    /// Last date of the range, inclusive.
    pub end: NaiveDate,
}

async fn load_all(store: &MySqlStore) -> actix_web::Result<Vec<AttendanceRecord>> {
    store.query_all().await.map_err(|e| {
        error!(error = %e, "Failed to fetch attendance records");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })
}

fn xlsx_attachment(filename: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes)
}

/// Admin gate probe
#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 204, description = "Password accepted"),
        (status = 401, description = "Password rejected", body = Object, example = json!({
            "message": "Password admin salah"
        }))
    ),
    tag = "Admin"
)]
pub async fn login(
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    if payload.password == config.admin_password {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::Unauthorized().json(json!({ "message": "Password admin salah" }))
    }
}

/// Filtered attendance list, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/records",
    params(RecordFilter),
    responses(
        (status = 200, description = "Matching records plus count"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Record store failure")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn records(
    _auth: AdminAuth,
    store: web::Data<MySqlStore>,
    filter: web::Query<RecordFilter>,
) -> actix_web::Result<impl Responder> {
    let mut all = load_all(store.get_ref()).await?;
    attendance::sort_newest_first(&mut all);
    let data = report::apply_filters(&all, &filter);

    Ok(HttpResponse::Ok().json(json!({ "total": data.len(), "data": data })))
}

/// Live snapshots of the whole collection, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/records/live",
    responses(
        (status = 200, description = "text/event-stream of snapshot frames, newest first"),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn records_live(_auth: AdminAuth, store: web::Data<MySqlStore>) -> impl Responder {
    sse_response(store.subscribe(None), attendance::sort_newest_first)
}

/// Attendance statistics
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Counts over the full record set", body = AttendanceStats),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Record store failure")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn stats(
    _auth: AdminAuth,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let all = load_all(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(report::compute_statistics(&all)))
}

/// Export the (filtered) record set as a timestamped xlsx download
#[utoipa::path(
    get,
    path = "/api/v1/admin/export",
    params(RecordFilter),
    responses(
        (status = 200, description = "xlsx attachment"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Record store or export failure")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn export_xlsx(
    _auth: AdminAuth,
    store: web::Data<MySqlStore>,
    filter: web::Query<RecordFilter>,
) -> actix_web::Result<impl Responder> {
    let mut all = load_all(store.get_ref()).await?;
    attendance::sort_newest_first(&mut all);
    let data = report::apply_filters(&all, &filter);

    let bytes = export::build_workbook(&data)?;
    let filename = export::export_filename(export::DEFAULT_EXPORT_BASE, time_policy::wib_now());
    Ok(xlsx_attachment(&filename, bytes))
}

/// Export one inclusive date range as an xlsx download
#[utoipa::path(
    get,
    path = "/api/v1/admin/export/range",
    params(RangeQuery),
    responses(
        (status = 200, description = "xlsx attachment named for the range"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Record store or export failure")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn export_range(
    _auth: AdminAuth,
    store: web::Data<MySqlStore>,
    query: web::Query<RangeQuery>,
) -> actix_web::Result<impl Responder> {
    let mut all = load_all(store.get_ref()).await?;
    attendance::sort_newest_first(&mut all);
    let data = export::filter_by_date_range(&all, query.start, query.end);

    let bytes = export::build_workbook(&data)?;
    let base = export::range_export_base(query.start, query.end);
    let filename = export::export_filename(&base, time_policy::wib_now());
    Ok(xlsx_attachment(&filename, bytes))
}

/// Overwrite the fixed-name export file on the server
#[utoipa::path(
    post,
    path = "/api/v1/admin/export/auto",
    responses(
        (status = 200, description = "File written", body = Object, example = json!({
            "filename": "Data_Absensi_BPR.xlsx"
        })),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Record store or export failure")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn export_auto(
    _auth: AdminAuth,
    store: web::Data<MySqlStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let mut all = load_all(store.get_ref()).await?;
    attendance::sort_newest_first(&mut all);

    let path = std::path::Path::new(&config.export_dir).join(export::AUTO_EXPORT_FILE);
    export::write_workbook(&all, &path)?;

    Ok(HttpResponse::Ok().json(json!({ "filename": export::AUTO_EXPORT_FILE })))
}
