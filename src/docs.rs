use crate::api::admin::LoginRequest;
use crate::api::attendance::SubmitRequest;
use crate::model::attendance::{AttendanceRecord, EventKind};
use crate::report::{AttendanceStats, RecordFilter};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sistem Absensi API",
        version = "1.0.0",
        description = r#"
## Employee Attendance System

Check-in/check-out kiosk backend with an admin review panel.

### Key Features
- **Attendance Kiosk**
  - Record check-in (07:00 - 12:00 WIB) and check-out (12:00 - 18:00 WIB)
  - One check-in and one check-out per employee per day
  - Live view of today's records per employee
- **Admin Panel**
  - Filter records by date, name, position and status
  - Statistics and live record feed
  - Excel export (filtered, date-range, or fixed-name)

### Security
Admin endpoints require the shared admin password in the `X-Admin-Password` header.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::submit,
        crate::api::attendance::today,
        crate::api::attendance::today_live,
        crate::api::attendance::windows,

        crate::api::admin::login,
        crate::api::admin::records,
        crate::api::admin::records_live,
        crate::api::admin::stats,
        crate::api::admin::export_xlsx,
        crate::api::admin::export_range,
        crate::api::admin::export_auto
    ),
    components(
        schemas(
            SubmitRequest,
            LoginRequest,
            AttendanceRecord,
            EventKind,
            AttendanceStats,
            RecordFilter
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Kiosk check-in/check-out APIs"),
        (name = "Admin", description = "Admin review and export APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_password",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::auth::ADMIN_PASSWORD_HEADER,
                ))),
            );
        }
    }
}
