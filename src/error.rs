use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use std::fmt;

use crate::model::attendance::EventKind;
use crate::time_policy;

/// Backend failure talking to the record store. Recoverable by retrying.
#[derive(Debug, derive_more::Display, derive_more::From)]
#[display(fmt = "record store failure: {}", _0)]
pub struct StoreError(pub sqlx::Error);

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Rejection from the submission flow. Every variant surfaces to the kiosk
/// as a single human-readable message; the UI only distinguishes
/// success from failure.
#[derive(Debug, derive_more::From)]
pub enum SubmitError {
    /// Employee name empty after trimming.
    MissingName,
    /// Job position empty after trimming.
    MissingPosition,
    /// Outside the allowed clock range for this event kind.
    OutsideWindow(EventKind),
    /// Same-kind event already recorded today for this employee.
    AlreadyRecorded(EventKind),
    /// Check-out attempted before any check-in today.
    NotCheckedIn,
    #[from]
    Store(StoreError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingName => write!(f, "Nama karyawan harus diisi"),
            SubmitError::MissingPosition => write!(f, "Jabatan harus diisi"),
            SubmitError::OutsideWindow(kind) => write!(
                f,
                "Absensi {} hanya bisa dilakukan pada jam {}",
                kind.local_name(),
                time_policy::window_label(*kind)
            ),
            SubmitError::AlreadyRecorded(kind) => {
                write!(f, "Anda sudah melakukan absensi {} hari ini", kind.local_name())
            }
            SubmitError::NotCheckedIn => write!(f, "Anda harus absen masuk terlebih dahulu"),
            SubmitError::Store(_) => write!(f, "Gagal menyimpan absensi, silakan coba lagi"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmitError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

/// Spreadsheet serialization or write failure. Recoverable by retrying.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ExportError {
    #[display(fmt = "gagal membuat berkas Excel: {}", _0)]
    Workbook(rust_xlsxwriter::XlsxError),
    #[display(fmt = "gagal menulis berkas Excel: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Workbook(e) => Some(e),
            ExportError::Io(e) => Some(e),
        }
    }
}

impl ResponseError for ExportError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}
