//! Excel export of attendance records.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::ExportError;
use crate::model::attendance::AttendanceRecord;

/// Base name for the admin download.
pub const DEFAULT_EXPORT_BASE: &str = "Data_Absensi_BPR";
/// Fixed target of the auto-export; overwritten on every run.
pub const AUTO_EXPORT_FILE: &str = "Data_Absensi_BPR.xlsx";

const SHEET_NAME: &str = "Absensi";
const HEADERS: [&str; 7] = [
    "No",
    "Nama Karyawan",
    "Jabatan",
    "Tanggal",
    "Waktu",
    "Status",
    "Timestamp",
];
const COLUMN_WIDTHS: [f64; 7] = [5.0, 25.0, 20.0, 12.0, 10.0, 10.0, 20.0];

fn fill_sheet(worksheet: &mut Worksheet, records: &[AttendanceRecord]) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, (idx + 1) as f64)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, record.job_position.as_deref().unwrap_or("-"))?;
        worksheet.write_string(row, 3, record.date.to_string())?;
        worksheet.write_string(row, 4, record.time.format("%H:%M:%S").to_string())?;
        worksheet.write_string(row, 5, record.kind.status_label())?;
        worksheet.write_string(row, 6, &record.formatted_date_time)?;
    }

    Ok(())
}

/// Single-sheet workbook as bytes, for the download endpoint.
pub fn build_workbook(records: &[AttendanceRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), records)?;
    Ok(workbook.save_to_buffer()?)
}

/// Fixed-filename variant: writes (and overwrites) `path` in place.
pub fn write_workbook(records: &[AttendanceRecord], path: &Path) -> Result<(), ExportError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), records)?;
    workbook.save(path)?;
    Ok(())
}

/// `{base}_{yyyyMMdd_HHmmss}.xlsx`
pub fn export_filename(base: &str, now: DateTime<FixedOffset>) -> String {
    format!("{base}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Base name for a date-range export.
pub fn range_export_base(start: NaiveDate, end: NaiveDate) -> String {
    format!("Absensi_{start}_to_{end}")
}

/// Records whose date falls within `[start, end]`.
pub fn filter_by_date_range(
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}
