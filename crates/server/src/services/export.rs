//! Spreadsheet export of all complaints.
//!
//! Builds an XLSX workbook with a fixed header row and one row per
//! complaint, served by the admin export route as a file download.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::models::Complaint;

/// Worksheet name.
pub const SHEET_NAME: &str = "الشكاوى";

/// Download file name.
pub const EXPORT_FILE_NAME: &str = "complaints.xlsx";

/// XLSX content type.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Fixed column headers, in export order.
pub const HEADERS: [&str; 8] = [
    "ID",
    "الاسم",
    "الهاتف",
    "الايميل",
    "العنوان",
    "المحتوى",
    "الحالة",
    "تاريخ الإرسال",
];

/// Timestamp format used in the export.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Build an XLSX workbook containing all complaints.
///
/// # Errors
///
/// Returns `XlsxError` if the workbook cannot be assembled.
pub fn complaints_workbook(complaints: &[Complaint]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, u16::try_from(col).unwrap_or(0), *header)?;
    }

    for (i, complaint) in complaints.iter().enumerate() {
        let row = u32::try_from(i + 1).unwrap_or(u32::MAX);
        worksheet.write_number(row, 0, f64::from(complaint.id.as_i32()))?;
        worksheet.write_string(row, 1, &complaint.name)?;
        worksheet.write_string(row, 2, complaint.phone.as_str())?;
        worksheet.write_string(
            row,
            3,
            complaint.email.as_ref().map_or("", |e| e.as_str()),
        )?;
        worksheet.write_string(row, 4, &complaint.title)?;
        worksheet.write_string(row, 5, &complaint.content)?;
        worksheet.write_string(row, 6, complaint.status.label())?;
        worksheet.write_string(
            row,
            7,
            complaint.created_at.format(DATE_FORMAT).to_string(),
        )?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use shakwa_core::{ComplaintId, ComplaintStatus, Phone, TrackingToken};

    use super::*;

    fn sample_complaint(id: i32) -> Complaint {
        Complaint {
            id: ComplaintId::new(id),
            token: TrackingToken::generate(),
            name: "Ali".to_string(),
            phone: Phone::parse("07701234567").unwrap(),
            email: None,
            title: "Water outage".to_string(),
            content: "No water for 3 days".to_string(),
            status: ComplaintStatus::Waiting,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_workbook_is_valid_zip() {
        let complaints = vec![sample_complaint(1), sample_complaint(2)];
        let bytes = complaints_workbook(&complaints).unwrap();

        // XLSX files are ZIP archives; check the magic bytes.
        assert!(bytes.len() > 4);
        assert_eq!(bytes.get(..2), Some(&b"PK"[..]));
    }

    #[test]
    fn test_workbook_empty_list() {
        // Header-only workbook is still valid.
        let bytes = complaints_workbook(&[]).unwrap();
        assert!(!bytes.is_empty());
    }
}
