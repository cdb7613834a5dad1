use crate::utils::database_manager::cell_value::CellValue;
use crate::utils::errors::xlsx_export_errors::{ErrCtx, XlsxExportError};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

// Worksheet limits of the xlsx format.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;
/// Characters a single cell can hold.
pub const MAX_STRING_CHARS: usize = 32_767;

pub const SHEET_NAME: &str = "Sheet1";

/// Cuts `text` to the cell limit on a char boundary; shorter text is returned as is.
pub fn truncate_to_cell_limit(text: &str) -> &str {
    match text.char_indices().nth(MAX_STRING_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

struct CellFormats {
    date: Format,
    datetime: Format,
}

/// Writes one worksheet: row 0 holds `headers`, rows 1..=N hold `rows` in order.
/// Blocking; call it from a blocking thread.
pub fn write_xlsx(
    path: &Path,
    headers: &[String],
    rows: &[Vec<CellValue>],
) -> Result<(), XlsxExportError> {
    if headers.len() > MAX_COLUMNS {
        return Err(XlsxExportError::TooManyColumns {
            count: headers.len(),
            max: MAX_COLUMNS,
        });
    }
    if rows.len() + 1 > MAX_ROWS {
        return Err(XlsxExportError::TooManyRows {
            count: rows.len() + 1,
            max: MAX_ROWS,
        });
    }

    let formats = CellFormats {
        date: Format::new().set_num_format("yyyy-mm-dd"),
        datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).ctx("write_xlsx:set_name")?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, truncate_to_cell_limit(header))
            .ctx("write_xlsx:header")?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, value, &formats)
                .ctx("write_xlsx:cell")?;
        }
    }

    workbook.save(path).ctx("write_xlsx:save")?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    formats: &CellFormats,
) -> Result<(), XlsxExportError> {
    match value {
        // blank cell
        CellValue::Null => {}
        CellValue::Bool(v) => {
            worksheet.write_boolean(row, col, *v)?;
        }
        CellValue::Int(v) => {
            worksheet.write_number(row, col, *v as f64)?;
        }
        CellValue::UInt(v) => {
            worksheet.write_number(row, col, *v as f64)?;
        }
        CellValue::Float(v) if v.is_finite() => {
            worksheet.write_number(row, col, *v)?;
        }
        CellValue::Float(v) => {
            worksheet.write_string(row, col, v.to_string())?;
        }
        // Always literal text, a leading '=' is not turned into a formula.
        // Over-long values are cut to what a cell holds.
        CellValue::Text(v) => {
            worksheet.write_string(row, col, truncate_to_cell_limit(v))?;
        }
        CellValue::Date(v) => {
            worksheet.write_datetime_with_format(row, col, v, &formats.date)?;
        }
        CellValue::DateTime(v) => {
            worksheet.write_datetime_with_format(row, col, v, &formats.datetime)?;
        }
    }
    Ok(())
}
