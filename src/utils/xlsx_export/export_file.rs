use uuid::Uuid;

pub const EXPORT_EXTENSION: &str = "xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Random `{32 hex chars}.xlsx` name. Never derived from user input.
pub fn generate_export_filename() -> String {
    format!("{}.{}", Uuid::new_v4().simple(), EXPORT_EXTENSION)
}

/// Header row: `overrides[i]` where one is given, the column's own name otherwise.
/// Extra overrides beyond the column count are ignored.
pub fn final_headers(columns: &[String], overrides: &[String]) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| overrides.get(i).unwrap_or(column).clone())
        .collect()
}

/// A plain file name inside the export directory: no separators, no parent
/// references, no hidden files, nothing that cannot go into a quoted header value.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name
            .chars()
            .any(|c| c.is_control() || matches!(c, '/' | '\\' | '"'))
}

pub fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.') {
        Some((_, ext)) if ext.eq_ignore_ascii_case(EXPORT_EXTENSION) => XLSX_CONTENT_TYPE,
        _ => "application/octet-stream",
    }
}
