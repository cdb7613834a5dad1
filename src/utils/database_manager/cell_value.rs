use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// One scalar taken out of a result row, typed just enough to be written
/// into a spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

fn decimal_to_cell(decimal: sqlx::types::BigDecimal) -> CellValue {
    let text = decimal.to_string();
    match text.parse::<f64>() {
        Ok(v) => CellValue::Float(v),
        Err(_) => CellValue::Text(text),
    }
}

pub fn extract_mysql_value(row: &sqlx::mysql::MySqlRow, idx: usize) -> CellValue {
    let value_ref = row.try_get_raw(idx).ok();

    if let Some(vr) = value_ref {
        if vr.is_null() {
            return CellValue::Null;
        }

        let type_info = vr.type_info().clone();
        let type_name = type_info.name();

        match type_name {
            // TINYINT(1) columns arrive as BOOLEAN.
            "BOOLEAN" => {
                if let Ok(v) = row.try_get::<bool, _>(idx) {
                    return CellValue::Bool(v);
                }
            }
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                if let Ok(v) = row.try_get::<i64, _>(idx) {
                    return CellValue::Int(v);
                }
            }
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" | "YEAR" => {
                if let Ok(v) = row.try_get::<u64, _>(idx) {
                    return CellValue::UInt(v);
                }
            }
            "FLOAT" => {
                if let Ok(v) = row.try_get::<f32, _>(idx) {
                    return CellValue::Float(v as f64);
                }
            }
            "DOUBLE" => {
                if let Ok(v) = row.try_get::<f64, _>(idx) {
                    return CellValue::Float(v);
                }
            }
            "DECIMAL" => {
                if let Ok(v) = row.try_get::<sqlx::types::BigDecimal, _>(idx) {
                    return decimal_to_cell(v);
                }
            }
            "VARCHAR" | "CHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => {
                if let Ok(v) = row.try_get::<String, _>(idx) {
                    return CellValue::Text(v);
                }
            }
            "DATE" => {
                if let Ok(v) = row.try_get::<NaiveDate, _>(idx) {
                    return CellValue::Date(v);
                }
            }
            "TIME" => {
                if let Ok(v) = row.try_get::<chrono::NaiveTime, _>(idx) {
                    return CellValue::Text(v.to_string());
                }
            }
            "DATETIME" | "TIMESTAMP" => {
                if let Ok(v) = row.try_get::<NaiveDateTime, _>(idx) {
                    return CellValue::DateTime(v);
                }
            }
            "JSON" => {
                if let Ok(v) = row.try_get::<sqlx::types::JsonValue, _>(idx) {
                    return CellValue::Text(v.to_string());
                }
            }
            "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => {
                if let Ok(v) = row.try_get::<Vec<u8>, _>(idx) {
                    return CellValue::Text(format!("0x{}", hex::encode(v)));
                }
            }
            _ => {}
        }
    }

    row.try_get::<String, _>(idx)
        .map(CellValue::Text)
        .or_else(|_| row.try_get::<i64, _>(idx).map(CellValue::Int))
        .or_else(|_| row.try_get::<u64, _>(idx).map(CellValue::UInt))
        .or_else(|_| row.try_get::<f64, _>(idx).map(CellValue::Float))
        .or_else(|_| row.try_get::<bool, _>(idx).map(CellValue::Bool))
        .unwrap_or(CellValue::Null)
}

/// BOOLEAN, DATE and DATETIME only exist as declared column types in SQLite;
/// expression columns carry no declaration and fall through to `None`.
fn extract_sqlite_declared(row: &sqlx::sqlite::SqliteRow, idx: usize) -> Option<CellValue> {
    let declared = row.columns().get(idx)?.type_info().name().to_ascii_uppercase();

    match declared.as_str() {
        "BOOLEAN" => row.try_get::<bool, _>(idx).ok().map(CellValue::Bool),
        "DATE" => row.try_get::<NaiveDate, _>(idx).ok().map(CellValue::Date),
        "DATETIME" => row
            .try_get::<NaiveDateTime, _>(idx)
            .ok()
            .map(CellValue::DateTime),
        _ => None,
    }
}

pub fn extract_sqlite_value(row: &sqlx::sqlite::SqliteRow, idx: usize) -> CellValue {
    let value_ref = row.try_get_raw(idx).ok();

    if let Some(vr) = value_ref {
        if vr.is_null() {
            return CellValue::Null;
        }

        if let Some(cell) = extract_sqlite_declared(row, idx) {
            return cell;
        }

        // A value reports its storage class, not the declared column type.
        let type_info = vr.type_info().clone();
        let type_name = type_info.name();

        match type_name {
            "INTEGER" => {
                if let Ok(v) = row.try_get::<i64, _>(idx) {
                    return CellValue::Int(v);
                }
            }
            "REAL" => {
                if let Ok(v) = row.try_get::<f64, _>(idx) {
                    return CellValue::Float(v);
                }
            }
            "TEXT" => {
                if let Ok(v) = row.try_get::<String, _>(idx) {
                    return CellValue::Text(v);
                }
            }
            "BLOB" => {
                if let Ok(v) = row.try_get::<Vec<u8>, _>(idx) {
                    return CellValue::Text(format!("0x{}", hex::encode(v)));
                }
            }
            _ => {}
        }
    }

    row.try_get::<String, _>(idx)
        .map(CellValue::Text)
        .or_else(|_| row.try_get::<i64, _>(idx).map(CellValue::Int))
        .or_else(|_| row.try_get::<f64, _>(idx).map(CellValue::Float))
        .or_else(|_| row.try_get::<bool, _>(idx).map(CellValue::Bool))
        .or_else(|_| {
            row.try_get::<Vec<u8>, _>(idx)
                .map(|v| CellValue::Text(format!("0x{}", hex::encode(v))))
        })
        .unwrap_or(CellValue::Null)
}
