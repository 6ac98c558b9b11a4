// Typed access to raw row cells, turning problems into row-level errors
use crate::data::csv_parser::russian_format;
use crate::error::{EngineError, Result};
use chrono::NaiveDate;
use shared::models::RawRow;

pub fn cell<'a>(row: &'a RawRow, name: &str) -> Result<Option<&'a str>> {
    row.cell(name).ok_or_else(|| EngineError::MissingField {
        row: row.line,
        field: name.to_string(),
    })
}

/// Verbatim text; a blank cell reads as an empty string.
pub fn text(row: &RawRow, name: &str) -> Result<String> {
    Ok(cell(row, name)?.unwrap_or_default().to_string())
}

pub fn required_text(row: &RawRow, name: &str) -> Result<String> {
    Ok(cell(row, name)?
        .ok_or_else(|| missing_value(row, name))?
        .to_string())
}

pub fn parse_number(row: &RawRow, name: &str, value: &str) -> Result<f64> {
    russian_format::parse_decimal(value).ok_or_else(|| EngineError::MalformedNumber {
        row: row.line,
        field: name.to_string(),
        value: value.to_string(),
    })
}

pub fn optional_number(row: &RawRow, name: &str) -> Result<Option<f64>> {
    cell(row, name)?
        .map(|value| parse_number(row, name, value))
        .transpose()
}

pub fn required_number(row: &RawRow, name: &str) -> Result<f64> {
    optional_number(row, name)?.ok_or_else(|| missing_value(row, name))
}

/// Same as [`required_number`] for a column addressed by position.
pub fn required_number_at(row: &RawRow, idx: usize) -> Result<f64> {
    let name = header_at(row, idx);
    let value = row.cell_at(idx).ok_or_else(|| missing_value(row, name))?;
    parse_number(row, name, value)
}

pub fn required_date(row: &RawRow, name: &str) -> Result<NaiveDate> {
    let value = cell(row, name)?.ok_or_else(|| missing_value(row, name))?;
    russian_format::parse_date(value).ok_or_else(|| EngineError::MalformedDate {
        row: row.line,
        field: name.to_string(),
        value: value.to_string(),
    })
}

pub fn header_at(row: &RawRow, idx: usize) -> &str {
    row.headers.get(idx).map(String::as_str).unwrap_or_default()
}

fn missing_value(row: &RawRow, name: &str) -> EngineError {
    EngineError::MissingValue {
        row: row.line,
        field: name.to_string(),
    }
}
