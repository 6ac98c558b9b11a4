// Loading the agreements sheet
pub mod csv_parser;
pub mod xlsx_parser;

pub use csv_parser::SheetCsvParser;
pub use xlsx_parser::SheetXlsxParser;

use crate::config::LoaderSettings;
use crate::error::Result;
use shared::models::Dataset;
use std::path::Path;

/// Workbooks go through the xlsx reader, anything else is taken as delimited text.
pub fn load_dataset(file_path: &Path, settings: &LoaderSettings) -> Result<Dataset> {
    let is_workbook = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm")
        });
    if is_workbook {
        SheetXlsxParser::load(file_path, settings)
    } else {
        SheetCsvParser::load(file_path, settings)
    }
}
