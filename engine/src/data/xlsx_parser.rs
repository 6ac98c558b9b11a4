use crate::config::LoaderSettings;
use crate::error::{EngineError, Result};
use shared::models::Dataset;
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::Worksheet;

/// Reads one worksheet of an `.xlsx` workbook, the way the sheet is kept by hand.
/// Rows hidden in Excel and blank rows never reach the dataset.
pub struct SheetXlsxParser;

impl SheetXlsxParser {
    pub fn load(file_path: &Path, settings: &LoaderSettings) -> Result<Dataset> {
        info!(
            "Loading sheet '{}' of {}",
            settings.sheet_name,
            file_path.display()
        );
        let book = umya_spreadsheet::reader::xlsx::read(file_path).map_err(|e| {
            EngineError::SpreadsheetError(format!(
                "failed to read workbook '{}': {}",
                file_path.display(),
                e
            ))
        })?;
        let sheet = book.get_sheet_by_name(&settings.sheet_name).ok_or_else(|| {
            EngineError::SpreadsheetError(format!(
                "workbook '{}' has no sheet '{}'",
                file_path.display(),
                settings.sheet_name
            ))
        })?;
        let dataset = Self::load_sheet(sheet);
        info!("Sheet loaded: {} visible rows", dataset.len());
        Ok(dataset)
    }

    pub fn load_sheet(sheet: &Worksheet) -> Dataset {
        let (max_col, max_row) = sheet.get_highest_column_and_row();
        let headers: Vec<String> = (1..=max_col)
            .map(|col| sheet.get_value((col, 1)).trim().to_string())
            .collect();

        let mut dataset = Dataset::new(headers);
        for line in 2..=max_row {
            if Self::is_hidden(sheet, line) {
                debug!(line, "Skipping hidden row");
                continue;
            }
            let cells = (1..=max_col).map(|col| sheet.get_value((col, line))).collect();
            let row = dataset.row(line as usize, cells);
            if row.is_blank() {
                debug!(line, "Skipping blank row");
                continue;
            }
            dataset.push(row);
        }
        dataset
    }

    fn is_hidden(sheet: &Worksheet, line: u32) -> bool {
        sheet
            .get_row_dimension(&line)
            .map_or(false, |row| *row.get_hidden())
    }
}
