use crate::config::LoaderSettings;
use crate::error::{EngineError, Result};
use csv::ReaderBuilder;
use shared::models::Dataset;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

// Russian number and date notation as it comes out of a spreadsheet export
pub mod russian_format {
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    // Parses "1 234,56", "1234.5" or "1.234,56" into f64
    pub fn parse_decimal(s: &str) -> Option<f64> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
            .collect();
        let normalized = if compact.contains(',') {
            compact.replace('.', "").replace(',', ".")
        } else {
            compact
        };
        f64::from_str(&normalized).ok().filter(|v| v.is_finite())
    }

    // Last day Excel can represent, 9999-12-31
    const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

    // Accepts "05.03.2021", "05/03/2021", "2021-03-05" and Excel day serials ("44260");
    // a trailing time part is ignored
    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let date_part = s.split_whitespace().next()?;
        let date_part = date_part.split('T').next()?;
        ["%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
            .or_else(|| from_excel_serial(date_part))
    }

    fn from_excel_serial(s: &str) -> Option<NaiveDate> {
        let serial = f64::from_str(s).ok().filter(|v| (1.0..=MAX_EXCEL_SERIAL).contains(v))?;
        // Day 0 is 1899-12-30 once Excel's phantom 1900-02-29 is accounted for
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
    }

}

const HIDDEN_MARKERS: [&str; 7] = ["1", "да", "x", "х", "+", "true", "yes"];

pub struct SheetCsvParser;

impl SheetCsvParser {
    pub fn load(file_path: &Path, settings: &LoaderSettings) -> Result<Dataset> {
        info!("Loading sheet {}", file_path.display());
        let file = File::open(file_path).map_err(|e| {
            EngineError::ConfigError(format!(
                "failed to open data file '{}': {}",
                file_path.display(),
                e
            ))
        })?;
        let dataset = Self::load_from_reader(BufReader::new(file), settings)?;
        info!("Sheet loaded: {} visible rows", dataset.len());
        Ok(dataset)
    }

    pub fn load_from_reader<R: Read>(reader: R, settings: &LoaderSettings) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(settings.delimiter_byte()?)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        let hidden_idx = settings
            .hidden_column
            .as_deref()
            .and_then(|name| headers.iter().position(|h| h == name));

        let mut dataset = Dataset::new(headers);
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            if let Some(hidden) = hidden_idx {
                if record.get(hidden).map_or(false, Self::is_hidden_marker) {
                    debug!(line, "Skipping hidden row");
                    continue;
                }
            }
            let row = dataset.row(line, record.iter().map(str::to_string).collect());
            if row.is_blank() {
                debug!(line, "Skipping blank row");
                continue;
            }
            dataset.push(row);
        }
        Ok(dataset)
    }

    fn is_hidden_marker(cell: &str) -> bool {
        let cell = cell.trim().to_lowercase();
        HIDDEN_MARKERS.contains(&cell.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_keeps_source_line_numbers() {
        let csv_content = "\
Краткое ФИО исполнителя;Всего денег;Скрыта
Иванов И.И.;1 000;
Петров П.П.;2 000;да
Сидоров С.С.;3 000;";
        let tmp_file = create_test_csv(csv_content);
        let dataset = SheetCsvParser::load(tmp_file.path(), &LoaderSettings::default()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0].line, 2);
        assert_eq!(dataset.rows[1].line, 4);
        assert_eq!(dataset.rows[1].cell("Краткое ФИО исполнителя"), Some(Some("Сидоров С.С.")));
    }

    #[test]
    fn test_hidden_markers_are_case_insensitive() {
        let csv_content = "A;Скрыта\n1;X\n2;TRUE\n3;нет\n4;";
        let dataset =
            SheetCsvParser::load_from_reader(csv_content.as_bytes(), &LoaderSettings::default())
                .unwrap();
        let kept: Vec<_> = dataset.rows.iter().map(|r| r.cell("A").unwrap().unwrap()).collect();
        assert_eq!(kept, vec!["3", "4"]);
    }

    #[test]
    fn test_without_hidden_column_all_rows_are_kept() {
        let settings = LoaderSettings {
            delimiter: ",".to_string(),
            hidden_column: None,
            ..LoaderSettings::default()
        };
        let dataset =
            SheetCsvParser::load_from_reader("A,Скрыта\n1,да\n".as_bytes(), &settings).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_blank_rows_and_bom_are_dropped() {
        let csv_content = "\u{feff}A;B\n1;2\n;\n ; \n";
        let dataset =
            SheetCsvParser::load_from_reader(csv_content.as_bytes(), &LoaderSettings::default())
                .unwrap();
        assert_eq!(dataset.headers[0], "A");
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let result = SheetCsvParser::load_from_reader(
            "A;B\n1;2;3\n".as_bytes(),
            &LoaderSettings::default(),
        );
        assert!(matches!(result, Err(EngineError::CsvSystemError { .. })));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = SheetCsvParser::load(Path::new("/nonexistent/contracts.csv"), &LoaderSettings::default());
        assert!(result.unwrap_err().to_string().contains("failed to open data file"));
    }
}
