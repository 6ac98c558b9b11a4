// Run settings, loaded from a JSON file with every key optional
use super::layout::TaskLayout;
use super::locale::Locale;
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Agreements workbook (`.xlsx`) or a delimited text export of it.
    pub data_file: PathBuf,
    pub result_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub contract_template: String,
    pub reference_template: String,
    /// Printed verbatim into every contract.
    pub start_date: String,
    pub loader: LoaderSettings,
    pub columns: ColumnNames,
    pub task_layout: TaskLayout,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_file: PathBuf::from("data/contracts.xlsx"),
            result_dir: PathBuf::from("result"),
            templates_dir: PathBuf::from("templates"),
            contract_template: "contract_template.docx".to_string(),
            reference_template: "reference_template.docx".to_string(),
            start_date: String::new(),
            loader: LoaderSettings::default(),
            columns: ColumnNames::default(),
            task_layout: TaskLayout::default(),
            locale: Locale::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("invalid settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.loader.delimiter_byte()?;
        self.task_layout.validate()?;
        self.locale.validate()?;
        Ok(())
    }

    pub fn template_path(&self, template: &str) -> PathBuf {
        self.templates_dir.join(template)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoaderSettings {
    /// Worksheet read from `.xlsx` workbooks.
    pub sheet_name: String,
    /// Delimited text exports only.
    pub delimiter: String, // Should be char, but JSON string is easier
    /// Delimited text exports carry no hidden flag, so rows with a truthy marker
    /// in this column are treated as hidden instead.
    pub hidden_column: Option<String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            sheet_name: "Лист1".to_string(),
            delimiter: ";".to_string(),
            hidden_column: Some("Скрыта".to_string()),
        }
    }
}

impl LoaderSettings {
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

/// Header names of the scalar columns of the sheet.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ColumnNames {
    pub long_executor_name: String,
    pub short_executor_name: String,
    pub power_of_attorney: String,
    pub text_before_table: String,
    pub ending_date: String,
    pub agreement_ending_date: String,
    pub executor_address: String,
    pub total_hours: String,
    pub total: String,
    pub money_this_year: String,
    pub money_next_year: String,
    pub program_codes: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            long_executor_name: "ФИОисполнителя".to_string(),
            short_executor_name: "Краткое ФИО исполнителя".to_string(),
            power_of_attorney: "Доверенность проректора".to_string(),
            text_before_table: "Текст перед таблицей".to_string(),
            ending_date: "Дата окончания оказ услуги".to_string(),
            agreement_ending_date: "Срок действия договора".to_string(),
            executor_address: "Адрес исполнителя".to_string(),
            total_hours: "Всего часов".to_string(),
            total: "Всего денег".to_string(),
            money_this_year: "Денег в текущем".to_string(),
            money_next_year: "Денег в следующем".to_string(),
            program_codes: "ОП ВО".to_string(),
        }
    }
}
