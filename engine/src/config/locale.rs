// Language tables used by the date formatter and the task reshaper
use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Locale {
    pub language: String,
    /// Genitive month names, January first.
    pub months: Vec<String>,
    /// Short learning form -> form used inside "по ... форме обучения".
    pub learning_forms: HashMap<String, String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::russian()
    }
}

impl Locale {
    pub fn russian() -> Self {
        let months = [
            "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа",
            "сентября", "октября", "ноября", "декабря",
        ];
        let learning_forms = [
            ("очно-заочная", "очно-заочной"),
            ("очная", "очной"),
            ("заочная", "заочной"),
        ];
        Locale {
            language: "ru".to_string(),
            months: months.iter().map(|m| m.to_string()).collect(),
            learning_forms: learning_forms
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.months.len() != 12 {
            return Err(EngineError::ConfigError(format!(
                "locale needs 12 month names, got {}",
                self.months.len()
            )));
        }
        Ok(())
    }

    /// `month` is 1-based.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(idx).map(String::as_str)
    }

    pub fn learning_form(&self, token: &str) -> Option<&str> {
        self.learning_forms.get(token).map(String::as_str)
    }
}
