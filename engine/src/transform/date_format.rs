use crate::config::Locale;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};

/// Long-form dates as contracts print them: `«5» марта 2021`.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
}

impl DateFormatter {
    pub fn new(locale: &Locale) -> Result<Self> {
        locale.validate()?;
        Ok(DateFormatter {
            locale: locale.clone(),
        })
    }

    pub fn format(&self, date: NaiveDate) -> String {
        // validate() guarantees all twelve names
        let month = self.locale.month_name(date.month()).unwrap_or_default();
        format!("«{}» {} {}", date.day(), month, date.year())
    }
}
