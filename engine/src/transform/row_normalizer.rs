// Scalar part of a contractor record: names, dates, totals and yearly amounts
use super::date_format::DateFormatter;
use super::fields;
use super::number_words::NumberSpeller;
use crate::config::ColumnNames;
use crate::error::Result;
use shared::models::{Number, RawRow};
use shared::utils::present_exact;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFields {
    pub long_executor_name: String,
    pub short_executor_name: String,
    pub power_of_attorney: String,
    pub text_before_table: String,
    pub ending_date: String,
    pub agreement_ending_date: String,
    pub executor_address: String,
    pub total_hours: Number,
    pub total: Number,
    pub total_words: String,
    pub program_codes: String,
    pub money_this_year: i64,
    pub money_this_year_words: String,
    pub money_next_year: Option<Number>,
    pub money_next_year_words: Option<String>,
}

pub struct RowNormalizer {
    columns: ColumnNames,
    dates: DateFormatter,
    speller: Arc<dyn NumberSpeller>,
}

impl RowNormalizer {
    pub fn new(columns: ColumnNames, dates: DateFormatter, speller: Arc<dyn NumberSpeller>) -> Self {
        RowNormalizer {
            columns,
            dates,
            speller,
        }
    }

    pub fn normalize(&self, row: &RawRow) -> Result<ScalarFields> {
        let c = &self.columns;

        let total = fields::required_number(row, &c.total)?;
        let total_hours = fields::required_number(row, &c.total_hours)?;

        // Blank means nothing is paid this year; the sheet stores whole roubles.
        let money_this_year = fields::optional_number(row, &c.money_this_year)?
            .unwrap_or(0.0)
            .trunc() as i64;

        // Blank and zero both mean the contract does not reach into next year.
        let money_next_year = fields::optional_number(row, &c.money_next_year)?.filter(|v| *v != 0.0);

        Ok(ScalarFields {
            long_executor_name: fields::text(row, &c.long_executor_name)?,
            // Names the output files, so it cannot be blank
            short_executor_name: fields::required_text(row, &c.short_executor_name)?,
            power_of_attorney: fields::text(row, &c.power_of_attorney)?,
            text_before_table: fields::text(row, &c.text_before_table)?,
            ending_date: self.dates.format(fields::required_date(row, &c.ending_date)?),
            agreement_ending_date: self
                .dates
                .format(fields::required_date(row, &c.agreement_ending_date)?),
            executor_address: fields::text(row, &c.executor_address)?,
            total_hours: present_exact(total_hours),
            total: present_exact(total),
            total_words: self.speller.spell(total),
            program_codes: fields::text(row, &c.program_codes)?,
            money_this_year,
            money_this_year_words: self.speller.spell(money_this_year as f64),
            money_next_year: money_next_year.map(present_exact),
            money_next_year_words: money_next_year.map(|v| self.speller.spell(v)),
        })
    }
}
