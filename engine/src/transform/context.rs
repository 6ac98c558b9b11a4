// Builds the template contexts for every contractor in the sheet
use super::date_format::DateFormatter;
use super::number_words::NumberSpeller;
use super::row_normalizer::RowNormalizer;
use super::task_reshaper::TaskReshaper;
use crate::config::Settings;
use crate::error::{EngineError, Result};
use chrono::{Datelike, Local, NaiveDate};
use shared::models::{ContractorRecord, Dataset};
use std::sync::Arc;
use tracing::{debug, info};

/// Source of "today" for the year fields of the contracts.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct ContextAssembler {
    normalizer: RowNormalizer,
    reshaper: TaskReshaper,
}

impl ContextAssembler {
    pub fn new(settings: &Settings, speller: Arc<dyn NumberSpeller>) -> Result<Self> {
        if speller.language() != settings.locale.language {
            return Err(EngineError::ConfigError(format!(
                "number speller is for '{}' but the locale is '{}'",
                speller.language(),
                settings.locale.language
            )));
        }
        let dates = DateFormatter::new(&settings.locale)?;
        Ok(ContextAssembler {
            normalizer: RowNormalizer::new(settings.columns.clone(), dates, speller),
            reshaper: TaskReshaper::new(&settings.task_layout, settings.locale.clone())?,
        })
    }

    /// One record per row, in sheet order. The first failing row aborts the batch.
    pub fn assemble(
        &self,
        dataset: &Dataset,
        start_date: &str,
        clock: &dyn Clock,
    ) -> Result<Vec<ContractorRecord>> {
        info!("Building template contexts for {} rows", dataset.len());

        let this_year = clock.today().year();
        let slots = self.reshaper.locate(&dataset.headers)?;

        let records = dataset
            .rows
            .iter()
            .map(|row| {
                let scalars = self.normalizer.normalize(row)?;
                let tasks = self.reshaper.reshape(row, &slots)?;
                debug!(
                    line = row.line,
                    executor = %scalars.short_executor_name,
                    line_items = tasks.line_items.len(),
                    "Context built"
                );
                Ok(ContractorRecord {
                    long_executor_name: scalars.long_executor_name,
                    short_executor_name: scalars.short_executor_name,
                    power_of_attorney: scalars.power_of_attorney,
                    text_before_table: scalars.text_before_table,
                    start_date: start_date.to_string(),
                    ending_date: scalars.ending_date,
                    agreement_ending_date: scalars.agreement_ending_date,
                    executor_address: scalars.executor_address,
                    total_hours: scalars.total_hours,
                    total: scalars.total,
                    total_words: scalars.total_words,
                    this_year,
                    next_year: this_year + 1,
                    program_codes: scalars.program_codes,
                    money_this_year: scalars.money_this_year,
                    money_this_year_words: scalars.money_this_year_words,
                    money_next_year: scalars.money_next_year,
                    money_next_year_words: scalars.money_next_year_words,
                    tbl_contents: tasks.line_items,
                    learning_form: tasks.learning_form,
                    all_disciplines: tasks.all_disciplines,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Built {} template contexts", records.len());
        Ok(records)
    }
}
