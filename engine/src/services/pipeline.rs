// A full run: load the sheet, build every context, then render the documents
use super::render::{render_documents, template_for, DocumentKind, DocumentRenderer};
use crate::config::Settings;
use crate::data::load_dataset;
use crate::error::Result;
use crate::transform::{Clock, ContextAssembler, NumberSpeller};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Render only this kind; both when `None`.
    pub only: Option<DocumentKind>,
    /// Build and check the contexts without touching the output directories.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub records: usize,
    pub written: Vec<PathBuf>,
}

pub fn run(
    settings: &Settings,
    speller: Arc<dyn NumberSpeller>,
    clock: &dyn Clock,
    renderer: &dyn DocumentRenderer,
    options: &RunOptions,
) -> Result<RunSummary> {
    let kinds: Vec<DocumentKind> = DocumentKind::ALL
        .into_iter()
        .filter(|kind| options.only.map_or(true, |only| only == *kind))
        .collect();
    for kind in &kinds {
        template_for(*kind, settings)?;
    }

    let dataset = load_dataset(&settings.data_file, &settings.loader)?;
    let assembler = ContextAssembler::new(settings, speller)?;
    let records = assembler.assemble(&dataset, &settings.start_date, clock)?;

    let mut summary = RunSummary {
        records: records.len(),
        written: Vec::new(),
    };
    if options.dry_run {
        info!("Dry run: {} contexts built, nothing written", records.len());
        return Ok(summary);
    }

    for kind in kinds {
        summary
            .written
            .extend(render_documents(kind, &records, settings, renderer)?);
    }
    Ok(summary)
}
