// Output side of a run: one document per contractor and per document kind
use crate::config::Settings;
use crate::error::{EngineError, Result};
use serde::Serialize;
use shared::models::ContractorRecord;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DocumentKind {
    /// Service agreement ("ГПД")
    Contract,
    /// Supporting justification memo ("Справка")
    Justification,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Justification, DocumentKind::Contract];

    pub fn dir_name(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "ГПД",
            DocumentKind::Justification => "Справки",
        }
    }

    pub fn file_suffix(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "",
            DocumentKind::Justification => "-справка",
        }
    }

    pub fn template<'a>(&self, settings: &'a Settings) -> &'a str {
        match self {
            DocumentKind::Contract => &settings.contract_template,
            DocumentKind::Justification => &settings.reference_template,
        }
    }
}

/// Turns a template context into a document on disk.
pub trait DocumentRenderer {
    /// File extension of produced documents, without the dot.
    fn extension(&self) -> &str;
    fn render(&self, template: &Path, record: &ContractorRecord, out: &Path) -> Result<()>;
}

/// Job file handed to the external template engine.
#[derive(Serialize)]
struct RenderJob<'a> {
    template: &'a Path,
    context: &'a ContractorRecord,
}

/// Writes each context as a pretty JSON job naming the template to fill,
/// for an external template engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonContextRenderer;

impl DocumentRenderer for JsonContextRenderer {
    fn extension(&self) -> &str {
        "json"
    }

    fn render(&self, template: &Path, record: &ContractorRecord, out: &Path) -> Result<()> {
        debug!(template = %template.display(), out = %out.display(), "Writing context");
        let job = RenderJob {
            template,
            context: record,
        };
        fs::write(out, serde_json::to_string_pretty(&job)?)?;
        Ok(())
    }
}

/// Template file of `kind`; it has to exist before anything is rendered.
pub fn template_for(kind: DocumentKind, settings: &Settings) -> Result<PathBuf> {
    let template = settings.template_path(kind.template(settings));
    if !template.is_file() {
        return Err(EngineError::ConfigError(format!(
            "{:?} template not found: {}",
            kind,
            template.display()
        )));
    }
    Ok(template)
}

/// "Иванов И.И." -> "И.И. Иванов<suffix>.<extension>".
/// Characters that cannot appear in a file name become `_`.
pub fn output_file_name(short_name: &str, suffix: &str, extension: &str) -> String {
    let short_name = short_name.trim();
    let stem = match short_name.split_once(char::is_whitespace) {
        Some((surname, initials)) => format!("{} {}", initials.trim_start(), surname),
        None => short_name.to_string(),
    };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = match stem.trim_matches('.') {
        "" => "_".to_string(),
        _ => stem,
    };
    format!("{}{}.{}", stem, suffix, extension)
}

/// Creates `dir` if needed and removes every file below it; directories stay.
pub fn clear_output_dir(dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;
    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

pub fn render_documents(
    kind: DocumentKind,
    records: &[ContractorRecord],
    settings: &Settings,
    renderer: &dyn DocumentRenderer,
) -> Result<Vec<PathBuf>> {
    info!("Rendering {:?} documents", kind);
    let template = template_for(kind, settings)?;
    let out_dir = settings.result_dir.join(kind.dir_name());
    let removed = clear_output_dir(&out_dir)?;
    debug!(dir = %out_dir.display(), removed, "Output directory cleared");

    let mut seen = HashSet::new();
    let mut written = Vec::with_capacity(records.len());
    for record in records {
        let name = output_file_name(
            &record.short_executor_name,
            kind.file_suffix(),
            renderer.extension(),
        );
        if !seen.insert(name.clone()) {
            warn!(file = %name, "Two contractors map to the same file, the later one wins");
        }
        let out = out_dir.join(&name);
        renderer.render(&template, record, &out)?;
        written.push(out);
    }
    info!("Finished {:?} documents: {} written", kind, written.len());
    Ok(written)
}
