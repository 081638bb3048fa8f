//! CLI command handler for `table`.
//!
//! Formats a model summary (JSON) or a summary table (CSV) into a captioned
//! table artifact and appends it to the registry manifest.

use std::path::PathBuf;

use tracing::info;

use crate::config::ReportConfig;
use crate::storage::{ArtifactRegistry, ManifestEntry, RegistryManifest, SaveOutcome, TexStore, WrapOptions};
use crate::table::{FittedModel, ModelSummary, SummaryTable, TableSource};
use crate::TexResult;

/// Arguments of `texreport table`.
#[derive(Debug, Clone, Default)]
pub struct TableArgs {
    pub name: String,
    pub model: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub caption: Option<String>,
    pub label: Option<String>,
    /// Drop the AIC/N rows.
    pub no_info: bool,
}

pub fn run(config: &ReportConfig, args: TableArgs) -> TexResult<SaveOutcome> {
    let model = args.model.as_deref().map(ModelSummary::from_json_file).transpose()?;
    let summary = args.summary.as_deref().map(SummaryTable::from_csv_path).transpose()?;
    let source = TableSource::from_parts(
        model.as_ref().map(|m| m as &dyn FittedModel),
        summary.as_ref(),
    )?;

    let mut options = config.table.tabular_options();
    if args.no_info {
        options = options.without_info();
    }
    let wrap = WrapOptions { caption: args.caption, label: args.label, layout: config.layout.clone() };

    let store = TexStore::new(config.paths.clone());
    let mut registry = ArtifactRegistry::new();
    let outcome = store.save_tex(&mut registry, &args.name, source, &options, &wrap)?;

    let manifest = RegistryManifest::new(&config.paths.manifest);
    manifest.append(&ManifestEntry::from_outcome(&args.name, &outcome))?;
    info!(artifact = %args.name, manifest = %manifest.path().display(), "registered table");

    if let SaveOutcome::Written(path) = &outcome {
        eprintln!("Wrote {}", path.display());
    }
    Ok(outcome)
}
