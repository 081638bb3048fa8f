//! CLI command handler for `frame`: a CSV frame rendered as-is.

use std::path::PathBuf;

use tracing::info;

use crate::config::ReportConfig;
use crate::storage::{ArtifactRegistry, ManifestEntry, RegistryManifest, SaveOutcome, TexStore};
use crate::table::{FrameTableOptions, SummaryTable};
use crate::TexResult;

#[derive(Debug, Clone)]
pub struct FrameArgs {
    pub name: String,
    pub csv: PathBuf,
    pub caption: Option<String>,
    pub label: Option<String>,
    /// Keep reserved LaTeX characters as written.
    pub no_escape: bool,
}

pub fn run(config: &ReportConfig, args: FrameArgs) -> TexResult<SaveOutcome> {
    let frame = SummaryTable::from_csv_path(&args.csv)?;

    let defaults = FrameTableOptions::default();
    let options = FrameTableOptions {
        caption: args.caption.unwrap_or(defaults.caption),
        label: args.label.unwrap_or(defaults.label),
        escape: !args.no_escape,
        decimals: config.table.decimals,
        footnotesize: config.layout.footnotesize,
        row_stretch: config.layout.row_stretch,
    };

    let store = TexStore::new(config.paths.clone());
    let mut registry = ArtifactRegistry::new();
    let outcome = store.save_tabtex(&mut registry, &frame, &args.name, &options)?;

    let manifest = RegistryManifest::new(&config.paths.manifest);
    manifest.append(&ManifestEntry::from_outcome(&args.name, &outcome))?;
    info!(artifact = %args.name, rows = frame.rows.len(), "registered frame table");

    if let SaveOutcome::Written(path) = &outcome {
        eprintln!("Wrote {}", path.display());
    }
    Ok(outcome)
}
