//! CLI command handlers for `consolidate` and `reset`.

use tracing::info;

use crate::TexResult;
use crate::config::ReportConfig;
use crate::storage::{ConsolidationReport, RegistryManifest, SaveOutcome, TexStore, consolidate_tex};

/// Replay the manifest into `supplementary_materials.tex`.
pub fn run(config: &ReportConfig, add_header: bool) -> TexResult<ConsolidationReport> {
    let manifest = RegistryManifest::new(&config.paths.manifest);
    let registry = manifest.load_registry()?;
    if registry.is_empty() {
        eprintln!("No tables registered in {}", manifest.path().display());
    }

    let store = TexStore::new(config.paths.clone());
    let report = consolidate_tex(&registry, &store, add_header)?;

    for name in &report.missing {
        eprintln!("Missing artifact: {name}");
    }
    if let SaveOutcome::Written(path) = &report.outcome {
        eprintln!("Consolidated {} table(s) into {}", report.included.len(), path.display());
    }
    Ok(report)
}

/// Forget the recorded emission order.
pub fn reset(config: &ReportConfig) -> TexResult<()> {
    let manifest = RegistryManifest::new(&config.paths.manifest);
    manifest.reset()?;
    info!(manifest = %manifest.path().display(), "registry reset");
    Ok(())
}
