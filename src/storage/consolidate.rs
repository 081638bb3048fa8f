//! Concatenates registered artifacts into one document.

use tracing::{debug, info, warn};

use super::registry::ArtifactRegistry;
use super::store::{SaveOutcome, TexStore};
use crate::TexResult;
use crate::latex::escape_percent;

/// Artifact name of the consolidated document.
pub const CONSOLIDATED_NAME: &str = "supplementary_materials";

/// What went into the consolidated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Included artifact names, in order, duplicates kept.
    pub included: Vec<String>,
    /// Registered artifacts that could not be read.
    pub missing: Vec<String>,
    pub outcome: SaveOutcome,
}

fn section_header(name: &str) -> String {
    format!("\\section*{{{name}}}\n\\label{{sec:{}}}\n", name.replace(' ', "_"))
}

/// Build the consolidated text without writing it.
///
/// Returns the document plus the included and missing names.
pub fn render_consolidated(
    registry: &ArtifactRegistry,
    store: &TexStore,
    add_header: bool,
) -> (String, Vec<String>, Vec<String>) {
    let mut doc = String::new();
    let mut included = Vec::new();
    let mut missing = Vec::new();

    for name in registry.iter() {
        if name == CONSOLIDATED_NAME {
            continue;
        }
        debug!(artifact = name, "consolidating");
        match store.read_artifact(name) {
            Ok(content) => {
                if add_header {
                    doc.push_str(&section_header(name));
                }
                doc.push_str(&escape_percent(&content));
                doc.push_str("\n\n");
                included.push(name.to_string());
            }
            Err(e) => {
                warn!(artifact = name, error = %e, "skipping artifact that could not be read");
                missing.push(name.to_string());
            }
        }
    }

    (doc, included, missing)
}

/// Concatenate every registered artifact into `supplementary_materials.tex`.
///
/// Unreadable artifacts and a missing output directory are warnings.
pub fn consolidate_tex(
    registry: &ArtifactRegistry,
    store: &TexStore,
    add_header: bool,
) -> TexResult<ConsolidationReport> {
    let (doc, included, missing) = render_consolidated(registry, store, add_header);
    let outcome = store.write_artifact(CONSOLIDATED_NAME, &doc)?;
    info!(
        included = included.len(),
        missing = missing.len(),
        written = outcome.is_written(),
        "consolidated tables"
    );
    Ok(ConsolidationReport { included, missing, outcome })
}
