//! CLI command handler for `annotate`.
//!
//! Reads pairwise test results (JSON array), lays out significance brackets
//! over the given category axis and emits the drawing calls as JSON for a
//! plotting front end to replay.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::TexResult;
use crate::annotate::{CategoryOrder, RecordingSurface, annotate_tests, load_pairwise_tests};
use crate::config::ReportConfig;

#[derive(Debug, Clone)]
pub struct AnnotateArgs {
    pub tests: PathBuf,
    /// Category labels in axis order.
    pub categories: Vec<String>,
    /// Height of the first bracket.
    pub baseline: f64,
    /// Overrides `[annotate].low_offset`.
    pub low_offset: Option<f64>,
    /// Write the drawing calls here instead of stdout.
    pub out: Option<PathBuf>,
}

pub fn run(config: &ReportConfig, args: AnnotateArgs) -> TexResult<RecordingSurface> {
    let tests = load_pairwise_tests(&args.tests)?;
    let order: CategoryOrder = args.categories.iter().map(|c| c.trim()).collect();

    let mut options = config.annotate.clone();
    if let Some(offset) = args.low_offset {
        options.low_offset = offset;
    }

    let mut surface = RecordingSurface::new();
    annotate_tests(&mut surface, &tests, &order, args.baseline, &options)?;

    match &args.out {
        Some(path) => {
            write_elements(path, &surface)?;
            eprintln!("Wrote {} drawing call(s) to {}", surface.elements().len(), path.display());
        }
        None => println!("{}", surface.to_json().context("failed to serialize drawing calls")?),
    }
    Ok(surface)
}

fn write_elements(path: &Path, surface: &RecordingSurface) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = surface.to_json().context("failed to serialize drawing calls")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
