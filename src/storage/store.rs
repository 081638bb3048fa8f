//! Persists table artifacts into the tables directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::registry::ArtifactRegistry;
use crate::table::{
    FrameTableOptions, SummaryTable, TableLayout, TableSource, TabularOptions, format_tabular,
    render_frame_table, to_table,
};
use crate::{TexError, TexResult};

/// File extension of persisted artifacts.
pub const TEX_EXTENSION: &str = "tex";

/// Where artifacts go.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub tables_dir: PathBuf,
    /// Create `tables_dir` instead of warning when it is missing.
    pub create_dirs: bool,
    /// Registry manifest shared between CLI runs.
    pub manifest: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            tables_dir: PathBuf::from("Results/Tex"),
            create_dirs: false,
            manifest: PathBuf::from(".texreport/order.jsonl"),
        }
    }
}

/// Result of a save call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written(PathBuf),
    /// The target directory was missing; nothing was written.
    Skipped { path: PathBuf, reason: String },
}

impl SaveOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, SaveOutcome::Written(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Written(path) | SaveOutcome::Skipped { path, .. } => path,
        }
    }
}

/// Caption, label and layout for [`TexStore::save_tex`].
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    pub caption: Option<String>,
    pub label: Option<String>,
    pub layout: TableLayout,
}

/// Writes artifacts below a tables directory.
#[derive(Debug, Clone)]
pub struct TexStore {
    config: StoreConfig,
}

impl TexStore {
    pub fn new(config: StoreConfig) -> Self {
        TexStore { config }
    }

    pub fn with_tables_dir(dir: impl Into<PathBuf>) -> Self {
        TexStore::new(StoreConfig { tables_dir: dir.into(), ..StoreConfig::default() })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn tables_dir(&self) -> &Path {
        &self.config.tables_dir
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.config.tables_dir.join(format!("{name}.{TEX_EXTENSION}"))
    }

    /// Write `content` as artifact `name`.
    ///
    /// A missing tables directory is a warning and yields
    /// [`SaveOutcome::Skipped`]; other I/O failures are errors.
    pub fn write_artifact(&self, name: &str, content: &str) -> TexResult<SaveOutcome> {
        let path = self.artifact_path(name);
        if self.config.create_dirs {
            std::fs::create_dir_all(&self.config.tables_dir).map_err(|e| TexError::Io {
                context: format!("failed to create {}", self.config.tables_dir.display()),
                source: e,
            })?;
        }

        match std::fs::write(&path, content) {
            Ok(()) => {
                debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
                Ok(SaveOutcome::Written(path))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let reason = format!(
                    "Create \"{}\" folder to save tex files",
                    self.config.tables_dir.display()
                );
                warn!(artifact = name, "{reason}");
                Ok(SaveOutcome::Skipped { path, reason })
            }
            Err(e) => Err(TexError::Io { context: format!("failed to write {}", path.display()), source: e }),
        }
    }

    pub fn read_artifact(&self, name: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.artifact_path(name))
    }

    /// Format `source`, wrap it and persist it as `name`.
    ///
    /// The name is recorded in `registry` even when the write is skipped, so
    /// consolidation can report the gap.
    pub fn save_tex(
        &self,
        registry: &mut ArtifactRegistry,
        name: &str,
        source: TableSource<'_>,
        options: &TabularOptions,
        wrap: &WrapOptions,
    ) -> TexResult<SaveOutcome> {
        let tabular = format_tabular(source, options)?;
        let table = to_table(&[tabular], name, wrap.caption.as_deref(), wrap.label.as_deref(), &wrap.layout);
        registry.record(name);
        let outcome = self.write_artifact(name, table.as_str())?;
        if outcome.is_written() {
            info!(artifact = name, label = %table.label, "saved table");
        }
        Ok(outcome)
    }

    /// Render `frame` directly and persist it as `name`.
    pub fn save_tabtex(
        &self,
        registry: &mut ArtifactRegistry,
        frame: &SummaryTable,
        name: &str,
        options: &FrameTableOptions,
    ) -> TexResult<SaveOutcome> {
        let tex = render_frame_table(frame, options);
        registry.record(name);
        let outcome = self.write_artifact(name, &tex)?;
        if outcome.is_written() {
            info!(artifact = name, label = %options.label, "saved frame table");
        }
        Ok(outcome)
    }
}
