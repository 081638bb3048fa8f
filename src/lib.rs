pub mod annotate;
pub mod config;
pub mod latex;
pub mod storage;
pub mod table;

pub mod annotate_cmd;
pub mod consolidate_cmd;
pub mod frame_cmd;
pub mod table_cmd;

use thiserror::Error;

pub use annotate::{AnnotateOptions, CategoryOrder, PairwiseTestResult, PlotSurface, annotate_tests};
pub use config::{ReportConfig, load_config, resolve_config};
pub use storage::{ArtifactRegistry, RegistryManifest, SaveOutcome, TexStore, consolidate_tex};
pub use table::{FittedModel, ModelSummary, SummaryTable, TableSource, TabularOptions, get_tabular, to_table};

#[derive(Debug, Error)]
pub enum TexError {
    #[error("{0}")]
    Message(String),
    /// Invalid arguments or configuration.
    #[error("{0}")]
    Config(String),
    #[error("category '{0}' is not on the chart axis")]
    UnknownCategory(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type TexResult<T> = Result<T, TexError>;

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha256::digest;
    digest(bytes)
}
