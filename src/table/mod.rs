//! Table formatting: fitted models and summary frames to LaTeX.
//!
//! - `model`: the `FittedModel` capability and a serde-backed `ModelSummary`
//! - `summary`: rows, cells and the p-value floor
//! - `tabular`: booktabs rendering
//! - `formatter`: the model/summary formatting pipeline
//! - `wrap`: captioned table environments
//! - `frame`: direct dataframe tables

pub mod formatter;
pub mod frame;
pub mod model;
pub mod summary;
pub mod tabular;
pub mod wrap;

pub use formatter::{
    InfoKind, InfoRow, LabelFormatter, TableSource, TabularOptions, default_label_formatter,
    format_tabular, get_tabular, title_case,
};
pub use frame::{FrameTableOptions, render_frame_table};
pub use model::{FittedModel, ModelSummary, ParameterEstimate};
pub use summary::{Cell, P_VALUE_FLOOR, P_VALUE_MARKER, PValue, SummaryRow, SummaryTable};
pub use tabular::{TabularStyle, default_column_format, render_tabular};
pub use wrap::{TableArtifact, TableLayout, default_label, to_table};
