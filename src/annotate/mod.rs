//! Significance annotation of categorical charts.

pub mod brackets;
pub mod surface;

pub use brackets::{
    AnnotateOptions, BracketPlacement, CategoryOrder, PairwiseTestResult, Tier, annotate_tests,
    format_p_label, layout_brackets, load_pairwise_tests, significance_stars,
};
pub use surface::{HAlign, LineStyle, PlotElement, PlotSurface, RecordingSurface, TextStyle, VAlign};
