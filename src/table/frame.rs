//! Direct dataframe-to-table rendering.
//!
//! No label remapping and no info rows: the frame is rendered as-is and
//! wrapped in a `\centering` table.

use super::summary::SummaryTable;
use super::tabular::{TabularStyle, render_tabular};

#[derive(Debug, Clone)]
pub struct FrameTableOptions {
    pub caption: String,
    pub label: String,
    /// Escape reserved LaTeX characters in the frame.
    pub escape: bool,
    pub decimals: usize,
    pub footnotesize: bool,
    pub row_stretch: Option<f64>,
}

impl Default for FrameTableOptions {
    fn default() -> Self {
        FrameTableOptions {
            caption: "Caption".to_string(),
            label: "tab:my_label".to_string(),
            escape: true,
            decimals: 3,
            footnotesize: true,
            row_stretch: Some(1.0),
        }
    }
}

pub fn render_frame_table(frame: &SummaryTable, options: &FrameTableOptions) -> String {
    let mut tex = String::from("\\begin{table}\n\\centering\n");
    if options.footnotesize {
        tex.push_str("\\begingroup\n\\footnotesize\n");
    }
    if let Some(stretch) = options.row_stretch {
        tex.push_str(&format!("\\renewcommand{{\\arraystretch}}{{{stretch}}}\n"));
    }
    let style = TabularStyle { column_format: None, decimals: options.decimals, escape: options.escape };
    tex.push_str(&render_tabular(frame, &style));
    if options.footnotesize {
        tex.push_str("\\endgroup\n");
        tex.push_str(&format!("\\caption{{\\footnotesize {}}}\n", options.caption));
    } else {
        tex.push_str(&format!("\\caption{{{}}}\n", options.caption));
    }
    tex.push_str(&format!("\\label{{{}}}\n", options.label));
    tex.push_str("\\end{table}");
    tex
}
