//! Booktabs `tabular` rendering of a [`SummaryTable`].

use super::summary::SummaryTable;
use crate::latex::escape_latex;

/// Rendering knobs for [`render_tabular`].
#[derive(Debug, Clone)]
pub struct TabularStyle {
    /// Column spec such as `lrrrr`; derived from the data when `None`.
    pub column_format: Option<String>,
    pub decimals: usize,
    /// Escape reserved LaTeX characters in headers, labels and text cells.
    pub escape: bool,
}

impl Default for TabularStyle {
    fn default() -> Self {
        TabularStyle { column_format: None, decimals: 3, escape: true }
    }
}

/// `l` for the label column, then `r` for all-numeric columns and `l` otherwise.
pub fn default_column_format(table: &SummaryTable) -> String {
    let mut spec = String::from("l");
    for col in 0..table.columns.len() {
        let numeric = table
            .rows
            .iter()
            .all(|row| row.cells.get(col).is_some_and(|c| c.is_numeric()));
        spec.push(if numeric { 'r' } else { 'l' });
    }
    spec
}

/// Render `table` as a complete tabular, ending with `\end{tabular}` and a newline.
pub fn render_tabular(table: &SummaryTable, style: &TabularStyle) -> String {
    let text = |s: &str| if style.escape { escape_latex(s) } else { s.to_string() };
    let column_format = style
        .column_format
        .clone()
        .unwrap_or_else(|| default_column_format(table));

    let mut out = String::with_capacity(256 + table.rows.len() * 64);
    out.push_str(&format!("\\begin{{tabular}}{{{column_format}}}\n"));
    out.push_str("\\toprule\n");

    let mut header = vec![text(&table.index_name)];
    header.extend(table.columns.iter().map(|c| text(c)));
    out.push_str(&header.join(" & "));
    out.push_str(" \\\\\n");
    out.push_str("\\midrule\n");

    for row in &table.rows {
        let mut fields = vec![text(&row.label)];
        fields.extend(row.cells.iter().map(|c| {
            let rendered = c.render(style.decimals);
            if c.is_numeric() { rendered } else { text(&rendered) }
        }));
        out.push_str(&fields.join(" & "));
        out.push_str(" \\\\\n");
    }

    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::summary::Cell;

    fn sample() -> SummaryTable {
        let mut table = SummaryTable::new(["mean", "group"]);
        table.push_row("a_1", vec![Cell::Float(0.5), Cell::from("x & y")]).unwrap();
        table.push_row("b", vec![Cell::Int(2), Cell::from("z")]).unwrap();
        table
    }

    #[test]
    fn test_default_column_format() {
        assert_eq!(default_column_format(&sample()), "lrl");
    }

    #[test]
    fn test_render_unescaped() {
        let style = TabularStyle { column_format: Some("lrr".to_string()), decimals: 2, escape: false };
        let out = render_tabular(&sample(), &style);
        assert_eq!(
            out,
            "\\begin{tabular}{lrr}\n\\toprule\n & mean & group \\\\\n\\midrule\n\
             a_1 & 0.50 & x & y \\\\\nb & 2 & z \\\\\n\\bottomrule\n\\end{tabular}\n"
        );
    }

    #[test]
    fn test_render_escaped() {
        let out = render_tabular(&sample(), &TabularStyle::default());
        assert!(out.starts_with("\\begin{tabular}{lrl}\n"));
        assert!(out.contains("a\\_1 & 0.500 & x \\& y \\\\\n"));
    }
}
