//! Wraps tabular bodies into captioned, labeled `table` environments.

use std::fmt;

use serde::Deserialize;

use crate::latex::latex_minus_and_p;

/// Layout flags for the table environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub center: bool,
    /// `\arraystretch` value; omitted when `None`.
    pub row_stretch: Option<f64>,
    /// Reduce the font size of the body and caption.
    pub footnotesize: bool,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout { center: true, row_stretch: Some(1.0), footnotesize: true }
    }
}

/// A complete table block bound to its artifact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableArtifact {
    pub name: String,
    pub caption: String,
    pub label: String,
    content: String,
}

impl TableArtifact {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

impl fmt::Display for TableArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// `tab:` followed by the name with spaces turned into hyphens.
pub fn default_label(name: &str) -> String {
    format!("tab:{}", name.replace(' ', "-"))
}

/// Wrap one or more tabular bodies into a table block.
///
/// The caption defaults to `name` and goes through the minus and `P-`
/// normalization either way.
pub fn to_table<S: AsRef<str>>(
    bodies: &[S],
    name: &str,
    caption: Option<&str>,
    label: Option<&str>,
    layout: &TableLayout,
) -> TableArtifact {
    let caption = latex_minus_and_p(caption.unwrap_or(name));
    let label = label.map(str::to_string).unwrap_or_else(|| default_label(name));

    let mut out = String::from("\\begin{table}\n");
    if layout.center {
        out.push_str("\\begin{center}\n");
    }
    if layout.footnotesize {
        out.push_str("\\begingroup\n\\footnotesize\n");
    }
    if let Some(stretch) = layout.row_stretch {
        out.push_str(&format!("\\renewcommand{{\\arraystretch}}{{{stretch}}}\n"));
    }
    for body in bodies {
        out.push_str(body.as_ref());
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if layout.footnotesize {
        out.push_str("\\endgroup\n");
        out.push_str(&format!("\\caption{{\\footnotesize {caption}}}"));
    } else {
        out.push_str(&format!("\\caption{{{caption}}}"));
    }
    out.push_str(&format!("\n\\label{{{label}}}"));
    if layout.center {
        out.push_str("\n\\end{center}");
    }
    out.push_str("\n\\end{table}");

    TableArtifact { name: name.to_string(), caption, label, content: out }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "\\begin{tabular}{lr}\nA & 1 \\\\\n\\end{tabular}";

    #[test]
    fn test_default_layout() {
        let table = to_table(&[BODY], "Model 1 accuracy", None, None, &TableLayout::default());
        let expected = "\\begin{table}\n\
            \\begin{center}\n\
            \\begingroup\n\
            \\footnotesize\n\
            \\renewcommand{\\arraystretch}{1}\n\
            \\begin{tabular}{lr}\nA & 1 \\\\\n\\end{tabular}\n\
            \\endgroup\n\
            \\caption{\\footnotesize Model 1 accuracy}\n\
            \\label{tab:Model-1-accuracy}\n\
            \\end{center}\n\
            \\end{table}";
        assert_eq!(table.as_str(), expected);
        assert_eq!(table.label, "tab:Model-1-accuracy");
        assert_eq!(table.caption, "Model 1 accuracy");
    }

    #[test]
    fn test_plain_layout_with_caption_and_label() {
        let layout = TableLayout { center: false, row_stretch: None, footnotesize: false };
        let table = to_table(&[BODY], "t", Some("Effect of -2 P-values"), Some("tab:custom"), &layout);
        let expected = "\\begin{table}\n\
            \\begin{tabular}{lr}\nA & 1 \\\\\n\\end{tabular}\n\
            \\caption{Effect of $-$2 $P$-values}\n\
            \\label{tab:custom}\n\
            \\end{table}";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_name_caption_is_normalized() {
        let table = to_table(&[BODY], "P-values for -1 shift", None, None, &TableLayout::default());
        assert_eq!(table.caption, "$P$-values for $-$1 shift");
        assert_eq!(table.label, "tab:P-values-for--1-shift");
    }

    #[test]
    fn test_multiple_bodies_and_fractional_stretch() {
        let layout = TableLayout { row_stretch: Some(1.5), ..TableLayout::default() };
        let table = to_table(&["first\n", "second\n"], "t", None, None, &layout);
        assert!(table.as_str().contains("\\renewcommand{\\arraystretch}{1.5}\nfirst\nsecond\n\\endgroup"));
    }
}
