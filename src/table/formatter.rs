//! Formats a fitted model or summary table into a LaTeX tabular body.
//!
//! Pipeline:
//! 1. build a [`SummaryTable`] (p-values below the floor become the marker)
//! 2. rename the intercept and format row labels
//! 3. render the booktabs tabular
//! 4. run the post-render [`SanitizePass`] list (mid rule, strip end, `%`, replacements)
//! 5. append model-info rows
//! 6. close the tabular and rewrite numeric minus signs

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::model::FittedModel;
use super::summary::SummaryTable;
use super::tabular::{TabularStyle, render_tabular};
use crate::latex::{SanitizePass, apply_passes};
use crate::{TexError, TexResult};

/// Parameter name that is renamed to [`TabularOptions::const_name`].
pub const CONST_PARAMETER: &str = "const";

/// Maps a raw row label to its display form.
pub type LabelFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Where the rows of a table come from.
#[derive(Clone, Copy)]
pub enum TableSource<'a> {
    Model(&'a dyn FittedModel),
    Summary(&'a SummaryTable),
}

impl<'a> TableSource<'a> {
    /// Exactly one of `model` and `summary` must be given.
    pub fn from_parts(
        model: Option<&'a dyn FittedModel>,
        summary: Option<&'a SummaryTable>,
    ) -> TexResult<Self> {
        match (model, summary) {
            (Some(m), None) => Ok(TableSource::Model(m)),
            (None, Some(s)) => Ok(TableSource::Summary(s)),
            _ => Err(TexError::Config("Supply either model or summary table".to_string())),
        }
    }

    fn model(&self) -> Option<&'a dyn FittedModel> {
        match self {
            TableSource::Model(m) => Some(*m),
            TableSource::Summary(_) => None,
        }
    }
}

impl fmt::Debug for TableSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Model(_) => f.write_str("TableSource::Model"),
            TableSource::Summary(t) => f.debug_tuple("TableSource::Summary").field(t).finish(),
        }
    }
}

/// How an info row value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoKind {
    /// Truncated to an integer.
    Count,
    /// Fixed decimals.
    Decimal,
}

impl InfoKind {
    /// Observation-count labels print as integers.
    pub fn infer(label: &str) -> Self {
        if label.contains("Obs.") || label.contains("$N$") { InfoKind::Count } else { InfoKind::Decimal }
    }
}

/// A model-level statistic appended under the coefficient rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoRow {
    pub label: String,
    /// Statistic path passed to [`FittedModel::statistic`].
    pub statistic: String,
    #[serde(default)]
    pub kind: Option<InfoKind>,
    /// Value used when the model does not provide the statistic.
    #[serde(default)]
    pub fallback: Option<f64>,
}

impl InfoRow {
    pub fn new(label: impl Into<String>, statistic: impl Into<String>) -> Self {
        InfoRow { label: label.into(), statistic: statistic.into(), kind: None, fallback: None }
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn with_kind(mut self, kind: InfoKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn kind(&self) -> InfoKind {
        self.kind.unwrap_or_else(|| InfoKind::infer(&self.label))
    }

    /// Value cell for this row.
    ///
    /// Missing statistics fall back to `fallback`, then to the statistic path
    /// read as a number, then to the path text itself.
    fn render_value(&self, model: Option<&dyn FittedModel>, decimals: usize) -> String {
        let value = model
            .and_then(|m| m.statistic(&self.statistic))
            .or(self.fallback)
            .or_else(|| self.statistic.trim().parse::<f64>().ok());

        match (value, self.kind()) {
            (Some(v), InfoKind::Count) => format!("{}", v.trunc() as i64),
            (Some(v), InfoKind::Decimal) => format!("{:.*}", decimals, v),
            (None, _) => {
                warn!(label = %self.label, statistic = %self.statistic, "statistic unavailable, printing its name");
                self.statistic.clone()
            }
        }
    }
}

/// Options for [`format_tabular`].
#[derive(Clone)]
pub struct TabularOptions {
    /// Display label for the `const` row.
    pub const_name: String,
    /// Literal replacements applied in order after rendering.
    pub replacements: Vec<(String, String)>,
    /// Custom label formatter; [`default_label_formatter`] when `None`.
    pub label_formatter: Option<LabelFormatter>,
    pub decimals: usize,
    pub column_format: String,
    pub info: Vec<InfoRow>,
}

impl Default for TabularOptions {
    fn default() -> Self {
        TabularOptions {
            const_name: "Intercept".to_string(),
            replacements: Vec::new(),
            label_formatter: None,
            decimals: 3,
            column_format: "lrrrr".to_string(),
            info: vec![InfoRow::new("AIC", "aic"), InfoRow::new("Obs. ($N$)", "nobs")],
        }
    }
}

impl fmt::Debug for TabularOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabularOptions")
            .field("const_name", &self.const_name)
            .field("replacements", &self.replacements)
            .field("label_formatter", &self.label_formatter.as_ref().map(|_| "<fn>"))
            .field("decimals", &self.decimals)
            .field("column_format", &self.column_format)
            .field("info", &self.info)
            .finish()
    }
}

impl TabularOptions {
    pub fn with_label_formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.label_formatter = Some(Arc::new(f));
        self
    }

    pub fn without_info(mut self) -> Self {
        self.info.clear();
        self
    }
}

/// Title-case like Python's `str.title`: a letter starts a word when the
/// previous character is not a letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// `condition_standard` becomes `\textit{Condition: Standard}`.
pub fn default_label_formatter(label: &str) -> String {
    format!("\\textit{{{}}}", title_case(&label.replace('_', ": ")))
}

/// Post-render passes, in order.
fn post_render_passes(options: &TabularOptions) -> Vec<SanitizePass> {
    let mut passes = vec![
        SanitizePass::MidruleForBottomrule,
        SanitizePass::StripTabularEnd,
        SanitizePass::EscapePercent,
    ];
    passes.extend(
        options
            .replacements
            .iter()
            .map(|(from, to)| SanitizePass::replace(from.as_str(), to.as_str())),
    );
    passes
}

fn render_info_rows(
    model: Option<&dyn FittedModel>,
    info: &[InfoRow],
    data_columns: usize,
    decimals: usize,
) -> String {
    let gap = " &".repeat(data_columns.saturating_sub(1));
    info.iter()
        .map(|row| {
            let value = row.render_value(model, decimals);
            format!("{}{gap} & {value} \\\\ \n", row.label)
        })
        .collect()
}

/// Format `source` into a tabular body.
pub fn format_tabular(source: TableSource<'_>, options: &TabularOptions) -> TexResult<String> {
    let mut table = match source {
        TableSource::Model(model) => SummaryTable::from_model(model),
        TableSource::Summary(summary) => summary.clone(),
    };
    debug!(rows = table.rows.len(), columns = table.columns.len(), "formatting tabular");

    table.rename_label(CONST_PARAMETER, &options.const_name);
    match &options.label_formatter {
        Some(formatter) => table.map_labels(&**formatter),
        None => table.map_labels(&default_label_formatter),
    }

    let style = TabularStyle {
        column_format: Some(options.column_format.clone()),
        decimals: options.decimals,
        escape: false,
    };
    let rendered = render_tabular(&table, &style);
    let mut tabular = apply_passes(&rendered, &post_render_passes(options));

    tabular.push_str(&render_info_rows(
        source.model(),
        &options.info,
        table.columns.len(),
        options.decimals,
    ));
    tabular.push_str("\\bottomrule\n\\end{tabular}");

    Ok(SanitizePass::NumericMinus.apply(&tabular))
}

/// Format from an optional model and an optional summary table.
///
/// Supplying both or neither is a configuration error.
pub fn get_tabular(
    model: Option<&dyn FittedModel>,
    summary: Option<&SummaryTable>,
    options: &TabularOptions,
) -> TexResult<String> {
    format_tabular(TableSource::from_parts(model, summary)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::model::{ModelSummary, ParameterEstimate};
    use crate::table::summary::Cell;

    fn toy_model() -> ModelSummary {
        ModelSummary::new(vec![
            ParameterEstimate {
                name: "const".to_string(),
                coefficient: 1.234,
                std_error: 0.1,
                p_value: 0.0001,
                conf_int: (0.9, 1.5),
            },
            ParameterEstimate {
                name: "x1".to_string(),
                coefficient: -0.056,
                std_error: 0.02,
                p_value: 0.04,
                conf_int: (-0.1, 0.0),
            },
        ])
        .with_statistic("aic", 101.25)
        .with_statistic("nobs", 40.0)
    }

    #[test]
    fn test_title_case_matches_python() {
        assert_eq!(title_case("x1"), "X1");
        assert_eq!(title_case("condition: standard"), "Condition: Standard");
        assert_eq!(title_case("chain-of-thought"), "Chain-Of-Thought");
        assert_eq!(title_case("AI advice"), "Ai Advice");
        assert_eq!(title_case("1st try"), "1St Try");
    }

    #[test]
    fn test_default_label_formatter() {
        assert_eq!(default_label_formatter("condition_standard"), "\\textit{Condition: Standard}");
    }

    #[test]
    fn test_source_requires_exactly_one_input() {
        let model = toy_model();
        let table = SummaryTable::new(["a"]);

        let both = get_tabular(Some(&model), Some(&table), &TabularOptions::default());
        assert!(matches!(both, Err(TexError::Config(_))));
        assert!(both.unwrap_err().to_string().contains("Supply either model or summary table"));

        let neither = get_tabular(None, None, &TabularOptions::default());
        assert!(matches!(neither, Err(TexError::Config(_))));
    }

    #[test]
    fn test_toy_model_end_to_end() {
        let model = toy_model();
        let out = get_tabular(Some(&model), None, &TabularOptions::default()).unwrap();

        let expected = "\\begin{tabular}{lrrrr}\n\
            \\toprule\n \
            & Coef. & s.e. & $P$-value & 95 \\% CI \\\\\n\
            \\midrule\n\
            \\textit{Intercept} & 1.234 & 0.100 & $< 0.001$ & [0.900; 1.500] \\\\\n\
            \\textit{X1} & $-$0.056 & 0.020 & 0.040 & [$-$0.100; 0.000] \\\\\n\
            \\midrule\n\
            AIC & & & & 101.250 \\\\ \n\
            Obs. ($N$) & & & & 40 \\\\ \n\
            \\bottomrule\n\
            \\end{tabular}";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_custom_const_name_and_formatter() {
        let model = toy_model();
        let options = TabularOptions {
            const_name: "Baseline".to_string(),
            ..TabularOptions::default()
        }
        .with_label_formatter(|l| l.to_uppercase())
        .without_info();

        let out = get_tabular(Some(&model), None, &options).unwrap();
        assert!(out.contains("BASELINE & 1.234"));
        assert!(out.contains("X1 & $-$0.056"));
        assert!(!out.contains("AIC"));
        assert!(out.ends_with("\\midrule\n\\bottomrule\n\\end{tabular}"));
    }

    #[test]
    fn test_replacements_apply_in_order() {
        let mut table = SummaryTable::new(["v"]);
        table.push_row("ai_advice", vec![Cell::Float(1.0)]).unwrap();
        let options = TabularOptions {
            replacements: vec![
                ("Ai".to_string(), "AI".to_string()),
                ("AI: Advice".to_string(), "AI: advice".to_string()),
            ],
            column_format: "lr".to_string(),
            ..TabularOptions::default()
        }
        .without_info();

        let out = get_tabular(None, Some(&table), &options).unwrap();
        assert!(out.contains("\\textit{AI: advice}"));
    }

    #[test]
    fn test_missing_statistic_uses_fallback() {
        let model = toy_model();
        let options = TabularOptions {
            info: vec![
                InfoRow::new("BIC", "bic").with_fallback(7.5),
                InfoRow::new("Groups", "12").with_kind(InfoKind::Count),
                InfoRow::new("Deviance", "deviance"),
            ],
            ..TabularOptions::default()
        };

        let out = get_tabular(Some(&model), None, &options).unwrap();
        assert!(out.contains("BIC & & & & 7.500 \\\\ \n"));
        assert!(out.contains("Groups & & & & 12 \\\\ \n"));
        assert!(out.contains("Deviance & & & & deviance \\\\ \n"));
    }

    #[test]
    fn test_summary_source_renders_without_model() {
        let mut table = SummaryTable::new(["Coef.", "s.e."]);
        table.push_row("const", vec![Cell::Float(-2.5), Cell::Float(0.25)]).unwrap();
        let options = TabularOptions {
            column_format: "lrr".to_string(),
            info: vec![InfoRow::new("Obs. ($N$)", "120")],
            ..TabularOptions::default()
        };

        let out = get_tabular(None, Some(&table), &options).unwrap();
        assert!(out.contains("\\textit{Intercept} & $-$2.500 & 0.250 \\\\\n"));
        assert!(out.contains("Obs. ($N$) & & 120 \\\\ \n"));
    }

    #[test]
    fn test_p_value_rendering_threshold() {
        for (p, expected) in [(0.0005, "0.001"), (0.0123, "0.012"), (0.9, "0.900"), (0.00049, "$< 0.001$")] {
            let model = ModelSummary::new(vec![ParameterEstimate {
                name: "x".to_string(),
                coefficient: 1.0,
                std_error: 1.0,
                p_value: p,
                conf_int: (0.0, 2.0),
            }]);
            let out = get_tabular(Some(&model), None, &TabularOptions::default().without_info()).unwrap();
            assert!(out.contains(&format!("& {expected} & [0.000; 2.000]")), "p = {p}: {out}");
        }
    }
}
