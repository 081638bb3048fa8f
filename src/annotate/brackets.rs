//! Significance brackets between category pairs.
//!
//! The first [`UPPER_TIER_PAIRS`] pairs stack upward from the baseline with
//! labels above; later pairs are shifted down by [`LOWER_TIER_SHIFT`] plus the
//! caller's `low_offset` and open downward with labels below. The tier split
//! and the per-pair increment match previously published figures.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::surface::{HAlign, LineStyle, PlotSurface, TextStyle, VAlign};
use crate::{TexError, TexResult};

/// Vertical step between consecutive brackets.
pub const STACK_INCREMENT: f64 = 0.07;
/// Pairs drawn in the upper tier.
pub const UPPER_TIER_PAIRS: usize = 3;
/// Height of the bracket legs.
pub const BRACKET_TICK: f64 = 0.01;
/// Downward shift of the lower tier, before `low_offset`.
pub const LOWER_TIER_SHIFT: f64 = 1.02;
pub const BRACKET_LINE_WIDTH: f64 = 0.5;
pub const LABEL_FONT_SIZE: f64 = 8.0;

/// Result of one pairwise comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseTestResult {
    pub first: String,
    pub second: String,
    pub statistic: f64,
    pub p_value: f64,
}

impl PairwiseTestResult {
    pub fn new(first: impl Into<String>, second: impl Into<String>, statistic: f64, p_value: f64) -> Self {
        PairwiseTestResult { first: first.into(), second: second.into(), statistic, p_value }
    }
}

/// Load pairwise results from a JSON array, keeping file order.
pub fn load_pairwise_tests(path: &Path) -> TexResult<Vec<PairwiseTestResult>> {
    let bytes = std::fs::read(path)
        .map_err(|e| TexError::Message(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TexError::Message(format!("failed to parse {}: {e}", path.display())))
}

/// Category labels in axis order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOrder {
    labels: Vec<String>,
}

impl CategoryOrder {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Axis index of `category`.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == category)
    }

    fn resolve(&self, category: &str) -> TexResult<f64> {
        self.position(category)
            .map(|i| i as f64)
            .ok_or_else(|| TexError::UnknownCategory(category.to_string()))
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CategoryOrder { labels: iter.into_iter().map(Into::into).collect() }
    }
}

/// Tuning for [`annotate_tests`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotateOptions {
    /// Gap between a lower-tier bracket and its label.
    pub low_test_margin: f64,
    /// Gap between an upper-tier bracket and its label.
    pub high_test_margin: f64,
    /// Extra downward shift of the lower tier.
    pub low_offset: f64,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        AnnotateOptions { low_test_margin: 0.04, high_test_margin: 0.015, low_offset: 0.0 }
    }
}

pub fn significance_stars(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else {
        ""
    }
}

/// `$P = 0.012$*` or `$P < 0.001$***`.
pub fn format_p_label(p: f64) -> String {
    let stars = significance_stars(p);
    if p >= 0.001 { format!("$P = {p:.3}${stars}") } else { format!("$P < 0.001${stars}") }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Upper,
    Lower,
}

/// Computed geometry of one bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketPlacement {
    pub tier: Tier,
    pub xs: [f64; 4],
    pub ys: [f64; 4],
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

/// Compute bracket geometry for `tests` in order.
///
/// Every category is resolved first; an unknown one fails the whole call.
pub fn layout_brackets(
    tests: &[PairwiseTestResult],
    order: &CategoryOrder,
    baseline: f64,
    options: &AnnotateOptions,
) -> TexResult<Vec<BracketPlacement>> {
    let positions = tests
        .iter()
        .map(|t| Ok((order.resolve(&t.first)?, order.resolve(&t.second)?)))
        .collect::<TexResult<Vec<_>>>()?;

    let placements = tests
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(i, (test, (x1, x2)))| {
            let mut y = baseline + i as f64 * STACK_INCREMENT;
            let label = format_p_label(test.p_value);
            let xs = [x1, x1, x2, x2];
            let label_x = (x1 + x2) / 2.0;
            if i < UPPER_TIER_PAIRS {
                BracketPlacement {
                    tier: Tier::Upper,
                    xs,
                    ys: [y, y + BRACKET_TICK, y + BRACKET_TICK, y],
                    label,
                    label_x,
                    label_y: y + options.high_test_margin,
                }
            } else {
                y -= LOWER_TIER_SHIFT + options.low_offset;
                BracketPlacement {
                    tier: Tier::Lower,
                    xs,
                    ys: [y + BRACKET_TICK, y, y, y + BRACKET_TICK],
                    label,
                    label_x,
                    label_y: y - options.low_test_margin,
                }
            }
        })
        .collect();

    Ok(placements)
}

/// Draw a bracket and p-value label for every pair onto `surface`.
pub fn annotate_tests<S: PlotSurface + ?Sized>(
    surface: &mut S,
    tests: &[PairwiseTestResult],
    order: &CategoryOrder,
    baseline: f64,
    options: &AnnotateOptions,
) -> TexResult<()> {
    let line = LineStyle { width: BRACKET_LINE_WIDTH, color: "black".to_string(), clip: false };
    let text = TextStyle { font_size: LABEL_FONT_SIZE, h_align: HAlign::Center, v_align: VAlign::Bottom };

    for placement in layout_brackets(tests, order, baseline, options)? {
        debug!(label = %placement.label, tier = ?placement.tier, "drawing bracket");
        surface.polyline(&placement.xs, &placement.ys, &line);
        surface.text(placement.label_x, placement.label_y, &placement.label, &text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::surface::{PlotElement, RecordingSurface};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn order() -> CategoryOrder {
        ["control", "standard", "chain-of-thought", "differential"].into_iter().collect()
    }

    #[test]
    fn test_significance_stars() {
        assert_eq!(significance_stars(0.0002), "***");
        assert_eq!(significance_stars(0.001), "**");
        assert_eq!(significance_stars(0.009), "**");
        assert_eq!(significance_stars(0.01), "*");
        assert_eq!(significance_stars(0.049), "*");
        assert_eq!(significance_stars(0.05), "");
    }

    #[test]
    fn test_format_p_label() {
        assert_eq!(format_p_label(0.0002), "$P < 0.001$***");
        assert_eq!(format_p_label(0.0123), "$P = 0.012$*");
        assert_eq!(format_p_label(0.004), "$P = 0.004$**");
        assert_eq!(format_p_label(0.4), "$P = 0.400$");
    }

    #[test]
    fn test_four_pairs_two_tiers() {
        let tests = vec![
            PairwiseTestResult::new("control", "standard", -2.1, 0.02),
            PairwiseTestResult::new("control", "chain-of-thought", -3.5, 0.0004),
            PairwiseTestResult::new("control", "differential", -1.0, 0.3),
            PairwiseTestResult::new("standard", "differential", -2.9, 0.004),
        ];
        let options = AnnotateOptions { low_offset: 0.1, ..AnnotateOptions::default() };
        let placements = layout_brackets(&tests, &order(), 1.0, &options).unwrap();

        for (i, p) in placements.iter().take(3).enumerate() {
            let y = 1.0 + i as f64 * STACK_INCREMENT;
            assert_eq!(p.tier, Tier::Upper);
            assert!(close(p.ys[0], y) && close(p.ys[1], y + BRACKET_TICK));
            assert!(close(p.label_y, y + 0.015));
            assert!(p.label_y > p.ys[0]);
        }

        let low = &placements[3];
        let y = 1.0 + 3.0 * STACK_INCREMENT - (LOWER_TIER_SHIFT + 0.1);
        assert_eq!(low.tier, Tier::Lower);
        assert_eq!(low.xs, [1.0, 1.0, 3.0, 3.0]);
        assert!(close(low.ys[0], y + BRACKET_TICK) && close(low.ys[1], y));
        assert!(close(low.label_y, y - 0.04));
        assert!(low.label_y < low.ys[1]);
        assert!(close(low.label_x, 2.0));
        assert_eq!(low.label, "$P = 0.004$**");
    }

    #[test]
    fn test_unknown_category_draws_nothing() {
        let tests = vec![
            PairwiseTestResult::new("control", "standard", 1.0, 0.5),
            PairwiseTestResult::new("control", "placebo", 1.0, 0.5),
        ];
        let mut surface = RecordingSurface::new();
        let result = annotate_tests(&mut surface, &tests, &order(), 1.0, &AnnotateOptions::default());

        assert!(matches!(result, Err(TexError::UnknownCategory(ref c)) if c == "placebo"));
        assert!(surface.elements().is_empty());
    }

    #[test]
    fn test_annotate_records_line_then_text() {
        let tests = vec![PairwiseTestResult::new("standard", "control", 2.0, 0.03)];
        let mut surface = RecordingSurface::new();
        annotate_tests(&mut surface, &tests, &order(), 0.8, &AnnotateOptions::default()).unwrap();

        match surface.elements() {
            [PlotElement::Polyline { xs, style, .. }, PlotElement::Text { x, content, style: text, .. }] => {
                assert_eq!(xs, &vec![1.0, 1.0, 0.0, 0.0]);
                assert_eq!(style.width, BRACKET_LINE_WIDTH);
                assert!(!style.clip);
                assert!(close(*x, 0.5));
                assert_eq!(content, "$P = 0.030$*");
                assert_eq!(text.h_align, HAlign::Center);
                assert_eq!(text.v_align, VAlign::Bottom);
                assert_eq!(text.font_size, LABEL_FONT_SIZE);
            }
            other => panic!("unexpected elements: {other:?}"),
        }
    }
}
