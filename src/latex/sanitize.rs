//! Sanitization passes over rendered LaTeX text.
//!
//! The tabular pipeline is an ordered list of [`SanitizePass`] values folded
//! over the rendered text. Each pass takes the full text and returns the full
//! rewritten text.

use std::sync::LazyLock;

use regex::Regex;

/// A `-` directly followed by a digit.
static NUMERIC_MINUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d)").expect("numeric minus pattern is valid"));

/// Markup that replaces a numeric minus sign.
pub const MINUS_MARKUP: &str = "$-$";

/// One rewrite step applied to rendered tabular text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizePass {
    /// `\bottomrule` becomes `\midrule`; the real bottom rule is appended later.
    MidruleForBottomrule,
    /// Drop the closing `\end{tabular}` so more rows can follow.
    StripTabularEnd,
    /// Escape every `%` not already preceded by a backslash.
    EscapePercent,
    /// Literal substring replacement.
    Replace { from: String, to: String },
    /// `-` followed by a digit becomes `$-$`.
    NumericMinus,
    /// `P-` becomes `$P$-`.
    PDash,
}

impl SanitizePass {
    pub fn replace(from: impl Into<String>, to: impl Into<String>) -> Self {
        SanitizePass::Replace { from: from.into(), to: to.into() }
    }

    /// Apply this pass to `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            SanitizePass::MidruleForBottomrule => text.replace("\\bottomrule", "\\midrule"),
            SanitizePass::StripTabularEnd => {
                if text.contains("\\end{tabular}\n") {
                    text.replace("\\end{tabular}\n", "")
                } else {
                    text.replace("\\end{tabular}", "")
                }
            }
            SanitizePass::EscapePercent => escape_percent(text),
            // an empty needle would match between every character
            SanitizePass::Replace { from, .. } if from.is_empty() => text.to_string(),
            SanitizePass::Replace { from, to } => text.replace(from.as_str(), to),
            SanitizePass::NumericMinus => latex_minus(text),
            SanitizePass::PDash => text.replace("P-", "$P$-"),
        }
    }
}

/// Fold `passes` over `text` in order.
pub fn apply_passes(text: &str, passes: &[SanitizePass]) -> String {
    passes.iter().fold(text.to_string(), |acc, pass| pass.apply(&acc))
}

/// Escape `%` characters that are not already escaped.
///
/// Applying this twice yields the same text as applying it once.
pub fn escape_percent(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if c == '%' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Rewrite every `-` immediately followed by a digit to `$-$`.
///
/// Hyphens inside words (`chain-of-thought`) are left alone.
pub fn latex_minus(text: &str) -> String {
    NUMERIC_MINUS.replace_all(text, "$$-$$${1}").into_owned()
}

/// Numeric minus rewrite followed by the `P-` to `$P$-` rewrite.
///
/// Used on free text such as captions.
pub fn latex_minus_and_p(text: &str) -> String {
    apply_passes(text, &[SanitizePass::NumericMinus, SanitizePass::PDash])
}

/// Escape characters reserved by LaTeX in plain cell or header text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_percent_is_idempotent() {
        let once = escape_percent("95 % CI and 5\\% already");
        assert_eq!(once, "95 \\% CI and 5\\% already");
        assert_eq!(escape_percent(&once), once);
    }

    #[test]
    fn test_escape_percent_leading_and_consecutive() {
        assert_eq!(escape_percent("%%"), "\\%\\%");
        assert_eq!(escape_percent(&escape_percent("%%")), "\\%\\%");
    }

    #[test]
    fn test_latex_minus_only_before_digits() {
        assert_eq!(latex_minus("-0.056"), "$-$0.056");
        assert_eq!(latex_minus("[-0.100; 0.000]"), "[$-$0.100; 0.000]");
        assert_eq!(latex_minus("chain-of-thought"), "chain-of-thought");
        assert_eq!(latex_minus("a-b -x --1"), "a-b -x -$-$1");
        assert_eq!(latex_minus("-1-2"), "$-$1$-$2");
    }

    #[test]
    fn test_latex_minus_and_p() {
        assert_eq!(latex_minus_and_p("P-values below -1"), "$P$-values below $-$1");
        let once = latex_minus_and_p("P-value");
        assert_eq!(latex_minus_and_p(&once), once);
    }

    #[test]
    fn test_midrule_and_strip_end() {
        let text = "\\midrule\nrow \\\\\n\\bottomrule\n\\end{tabular}\n";
        let out = apply_passes(
            text,
            &[SanitizePass::MidruleForBottomrule, SanitizePass::StripTabularEnd],
        );
        assert_eq!(out, "\\midrule\nrow \\\\\n\\midrule\n");
    }

    #[test]
    fn test_replace_pass_ignores_empty_needle() {
        assert_eq!(SanitizePass::replace("", "X").apply("abc"), "abc");
        assert_eq!(SanitizePass::replace("Ai", "AI").apply("Ai Advice"), "AI Advice");
    }

    #[test]
    fn test_escape_latex_reserved_characters() {
        assert_eq!(escape_latex("a_b & 5%"), "a\\_b \\& 5\\%");
        assert_eq!(escape_latex("~^\\"), "\\textasciitilde{}\\textasciicircum{}\\textbackslash{}");
        assert_eq!(escape_latex("{x} #1 $"), "\\{x\\} \\#1 \\$");
    }
}
