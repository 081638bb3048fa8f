//! LaTeX text handling.
//!
//! Everything that rewrites rendered LaTeX lives here so each rewrite can be
//! applied and tested on its own.

pub mod sanitize;

pub use sanitize::{
    SanitizePass, apply_passes, escape_latex, escape_percent, latex_minus, latex_minus_and_p,
};
