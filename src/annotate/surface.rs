//! Drawing surface the annotator writes onto.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Baseline,
}

/// Line style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
    /// Clip to the axes area.
    pub clip: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle { width: 1.0, color: "black".to_string(), clip: true }
    }
}

/// Text style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle { font_size: 10.0, h_align: HAlign::Left, v_align: VAlign::Baseline }
    }
}

/// An existing 2-D chart in data coordinates.
///
/// Categorical x positions are category indices.
pub trait PlotSurface {
    fn polyline(&mut self, xs: &[f64], ys: &[f64], style: &LineStyle);
    fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotElement {
    Polyline { xs: Vec<f64>, ys: Vec<f64>, style: LineStyle },
    Text { x: f64, y: f64, content: String, style: TextStyle },
}

/// Surface that records drawing calls for replay by a plotting front end.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    elements: Vec<PlotElement>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn elements(&self) -> &[PlotElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<PlotElement> {
        self.elements
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.elements)
    }
}

impl PlotSurface for RecordingSurface {
    fn polyline(&mut self, xs: &[f64], ys: &[f64], style: &LineStyle) {
        self.elements.push(PlotElement::Polyline {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            style: style.clone(),
        });
    }

    fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.elements.push(PlotElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
        });
    }
}
