//! Summary tables: the row/column data rendered into a tabular.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{FittedModel, ParameterEstimate};
use crate::{TexError, TexResult};

/// p-values below this are shown as [`P_VALUE_MARKER`].
pub const P_VALUE_FLOOR: f64 = 0.0005;

/// Text shown instead of a p-value below [`P_VALUE_FLOOR`].
pub const P_VALUE_MARKER: &str = "$< 0.001$";

/// Column headers of a table derived from a fitted model.
pub const MODEL_COLUMNS: [&str; 4] = ["Coef.", "s.e.", "$P$-value", "95 % CI"];

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Render with `%.{decimals}f` for floats; text passes through verbatim.
    pub fn render(&self, decimals: usize) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format!("{:.*}", decimals, v),
            Cell::Text(s) => s.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    /// Parse a raw CSV field: integers, then floats, then text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Cell::Int(v);
        }
        match trimmed.parse::<f64>() {
            Ok(v) if !trimmed.is_empty() => Cell::Float(v),
            _ => Cell::Text(raw.to_string()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

/// p-value as shown in a model table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PValue {
    Value(f64),
    BelowFloor,
}

impl PValue {
    pub fn from_raw(p: f64) -> Self {
        // NaN compares false and lands on the marker
        if p >= P_VALUE_FLOOR { PValue::Value(p) } else { PValue::BelowFloor }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            PValue::Value(p) => Cell::Float(p),
            PValue::BelowFloor => Cell::Text(P_VALUE_MARKER.to_string()),
        }
    }
}

/// One coefficient row of a model table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub coefficient: f64,
    pub standard_error: f64,
    pub p_value: PValue,
    pub confidence_interval: (f64, f64),
}

impl SummaryRow {
    pub fn from_estimate(estimate: &ParameterEstimate) -> Self {
        SummaryRow {
            label: estimate.name.clone(),
            coefficient: estimate.coefficient,
            standard_error: estimate.std_error,
            p_value: PValue::from_raw(estimate.p_value),
            confidence_interval: estimate.conf_int,
        }
    }

    /// `[low; high]` with three decimals.
    pub fn confidence_interval_text(&self) -> String {
        let (low, high) = self.confidence_interval;
        format!("[{low:.3}; {high:.3}]")
    }

    fn into_row(self) -> TableRow {
        let ci = self.confidence_interval_text();
        TableRow {
            label: self.label,
            cells: vec![
                Cell::Float(self.coefficient),
                Cell::Float(self.standard_error),
                self.p_value.to_cell(),
                Cell::Text(ci),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// Labeled rows under a header of column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Header of the label column; empty when unnamed.
    #[serde(default)]
    pub index_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl SummaryTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        SummaryTable {
            index_name: String::new(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, label: impl Into<String>, cells: Vec<Cell>) -> TexResult<()> {
        let label = label.into();
        if cells.len() != self.columns.len() {
            return Err(TexError::Config(format!(
                "row `{label}` has {} cells, expected {}",
                cells.len(),
                self.columns.len()
            )));
        }
        self.rows.push(TableRow { label, cells });
        Ok(())
    }

    pub fn from_summary_rows(rows: Vec<SummaryRow>) -> Self {
        SummaryTable {
            index_name: String::new(),
            columns: MODEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.into_iter().map(SummaryRow::into_row).collect(),
        }
    }

    /// Coefficient table in the model's parameter order.
    pub fn from_model(model: &dyn FittedModel) -> Self {
        let rows = model.parameters().iter().map(SummaryRow::from_estimate).collect();
        Self::from_summary_rows(rows)
    }

    /// Rename every row labeled `from`.
    pub fn rename_label(&mut self, from: &str, to: &str) {
        for row in self.rows.iter_mut().filter(|r| r.label == from) {
            row.label = to.to_string();
        }
    }

    pub fn map_labels<F: Fn(&str) -> String + ?Sized>(&mut self, f: &F) {
        for row in &mut self.rows {
            row.label = f(&row.label);
        }
    }

    /// Read a CSV with a header row; the first column holds row labels.
    pub fn from_csv_reader<R: Read>(reader: R) -> TexResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| TexError::Message(format!("failed to read CSV header: {e}")))?
            .clone();
        let mut header_iter = headers.iter();
        let index_name = header_iter
            .next()
            .ok_or_else(|| TexError::Config("CSV has no columns".to_string()))?
            .to_string();
        let mut table = SummaryTable::new(header_iter);
        table.index_name = index_name;

        for (line, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| {
                TexError::Message(format!("failed to read CSV row {}: {e}", line + 2))
            })?;
            let mut fields = record.iter();
            let label = fields.next().unwrap_or_default().to_string();
            let cells = fields.map(Cell::parse).collect();
            table.push_row(label, cells)?;
        }
        Ok(table)
    }

    pub fn from_csv_path(path: &Path) -> TexResult<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| TexError::Message(format!("failed to open {}: {e}", path.display())))?;
        Self::from_csv_reader(file)
    }
}
