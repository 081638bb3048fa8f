//! Fitted-model capability consumed by the table formatter.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{TexError, TexResult};

/// Estimate for a single model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEstimate {
    pub name: String,
    pub coefficient: f64,
    pub std_error: f64,
    pub p_value: f64,
    /// Lower and upper bound of the 95% confidence interval.
    pub conf_int: (f64, f64),
}

/// What the table formatter needs from a fitting library.
pub trait FittedModel {
    /// Parameter estimates in the model's own parameter order.
    fn parameters(&self) -> Vec<ParameterEstimate>;

    /// Look up a named scalar statistic such as `aic` or `nobs`.
    ///
    /// Returns `None` when the model does not provide it.
    fn statistic(&self, path: &str) -> Option<f64>;
}

/// Serialized summary of a fitted model.
///
/// `statistics` is a free-form JSON object; dotted paths reach into nested
/// objects (`fit.llf`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSummary {
    pub parameters: Vec<ParameterEstimate>,
    #[serde(default)]
    pub statistics: Value,
}

impl ModelSummary {
    pub fn new(parameters: Vec<ParameterEstimate>) -> Self {
        ModelSummary { parameters, statistics: Value::Null }
    }

    /// Set a top-level statistic.
    pub fn with_statistic(mut self, key: &str, value: f64) -> Self {
        if !self.statistics.is_object() {
            self.statistics = Value::Object(serde_json::Map::new());
        }
        if let Some(map) = self.statistics.as_object_mut() {
            map.insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// Load a summary from a JSON file.
    pub fn from_json_file(path: &Path) -> TexResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TexError::Message(format!("failed to read model summary {}: {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            TexError::Message(format!("failed to parse model summary {}: {e}", path.display()))
        })
    }
}

fn get_nested_num(v: &Value, path: &str) -> Option<f64> {
    let mut current = v;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    current.as_f64()
}

impl FittedModel for ModelSummary {
    fn parameters(&self) -> Vec<ParameterEstimate> {
        self.parameters.clone()
    }

    fn statistic(&self, path: &str) -> Option<f64> {
        get_nested_num(&self.statistics, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_lookup_by_dotted_path() {
        let summary: ModelSummary = serde_json::from_str(
            r#"{
                "parameters": [],
                "statistics": { "aic": 12.5, "nobs": 40, "fit": { "llf": -3.25 } }
            }"#,
        )
        .unwrap();

        assert_eq!(summary.statistic("aic"), Some(12.5));
        assert_eq!(summary.statistic("nobs"), Some(40.0));
        assert_eq!(summary.statistic("fit.llf"), Some(-3.25));
        assert_eq!(summary.statistic("bic"), None);
        assert_eq!(summary.statistic("fit.missing"), None);
    }

    #[test]
    fn test_statistics_default_to_empty() {
        let summary: ModelSummary = serde_json::from_str(
            r#"{ "parameters": [
                { "name": "const", "coefficient": 1.0, "std_error": 0.1,
                  "p_value": 0.01, "conf_int": [0.8, 1.2] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(summary.parameters.len(), 1);
        assert_eq!(summary.parameters[0].conf_int, (0.8, 1.2));
        assert_eq!(summary.statistic("aic"), None);
    }

    #[test]
    fn test_with_statistic() {
        let summary = ModelSummary::new(Vec::new()).with_statistic("aic", 3.0);
        assert_eq!(summary.statistic("aic"), Some(3.0));
    }
}
