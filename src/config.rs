//! Project configuration file (`texreport.toml` or YAML).
//!
//! Every section is optional; missing keys fall back to the library defaults.
//!
//! ```toml
//! [paths]
//! tables_dir = "Results/Tex"
//!
//! [table]
//! const_name = "Intercept"
//! [[table.replacements]]
//! from = "Ai"
//! to = "AI"
//!
//! [annotate]
//! low_offset = 0.1
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::annotate::AnnotateOptions;
use crate::storage::StoreConfig;
use crate::table::{InfoRow, TableLayout, TabularOptions};
use crate::{TexError, TexResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// `[table]` section: defaults for model tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub const_name: String,
    pub decimals: usize,
    pub column_format: String,
    pub replacements: Vec<Replacement>,
    /// Info rows below the coefficients; `None` keeps AIC and N.
    pub info: Option<Vec<InfoRow>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        let defaults = TabularOptions::default();
        TableConfig {
            const_name: defaults.const_name,
            decimals: defaults.decimals,
            column_format: defaults.column_format,
            replacements: Vec::new(),
            info: None,
        }
    }
}

impl TableConfig {
    pub fn tabular_options(&self) -> TabularOptions {
        let defaults = TabularOptions::default();
        TabularOptions {
            const_name: self.const_name.clone(),
            replacements: self.replacements.iter().map(|r| (r.from.clone(), r.to.clone())).collect(),
            label_formatter: None,
            decimals: self.decimals,
            column_format: self.column_format.clone(),
            info: self.info.clone().unwrap_or(defaults.info),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub paths: StoreConfig,
    pub table: TableConfig,
    pub layout: TableLayout,
    pub annotate: AnnotateOptions,
}

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "texreport.toml";

/// Load `path`, else `texreport.toml` if present, else defaults.
pub fn resolve_config(path: Option<&Path>) -> TexResult<ReportConfig> {
    match path {
        Some(p) => load_config(p),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(Path::new(DEFAULT_CONFIG_FILE)),
        None => Ok(ReportConfig::default()),
    }
}

/// Load a config file; `.yaml`/`.yml` parse as YAML, anything else as TOML.
pub fn load_config(path: &Path) -> TexResult<ReportConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| TexError::Config(format!("failed to read {}: {e}", path.display())))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|e| TexError::Config(format!("{}: {e}", path.display())))
    } else {
        toml::from_str(&s).map_err(|e| TexError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::InfoKind;

    #[test]
    fn test_empty_toml_is_default() {
        let cfg: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ReportConfig::default());
        let opts = cfg.table.tabular_options();
        assert_eq!(opts.const_name, "Intercept");
        assert_eq!(opts.info.len(), 2);
    }

    #[test]
    fn test_toml_sections() {
        let cfg: ReportConfig = toml::from_str(
            r#"
[paths]
tables_dir = "out/tex"
create_dirs = true

[table]
const_name = "Constant"
decimals = 2

[[table.replacements]]
from = "Ai"
to = "AI"

[[table.info]]
label = "Log-lik."
statistic = "llf"
kind = "decimal"

[annotate]
low_offset = 0.1
"#,
        )
        .unwrap();

        assert_eq!(cfg.paths.tables_dir, std::path::PathBuf::from("out/tex"));
        assert!(cfg.paths.create_dirs);
        let opts = cfg.table.tabular_options();
        assert_eq!(opts.const_name, "Constant");
        assert_eq!(opts.decimals, 2);
        assert_eq!(opts.column_format, "lrrrr");
        assert_eq!(opts.replacements, vec![("Ai".to_string(), "AI".to_string())]);
        assert_eq!(opts.info.len(), 1);
        assert_eq!(opts.info[0].kind(), InfoKind::Decimal);
        assert_eq!(cfg.annotate.low_offset, 0.1);
        assert_eq!(cfg.annotate.low_test_margin, 0.04);
    }

    #[test]
    fn test_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yml");
        std::fs::write(&path, "layout:\n  center: false\n  row_stretch: 1.3\n").unwrap();
        let cfg = load_config(&path).unwrap();
        assert!(!cfg.layout.center);
        assert_eq!(cfg.layout.row_stretch, Some(1.3));
        assert!(cfg.layout.footnotesize);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texreport.toml");
        std::fs::write(&path, "[table]\ndecimals = \"three\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(TexError::Config(_))));
    }
}
