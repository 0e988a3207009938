use std::path::{Path, PathBuf};

use contrecon_core::{all_sheet_keys, FileData, SHEET_KEY_SEPARATOR};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::mapper::{map_headers, union_headers};
use crate::mapping::CostMapping;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A reconciliation job: two sides, each a set of files plus how to read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub side_a: SideConfig,
    pub side_b: SideConfig,
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideConfig {
    /// Display name, e.g. "Internal" or "Carrier".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Input files, relative to the job file.
    pub files: Vec<String>,
    /// Qualified sheet keys (`"file.xlsx::Sheet"`). Absent means every sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets: Option<Vec<String>>,
    /// Explicit mapping. Absent means the heuristic suggestion is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<CostMapping>,
}

impl SideConfig {
    pub fn label_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }

    /// File paths resolved against the directory holding the job file.
    pub fn resolve_files(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|f| {
                let p = Path::new(f);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    base_dir.join(p)
                }
            })
            .collect()
    }

    /// The configured sheet keys, or every sheet of the loaded files.
    pub fn selected_sheet_keys(&self, files: &[FileData]) -> Vec<String> {
        match &self.sheets {
            Some(keys) => keys.clone(),
            None => all_sheet_keys(files),
        }
    }

    /// The configured mapping, or one suggested from the selected headers.
    pub fn effective_mapping(&self, files: &[FileData], selected: &[String]) -> CostMapping {
        match &self.mapping {
            Some(m) => m.clone(),
            None => map_headers(&union_headers(files, selected)),
        }
    }

    fn validate(&self, side: &str) -> Result<(), ReconError> {
        if self.files.is_empty() {
            return Err(ReconError::ConfigValidation(format!(
                "{side}: at least one file is required"
            )));
        }
        if let Some(keys) = &self.sheets {
            if let Some(bad) = keys.iter().find(|k| !k.contains(SHEET_KEY_SEPARATOR)) {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: sheet '{bad}' must be written as \"file{SHEET_KEY_SEPARATOR}sheet\""
                )));
            }
        }
        if let Some(mapping) = &self.mapping {
            if !mapping.is_ready() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: mapping needs both contract_no and date"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }
        self.side_a.validate("side_a")?;
        self.side_b.validate("side_b")?;
        Ok(())
    }

    pub fn label_a(&self) -> &str {
        self.side_a.label_or("File A")
    }

    pub fn label_b(&self) -> &str {
        self.side_b.label_or("File B")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
