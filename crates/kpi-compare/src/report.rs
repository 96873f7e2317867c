use crate::comparison::Comparison;
use crate::error::ExportError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dated JSON snapshot of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub date: String,
    pub comparison: Comparison,
}

impl ScenarioReport {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            date: Utc::now().format("%Y-%m-%d").to_string(),
            comparison: comparison.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
