use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::render::Role;
use crate::GraphError;

const RANKDIRS: [&str; 4] = ["TB", "BT", "LR", "RL"];

/// Presentation knobs. Every field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub rankdir: String,
    pub node_style: String,
    pub head_color: String,
    pub ancestor_color: String,
    pub leaf_color: String,
    pub short_id_len: usize,
    pub date_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
            node_style: "filled".to_string(),
            head_color: "red".to_string(),
            ancestor_color: "blue".to_string(),
            leaf_color: "green".to_string(),
            short_id_len: gitviz_core::id::SHORT_ID_LEN,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn color_for(&self, role: Role) -> &str {
        match role {
            Role::Head => &self.head_color,
            Role::Ancestor => &self.ancestor_color,
            Role::Leaf => &self.leaf_color,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GraphError> {
        let config: RenderConfig =
            toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, GraphError> {
        toml::to_string_pretty(self).map_err(|e| GraphError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if !RANKDIRS.contains(&self.rankdir.as_str()) {
            return Err(GraphError::Config(format!(
                "rankdir must be one of {RANKDIRS:?}, got '{}'",
                self.rankdir
            )));
        }
        if self.short_id_len == 0 {
            return Err(GraphError::Config("short_id_len must be at least 1".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(GraphError::Config(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}
