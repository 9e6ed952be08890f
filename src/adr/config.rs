use crate::error::{AdrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "adr.config.json";
const DEFAULT_DOC_FOLDER: &str = "docs/adr";
const DEFAULT_TEMPLATE_FOLDER: &str = "docs/adr-templates";

/// Configuration for the ADR folder layout, stored as `adr.config.json`
/// next to the documents it describes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdrConfig {
    /// Relative or absolute location of the record documents.
    #[serde(default = "default_doc_folder")]
    pub doc_folder: String,

    /// Relative or absolute location of the template files.
    #[serde(default = "default_template_folder")]
    pub template_folder: String,
}

fn default_doc_folder() -> String {
    DEFAULT_DOC_FOLDER.to_string()
}

fn default_template_folder() -> String {
    DEFAULT_TEMPLATE_FOLDER.to_string()
}

impl Default for AdrConfig {
    fn default() -> Self {
        Self {
            doc_folder: default_doc_folder(),
            template_folder: default_template_folder(),
        }
    }
}

impl AdrConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AdrError::Io)?;
        let config: AdrConfig = serde_json::from_str(&content).map_err(AdrError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root).map_err(AdrError::Io)?;
        }

        let config_path = root.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AdrError::Serialization)?;
        fs::write(config_path, content).map_err(AdrError::Io)?;
        Ok(())
    }

    pub fn is_saved<P: AsRef<Path>>(root: P) -> bool {
        root.as_ref().join(CONFIG_FILENAME).exists()
    }
}
