//! Configuration types for extraction runs

use crate::error::{AssistError, ReceiverNotFoundError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Title used until the template names one
pub const DEFAULT_TITLE: &str = "Requirements";

/// Sending institution whose courses are mapped
pub const DEFAULT_SENDING_COLLEGE: &str = "De Anza College";

/// A receiving institution and its ASSIST institution id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub name: String,
    pub id: u32,
}

impl Receiver {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Extraction settings (extractor.json / extractor.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorConfig {
    /// Sending institution recorded on every output row
    pub sending_college: String,

    /// Title applied to courses that precede any requirement title
    pub default_title: String,

    /// Receiving institutions agreements may come from
    pub receivers: Vec<Receiver>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            sending_college: DEFAULT_SENDING_COLLEGE.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            receivers: default_receivers(),
        }
    }
}

fn default_receivers() -> Vec<Receiver> {
    vec![
        Receiver::new("UCLA", 117),
        Receiver::new("UC San Diego", 7),
        Receiver::new("UC Santa Barbara", 128),
        Receiver::new("UC Irvine", 120),
        Receiver::new("UC Davis", 89),
        Receiver::new("UC Riverside", 46),
        Receiver::new("UC Santa Cruz", 132),
    ]
}

impl ExtractorConfig {
    /// Load configuration from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => {
                return Err(AssistError::Config(format!(
                    "Unsupported config format: {}",
                    path.display()
                )))
            }
        };

        if config.default_title.trim().is_empty() {
            return Err(AssistError::Config("defaultTitle must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Find a receiver by numeric id or (case-insensitive) name
    pub fn find_receiver(&self, key: &str) -> Result<&Receiver> {
        let key = key.trim();
        let by_id = key.parse::<u32>().ok();

        self.receivers
            .iter()
            .find(|r| Some(r.id) == by_id || r.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| {
                ReceiverNotFoundError {
                    receiver: key.to_string(),
                    available: self.receiver_names().iter().map(|s| s.to_string()).collect(),
                }
                .into()
            })
    }

    /// Get receiver names
    pub fn receiver_names(&self) -> Vec<&str> {
        self.receivers.iter().map(|r| r.name.as_str()).collect()
    }
}
