//! Configuration structures for the card processing pipeline.

use serde::{Deserialize, Serialize};

use crate::card::{FieldVocabulary, Strategy};

/// Main configuration for the nidcard pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NidcardConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Image hosting upload configuration.
    pub upload: UploadConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum text length to treat the text layer as usable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            min_text_length: 50,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which extractor runs over the text layer.
    pub strategy: Strategy,

    /// Label vocabularies for the card layout.
    pub vocabulary: FieldVocabulary,
}

/// Image hosting upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Whether extracted images are uploaded at all.
    pub enabled: bool,

    /// Hosting service endpoint.
    pub endpoint: String,

    /// API key for the hosting service. Prefer leaving this unset and
    /// providing `NIDCARD_IMGBB_KEY` in the environment.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.imgbb.com/1/upload".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl UploadConfig {
    /// Resolve the API key from the config file or the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("NIDCARD_IMGBB_KEY").ok())
    }
}

impl NidcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = NidcardConfig::default();
        assert_eq!(config.extraction.strategy, Strategy::RowWise);
        assert!(!config.upload.enabled);
        assert!(config.upload.api_key.is_none());
        assert!(!config.extraction.vocabulary.labels.is_empty());
    }

    #[test]
    fn config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NidcardConfig::default();
        config.extraction.strategy = Strategy::ColonDelimited;
        config.pdf.max_pages = 3;
        config.save(&path).unwrap();

        let loaded = NidcardConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.strategy, Strategy::ColonDelimited);
        assert_eq!(loaded.pdf.max_pages, 3);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: NidcardConfig =
            serde_json::from_str(r#"{"upload": {"enabled": true}}"#).unwrap();
        assert!(config.upload.enabled);
        assert_eq!(config.upload.endpoint, "https://api.imgbb.com/1/upload");
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn config_api_key_takes_precedence() {
        let config = UploadConfig {
            api_key: Some("from-config".to_string()),
            ..UploadConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }
}
