// WHY: boundary adapter from a JSON request document to an engine job;
// the engine itself never touches files

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

use crate::highlighter::{HighlightConfig, LayerStyle, PhraseMapping, TitleFeature};
use crate::scheduler::{HighlightJob, OutputMode};

const DEFAULT_RESERVED: &str = "Verbs";

/// Highlight request as supplied by the presentation layer
///
/// `mapping` is a JSON object from feature label to phrase list; key order is
/// the declaration order used for tie-breaking. When `features` is omitted the
/// mapping's keys are requested in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightRequest {
    pub text: String,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub mapping: Map<String, Value>,
    #[serde(default)]
    pub mode: OutputMode,
    /// Outline-only category painted last; defaults to "Verbs", "" disables it
    #[serde(default)]
    pub reserved_last: Option<String>,
    #[serde(default)]
    pub min_phrase_chars: Option<usize>,
    #[serde(default)]
    pub style: Option<LayerStyle>,
}

impl HighlightRequest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse highlight request")
    }

    /// Load a request document asynchronously
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        debug!("Loaded request file {} ({} bytes)", path.display(), content.len());
        Self::from_json_str(&content)
    }

    /// Phrase mapping in declaration order; every value must be a list of strings
    pub fn mapping(&self) -> Result<PhraseMapping<String>> {
        let mut mapping = PhraseMapping::new();
        for (feature, value) in &self.mapping {
            let Value::Array(items) = value else {
                bail!("Mapping entry for {feature:?} must be a list of phrases");
            };
            let mut phrases = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(phrase) => phrases.push(phrase.clone()),
                    other => bail!("Phrase for {feature:?} must be a string, got {other}"),
                }
            }
            if feature.parse::<TitleFeature>().is_err() {
                warn!("Unrecognized feature category {:?}, treating it as opaque", feature);
            }
            mapping.insert(feature.clone(), phrases);
        }
        Ok(mapping)
    }

    /// Requested features; an omitted list falls back to the mapping's keys
    pub fn features(&self) -> Vec<String> {
        match &self.features {
            Some(features) => features.clone(),
            None => self.mapping.keys().cloned().collect(),
        }
    }

    pub fn config(&self) -> HighlightConfig<String> {
        let reserved = match self.reserved_last.as_deref() {
            None => Some(DEFAULT_RESERVED.to_string()),
            Some("") => None,
            Some(label) => Some(label.to_string()),
        };

        let mut config = HighlightConfig {
            reserved_last: reserved,
            ..HighlightConfig::default()
        };
        if let Some(min) = self.min_phrase_chars {
            config.min_phrase_chars = min;
        }
        if let Some(style) = &self.style {
            config.style = style.clone();
        }
        config
    }

    pub fn into_job(self) -> Result<HighlightJob<String>> {
        let mapping = self.mapping()?;
        let features = self.features();
        Ok(HighlightJob {
            text: self.text,
            features,
            mapping,
            mode: self.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "text": "Euclidis Elementa, translated by Jo. Dee",
        "mapping": {
            "Verbs": ["translated"],
            "Euclid References": ["Euclidis"],
            "Adapter Attribution": ["Jo. Dee"]
        },
        "mode": "segments"
    }"#;

    #[test]
    fn test_mapping_keeps_key_order() {
        let request = HighlightRequest::from_json_str(REQUEST).unwrap();
        let mapping = request.mapping().unwrap();
        let keys: Vec<&String> = mapping.features().collect();
        assert_eq!(keys, ["Verbs", "Euclid References", "Adapter Attribution"]);
        assert_eq!(request.features(), ["Verbs", "Euclid References", "Adapter Attribution"]);
        assert_eq!(request.mode, OutputMode::Segments);
    }

    #[test]
    fn test_reserved_defaults_and_overrides() {
        let request = HighlightRequest::from_json_str(REQUEST).unwrap();
        assert_eq!(request.config().reserved_last.as_deref(), Some("Verbs"));

        let disabled = HighlightRequest::from_json_str(r#"{"text": "", "reserved_last": ""}"#).unwrap();
        assert_eq!(disabled.config().reserved_last, None);
        assert_eq!(disabled.mode, OutputMode::Layers);
    }

    #[test]
    fn test_style_override() {
        let request = HighlightRequest::from_json_str(
            r##"{"text": "x", "style": {"halo_max_px": 4, "palette": ["#fff"]}, "min_phrase_chars": 3}"##,
        )
        .unwrap();
        let config = request.config();
        assert_eq!(config.style.halo_max_px, 4);
        assert_eq!(config.style.halo_step_px, 2);
        assert_eq!(config.style.palette, vec!["#fff".to_string()]);
        assert_eq!(config.min_phrase_chars, 3);
    }

    #[test]
    fn test_explicit_empty_features_request_nothing() {
        let request = HighlightRequest::from_json_str(
            r#"{"text": "translated", "features": [], "mapping": {"Verbs": ["translated"]}}"#,
        )
        .unwrap();
        assert!(request.features().is_empty());

        let job = request.into_job().unwrap();
        let highlighter = crate::Highlighter::new(HighlightConfig::default()).unwrap();
        let output = highlighter.layers(&job.text, &job.features, &job.mapping);
        assert!(output.layers.is_empty());
    }

    #[test]
    fn test_malformed_mapping_rejected() {
        let request = HighlightRequest::from_json_str(r#"{"text": "x", "mapping": {"Verbs": "translated"}}"#).unwrap();
        assert!(request.mapping().is_err());

        let request = HighlightRequest::from_json_str(r#"{"text": "x", "mapping": {"Verbs": [1]}}"#).unwrap();
        assert!(request.mapping().is_err());

        assert!(HighlightRequest::from_json_str(r#"{"mapping": {}}"#).is_err());
    }
}
