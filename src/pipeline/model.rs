use crate::config::ModelConfig;
use crate::error::{InferenceError, LoadError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Options forwarded to the model-loading service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Prefer a quantized model variant
    pub quantized: bool,
    /// Seconds of audio processed per chunk
    pub chunk_seconds: u32,
    /// Overlap between consecutive chunks
    pub stride_seconds: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            quantized: true,
            chunk_seconds: 30,
            stride_seconds: 5,
        }
    }
}

impl From<&ModelConfig> for LoadOptions {
    fn from(cfg: &ModelConfig) -> Self {
        Self {
            quantized: cfg.quantized,
            chunk_seconds: cfg.chunk_seconds,
            stride_seconds: cfg.stride_seconds,
        }
    }
}

/// Options for a single inference call.
#[derive(Debug, Clone, Default)]
pub struct InferOptions {
    /// Language hint; the pipeline auto-detects when absent
    pub language: Option<String>,
}

/// Output of one inference call.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
}

/// Derive the pipeline model identifier for a Whisper variant size.
///
/// The size name comes straight from the host ("tiny", "base", "small",
/// ...); validation is left to the loader, which fails the load for an
/// identifier it cannot resolve.
pub fn whisper_model_id(model_size: &str) -> String {
    format!("Xenova/whisper-{}", model_size)
}

/// Model-loading service.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load an inference pipeline for the given model identifier.
    async fn load(
        &self,
        model_id: &str,
        options: &LoadOptions,
    ) -> Result<Arc<dyn LoadedModel>, LoadError>;
}

/// A loaded inference pipeline.
#[async_trait]
pub trait LoadedModel: Send + Sync {
    /// Run speech recognition over mono samples at the pipeline rate.
    async fn infer(
        &self,
        samples: &[f32],
        options: &InferOptions,
    ) -> Result<Transcription, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_id_derivation() {
        assert_eq!(whisper_model_id("tiny"), "Xenova/whisper-tiny");
        assert_eq!(whisper_model_id("base.en"), "Xenova/whisper-base.en");
    }

    #[test]
    fn load_options_from_model_config() {
        let cfg = ModelConfig {
            quantized: false,
            chunk_seconds: 20,
            stride_seconds: 2,
            ..ModelConfig::default()
        };
        let opts = LoadOptions::from(&cfg);
        assert!(!opts.quantized);
        assert_eq!(opts.chunk_seconds, 20);
        assert_eq!(opts.stride_seconds, 2);
    }
}
