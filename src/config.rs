use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub model: ModelConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    /// Bound for the command and event channels
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model size used when preloading at startup (tiny, base, small, ...)
    pub default_size: String,
    /// Directory holding model files for local pipeline backends
    pub model_dir: String,
    pub quantized: bool,
    /// Seconds of audio the pipeline processes per chunk
    pub chunk_seconds: u32,
    /// Overlap between consecutive chunks
    pub stride_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate the pipeline expects (Whisper expects 16kHz)
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "whisper-worker".to_string(),
            channel_capacity: 32,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_size: "base".to_string(),
            model_dir: "models".to_string(),
            quantized: true,
            chunk_seconds: 30,
            stride_seconds: 5,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // Whisper expects 16kHz
            channels: 1,        // Mono
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            model: ModelConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_expectations() {
        let cfg = Config::default();
        assert_eq!(cfg.audio.sample_rate, 16000);
        assert_eq!(cfg.audio.channels, 1);
        assert!(cfg.model.quantized);
        assert_eq!(cfg.model.chunk_seconds, 30);
        assert_eq!(cfg.model.stride_seconds, 5);
    }
}
