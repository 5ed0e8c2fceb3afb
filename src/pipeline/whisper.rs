//! whisper.cpp pipeline backend (optional, `whisper-cpp` feature).
//!
//! Resolves a pipeline model identifier to a local ggml file and runs
//! inference through whisper-rs. Both loading and inference are CPU-heavy,
//! so they run on the blocking pool.

use super::{InferOptions, LoadOptions, LoadedModel, ModelLoader, Transcription};
use crate::error::{InferenceError, LoadError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Loader backed by whisper.cpp model files on disk.
pub struct WhisperLoader {
    model_dir: PathBuf,
}

impl WhisperLoader {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    /// Map a pipeline identifier ("Xenova/whisper-tiny") to a ggml file
    /// ("ggml-tiny.bin") under the model directory.
    fn model_path(&self, model_id: &str) -> PathBuf {
        let size = model_id
            .rsplit_once("whisper-")
            .map(|(_, size)| size)
            .unwrap_or(model_id);
        self.model_dir.join(format!("ggml-{}.bin", size))
    }
}

#[async_trait]
impl ModelLoader for WhisperLoader {
    async fn load(
        &self,
        model_id: &str,
        _options: &LoadOptions,
    ) -> Result<Arc<dyn LoadedModel>, LoadError> {
        let path = self.model_path(model_id);
        if !path.exists() {
            return Err(LoadError::Pipeline(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| LoadError::Pipeline("invalid model path".to_string()))?
            .to_string();

        let ctx = tokio::task::spawn_blocking(move || {
            WhisperContext::new_with_params(&path_str, WhisperContextParameters::default())
        })
        .await
        .map_err(|e| LoadError::Pipeline(format!("load task failed: {e}")))?
        .map_err(|e| LoadError::Pipeline(format!("failed to load whisper model: {e}")))?;

        info!("whisper model loaded from {}", path.display());

        Ok(Arc::new(WhisperModel {
            ctx: Arc::new(ctx),
        }))
    }
}

/// A loaded whisper.cpp context.
pub struct WhisperModel {
    ctx: Arc<WhisperContext>,
}

#[async_trait]
impl LoadedModel for WhisperModel {
    async fn infer(
        &self,
        samples: &[f32],
        options: &InferOptions,
    ) -> Result<Transcription, InferenceError> {
        let ctx = Arc::clone(&self.ctx);
        let samples = samples.to_vec();
        let language = options.language.clone();

        let text = tokio::task::spawn_blocking(move || run_whisper(&ctx, &samples, language))
            .await
            .map_err(|e| InferenceError::Pipeline(format!("inference task failed: {e}")))??;

        Ok(Transcription { text })
    }
}

fn run_whisper(
    ctx: &WhisperContext,
    samples: &[f32],
    language: Option<String>,
) -> Result<String, InferenceError> {
    let mut state = ctx
        .create_state()
        .map_err(|e| InferenceError::Pipeline(format!("state error: {e}")))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(language.as_deref());
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    let cpus = std::thread::available_parallelism()
        .map(|n| n.get() as i32)
        .unwrap_or(4);
    params.set_n_threads(cpus);

    state
        .full(params, samples)
        .map_err(|e| InferenceError::Pipeline(format!("transcription failed: {e}")))?;

    let mut text = String::new();
    for segment in state.as_iter() {
        text.push_str(&format!("{segment}"));
        text.push(' ');
    }

    Ok(text.trim().to_string())
}
