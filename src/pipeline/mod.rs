//! External speech-recognition pipeline contracts.
//!
//! Model loading and inference are external collaborators consumed through
//! narrow trait seams. The worker never looks inside a model handle; it
//! only loads one, holds it, and runs inference against it.

mod model;

#[cfg(feature = "whisper-cpp")]
pub mod whisper;

pub use model::{
    whisper_model_id, InferOptions, LoadOptions, LoadedModel, ModelLoader, Transcription,
};
