pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod worker;

pub use audio::{AudioDecoder, DecodedAudio, SymphoniaDecoder};
pub use config::Config;
pub use error::{DecodeError, InferenceError, LoadError};
pub use pipeline::{
    whisper_model_id, InferOptions, LoadOptions, LoadedModel, ModelLoader, Transcription,
};
pub use worker::{Command, Event, SessionState, WorkerHandle, WorkerSession, WorkerStats};
