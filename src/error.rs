//! Error types for the worker's external collaborators.
//!
//! Each collaborator (model loading, audio decoding, inference) gets a
//! closed error enum. The session controller converts these into failure
//! events at the command boundary; they never escape the worker task.

use thiserror::Error;

/// Errors from the model-loading service.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The pipeline backend rejected the load.
    #[error("{0}")]
    Pipeline(String),

    /// Model files could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the audio-decoding service.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The byte stream was not a recognizable audio container.
    #[error("unrecognized audio container: {0}")]
    Format(String),

    /// The container was recognized but decoding a packet failed.
    #[error("audio decode failed: {0}")]
    Codec(String),

    /// The container held no audio track.
    #[error("no audio track found")]
    NoAudioTrack,

    /// I/O errors while reading the stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the inference service.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The pipeline backend failed during inference.
    #[error("{0}")]
    Pipeline(String),
}
