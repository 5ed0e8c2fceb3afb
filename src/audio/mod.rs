//! Audio decoding for the worker.
//!
//! The controller treats decoding as an external collaborator behind the
//! `AudioDecoder` trait; `SymphoniaDecoder` is the default implementation.

mod decode;
mod resample;

pub use decode::{AudioDecoder, DecodedAudio, SymphoniaDecoder, TARGET_SAMPLE_RATE};
pub use resample::{resample_linear, to_mono};
