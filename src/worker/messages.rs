use serde::{Deserialize, Serialize};

/// Command received from the host.
///
/// Wire shape: `{"command": "...", "data": {...}}`, with audio bytes
/// base64-encoded inside the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    LoadModel { model_size: String },

    #[serde(rename_all = "camelCase")]
    Transcribe {
        #[serde(with = "base64_bytes")]
        audio_data: Vec<u8>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

/// Event sent to the host. Fire-and-forget, no acknowledgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Event {
    Progress {
        result: ProgressPayload,
    },

    ModelLoaded {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    TranscriptionResult {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<TranscriptionPayload>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPayload {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionPayload {
    pub text: String,
}

impl Event {
    pub fn progress(status: impl Into<String>) -> Self {
        Event::Progress {
            result: ProgressPayload {
                status: status.into(),
            },
        }
    }

    pub fn model_loaded_ok() -> Self {
        Event::ModelLoaded {
            success: true,
            error: None,
        }
    }

    pub fn model_loaded_err(error: impl Into<String>) -> Self {
        Event::ModelLoaded {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn transcription_ok(text: impl Into<String>) -> Self {
        Event::TranscriptionResult {
            success: true,
            error: None,
            result: Some(TranscriptionPayload { text: text.into() }),
        }
    }

    pub fn transcription_err(error: impl Into<String>) -> Self {
        Event::TranscriptionResult {
            success: false,
            error: Some(error.into()),
            result: None,
        }
    }
}

mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
