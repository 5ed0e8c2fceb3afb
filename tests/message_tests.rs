// Wire-format tests for the worker protocol.
//
// The JSON shapes here are the contract with the host; a change that
// breaks one of these assertions breaks every host.

use serde_json::json;
use whisper_worker::worker::messages::{Command, Event};

#[test]
fn test_load_model_command_shape() {
    let cmd = Command::LoadModel {
        model_size: "tiny".to_string(),
    };

    let value = serde_json::to_value(&cmd).unwrap();
    assert_eq!(
        value,
        json!({
            "command": "loadModel",
            "data": { "modelSize": "tiny" }
        })
    );
}

#[test]
fn test_transcribe_command_shape() {
    let cmd = Command::Transcribe {
        audio_data: vec![1, 2, 3],
        language: Some("en".to_string()),
    };

    let value = serde_json::to_value(&cmd).unwrap();
    assert_eq!(
        value,
        json!({
            "command": "transcribe",
            "data": { "audioData": "AQID", "language": "en" }
        })
    );
}

#[test]
fn test_transcribe_command_omits_missing_language() {
    let cmd = Command::Transcribe {
        audio_data: vec![0, 0],
        language: None,
    };

    let value = serde_json::to_value(&cmd).unwrap();
    assert!(value["data"].get("language").is_none());
}

#[test]
fn test_load_model_command_deserialization() {
    let json = r#"{"command": "loadModel", "data": {"modelSize": "base"}}"#;

    let cmd: Command = serde_json::from_str(json).unwrap();
    match cmd {
        Command::LoadModel { model_size } => assert_eq!(model_size, "base"),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_transcribe_command_deserialization() {
    let json = r#"{"command": "transcribe", "data": {"audioData": "AQID"}}"#;

    let cmd: Command = serde_json::from_str(json).unwrap();
    match cmd {
        Command::Transcribe {
            audio_data,
            language,
        } => {
            assert_eq!(audio_data, vec![1, 2, 3]);
            assert!(language.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_unknown_command_rejected() {
    let json = r#"{"command": "selfDestruct", "data": {}}"#;
    assert!(serde_json::from_str::<Command>(json).is_err());
}

#[test]
fn test_invalid_base64_rejected() {
    let json = r#"{"command": "transcribe", "data": {"audioData": "@@@"}}"#;
    assert!(serde_json::from_str::<Command>(json).is_err());
}

#[test]
fn test_progress_event_shape() {
    let value = serde_json::to_value(Event::progress("Processing audio...")).unwrap();
    assert_eq!(
        value,
        json!({
            "command": "progress",
            "result": { "status": "Processing audio..." }
        })
    );
}

#[test]
fn test_model_loaded_event_shapes() {
    let ok = serde_json::to_value(Event::model_loaded_ok()).unwrap();
    assert_eq!(ok, json!({"command": "modelLoaded", "success": true}));

    let err = serde_json::to_value(Event::model_loaded_err("download failed")).unwrap();
    assert_eq!(
        err,
        json!({
            "command": "modelLoaded",
            "success": false,
            "error": "download failed"
        })
    );
}

#[test]
fn test_transcription_result_event_shapes() {
    let ok = serde_json::to_value(Event::transcription_ok("hello world")).unwrap();
    assert_eq!(
        ok,
        json!({
            "command": "transcriptionResult",
            "success": true,
            "result": { "text": "hello world" }
        })
    );

    let err = serde_json::to_value(Event::transcription_err("oom")).unwrap();
    assert_eq!(
        err,
        json!({
            "command": "transcriptionResult",
            "success": false,
            "error": "oom"
        })
    );
}

#[test]
fn test_event_round_trip() {
    let event = Event::transcription_ok("round trip");
    let json = serde_json::to_string(&event).unwrap();
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
