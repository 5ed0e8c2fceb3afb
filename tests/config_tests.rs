use whisper_worker::Config;

#[test]
fn test_load_config_file_with_partial_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worker.toml");
    std::fs::write(
        &path,
        r#"
[service]
name = "test-worker"
channel_capacity = 8

[model]
default_size = "tiny"
quantized = false
"#,
    )
    .unwrap();

    let cfg = Config::load(dir.path().join("worker").to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.name, "test-worker");
    assert_eq!(cfg.service.channel_capacity, 8);
    assert_eq!(cfg.model.default_size, "tiny");
    assert!(!cfg.model.quantized);
    // Unspecified sections and fields fall back to defaults.
    assert_eq!(cfg.model.chunk_seconds, 30);
    assert_eq!(cfg.audio.sample_rate, 16000);
}

#[test]
fn test_load_missing_config_file_fails() {
    assert!(Config::load("/nonexistent/place/worker").is_err());
}
