use tempfile::TempDir;
use webcheck::error::WebCheckError;
use webcheck::settings::{get_api_key, load_settings, save_api_key, save_settings, PersistentSettings};

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nonexistent.json");
    let settings = load_settings(&path);
    assert!(settings.gemini_api_key.is_none());
    assert!(get_api_key(&path).is_none());
}

#[test]
fn test_load_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json at all {{{").unwrap();
    // Should return defaults instead of panicking
    assert!(load_settings(&path).gemini_api_key.is_none());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let settings = PersistentSettings {
        gemini_api_key: Some("abc123".to_string()),
    };
    save_settings(&path, &settings).unwrap();

    assert_eq!(load_settings(&path).gemini_api_key, Some("abc123".to_string()));
}

#[test]
fn test_save_creates_parent_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");

    save_api_key(&path, "key").unwrap();
    assert!(path.exists());
}

#[test]
fn test_save_api_key_trims() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let stored = save_api_key(&path, "  spaced-key \n").unwrap();
    assert_eq!(stored, "spaced-key");
    assert_eq!(get_api_key(&path), Some("spaced-key".to_string()));
}

#[test]
fn test_blank_key_rejected_and_not_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let err = save_api_key(&path, "   ").unwrap_err();
    assert!(matches!(err, WebCheckError::InputValidation(_)));
    assert_eq!(err.to_string(), "Please enter an API key.");
    assert!(!path.exists());
}

#[test]
fn test_blank_stored_key_counts_as_unset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"gemini_api_key": "   "}"#).unwrap();

    assert!(get_api_key(&path).is_none());
}
