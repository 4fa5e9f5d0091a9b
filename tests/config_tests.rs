// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use photo_share::Config;
use photo_share::backends::camera::FacingPreference;
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.mirror_preview, "Mirror preview should be enabled by default");
    assert_eq!(config.jpeg_quality, 80);
    assert_eq!(config.max_edge, 1024);
    assert_eq!(config.default_frame.to_string(), "640x480");
    assert_eq!(config.ideal_resolution.to_string(), "1280x720");
    assert_eq!(config.facing_preference, FacingPreference::Environment);
    assert_eq!(config.download_delay(), Duration::from_millis(1000));
}

#[test]
fn test_config_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "jpeg_quality": 60, "download_dir": "/tmp/fotos" }"#).unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.jpeg_quality, 60);
    assert_eq!(config.max_edge, 1024);
    assert_eq!(config.download_directory(), std::path::PathBuf::from("/tmp/fotos"));
}

#[test]
fn test_config_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_malformed_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load(&path).is_err());
}
