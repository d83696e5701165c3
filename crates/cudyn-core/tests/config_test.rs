use cudyn_core::{CoreError, CudynConfig};

#[test]
fn test_empty_file_yields_defaults() {
    let config = CudynConfig::from_toml("").unwrap();
    assert_eq!(config.logging.filter, "info");
    assert!(config.verify.min_driver_version.is_none());
    assert!(config.verify.required_capabilities.is_empty());
}

#[test]
fn test_full_file() {
    let config = CudynConfig::from_toml(
        r#"
        [logging]
        filter = "cudyn_driver=debug"

        [verify]
        min_driver_version = "11.6"
        required_capabilities = ["cuStreamCreateWithPriority", "cuCtxGetCurrent"]
        "#,
    )
    .unwrap();

    assert_eq!(config.logging.filter, "cudyn_driver=debug");
    assert_eq!(config.verify.min_driver_version.as_deref(), Some("11.6"));
    assert_eq!(
        config.verify.required_capabilities,
        vec!["cuStreamCreateWithPriority", "cuCtxGetCurrent"]
    );
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = CudynConfig::from_toml("[verify\nmin_driver_version = 11").unwrap_err();
    assert!(matches!(err, CoreError::Parse(_)), "got {:?}", err);
}

#[test]
fn test_empty_filter_is_rejected() {
    let err = CudynConfig::from_toml("[logging]\nfilter = \"  \"").unwrap_err();
    assert!(matches!(err, CoreError::ConfigError(_)), "got {:?}", err);
}

#[test]
fn test_empty_capability_name_is_rejected() {
    let err = CudynConfig::from_toml("[verify]\nrequired_capabilities = [\"\"]").unwrap_err();
    assert!(matches!(err, CoreError::ConfigError(_)), "got {:?}", err);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("cudyn-config-test-does-not-exist.toml");
    let path = path.to_string_lossy();

    assert!(matches!(CudynConfig::load(&path), Err(CoreError::Io(_))));
    let config = CudynConfig::load_or_default(&path);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!("cudyn-config-test-{}.toml", std::process::id()));
    std::fs::write(&path, "[verify]\nmin_driver_version = \"12.0.1\"\n").unwrap();

    let config = CudynConfig::load(&path.to_string_lossy()).unwrap();
    assert_eq!(config.verify.min_driver_version.as_deref(), Some("12.0.1"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_default_config_path_ends_with_file_name() {
    assert!(cudyn_core::config::default_config_path().ends_with("cudyn.toml"));
}
