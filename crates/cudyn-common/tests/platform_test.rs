use cudyn_common::platform::{cuda_library_name, platform_name};

#[test]
fn test_library_name_matches_target() {
    let name = cuda_library_name();
    if cfg!(windows) {
        assert_eq!(name, "nvcuda.dll");
    } else {
        assert_eq!(name, "libcuda.so.1");
    }
}

#[test]
fn test_platform_name_is_known_on_supported_targets() {
    let name = platform_name();
    if cfg!(target_os = "linux") {
        assert_eq!(name, "linux");
    } else if cfg!(target_os = "windows") {
        assert_eq!(name, "windows");
    }
    assert!(!name.is_empty());
}

#[test]
fn test_init_logging_is_idempotent() {
    cudyn_common::init_logging();
    cudyn_common::init_logging_with("debug");
    tracing::info!("logging initialized twice without panicking");
}
