/// File name of the CUDA driver library on this platform.
///
/// Fixed per target; there is no environment or configuration override.
pub const fn cuda_library_name() -> &'static str {
    #[cfg(windows)]
    {
        "nvcuda.dll"
    }
    #[cfg(not(windows))]
    {
        "libcuda.so.1"
    }
}

/// Returns the platform name string.
pub fn platform_name() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        "unknown"
    }
}
