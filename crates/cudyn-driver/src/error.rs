//! Construction errors and CUDA status code names.

use crate::ffi::CUresult;

/// Fatal failure while constructing a [`CudaDriver`](crate::CudaDriver).
///
/// Anything non-fatal (a missing optional entry point, a failed version query)
/// is logged during construction and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("failed to load CUDA driver library '{library}': {reason}")]
    LibraryLoad { library: String, reason: String },

    #[error("failed to load '{symbol}' from '{library}'")]
    MissingSymbol {
        /// Logical name, without any version suffix
        symbol: &'static str,
        /// Name actually looked up in the library
        lookup: String,
        library: String,
    },

    #[error("cuInit failed: {name} ({code})")]
    InitFailed { code: CUresult, name: &'static str },
}

impl DriverError {
    pub(crate) fn init_failed(code: CUresult) -> Self {
        DriverError::InitFailed {
            code,
            name: result_name(code),
        }
    }

    /// Logical name of the missing symbol, if that is what failed.
    pub fn missing_symbol(&self) -> Option<&'static str> {
        match self {
            DriverError::MissingSymbol { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}

/// Symbolic name of a CUDA status code, as `cuGetErrorName` would report it.
pub fn result_name(code: CUresult) -> &'static str {
    match code {
        0 => "CUDA_SUCCESS",
        1 => "CUDA_ERROR_INVALID_VALUE",
        2 => "CUDA_ERROR_OUT_OF_MEMORY",
        3 => "CUDA_ERROR_NOT_INITIALIZED",
        4 => "CUDA_ERROR_DEINITIALIZED",
        34 => "CUDA_ERROR_STUB_LIBRARY",
        46 => "CUDA_ERROR_DEVICE_UNAVAILABLE",
        100 => "CUDA_ERROR_NO_DEVICE",
        101 => "CUDA_ERROR_INVALID_DEVICE",
        102 => "CUDA_ERROR_DEVICE_NOT_LICENSED",
        201 => "CUDA_ERROR_INVALID_CONTEXT",
        202 => "CUDA_ERROR_CONTEXT_ALREADY_CURRENT",
        205 => "CUDA_ERROR_MAP_FAILED",
        206 => "CUDA_ERROR_UNMAP_FAILED",
        207 => "CUDA_ERROR_ARRAY_IS_MAPPED",
        208 => "CUDA_ERROR_ALREADY_MAPPED",
        211 => "CUDA_ERROR_NOT_MAPPED",
        212 => "CUDA_ERROR_NOT_MAPPED_AS_ARRAY",
        216 => "CUDA_ERROR_CONTEXT_ALREADY_IN_USE",
        219 => "CUDA_ERROR_INVALID_GRAPHICS_CONTEXT",
        302 => "CUDA_ERROR_SHARED_OBJECT_SYMBOL_NOT_FOUND",
        303 => "CUDA_ERROR_SHARED_OBJECT_INIT_FAILED",
        304 => "CUDA_ERROR_OPERATING_SYSTEM",
        400 => "CUDA_ERROR_INVALID_HANDLE",
        401 => "CUDA_ERROR_ILLEGAL_STATE",
        500 => "CUDA_ERROR_NOT_FOUND",
        600 => "CUDA_ERROR_NOT_READY",
        700 => "CUDA_ERROR_ILLEGAL_ADDRESS",
        708 => "CUDA_ERROR_PRIMARY_CONTEXT_ACTIVE",
        709 => "CUDA_ERROR_CONTEXT_IS_DESTROYED",
        800 => "CUDA_ERROR_NOT_PERMITTED",
        801 => "CUDA_ERROR_NOT_SUPPORTED",
        802 => "CUDA_ERROR_SYSTEM_NOT_READY",
        803 => "CUDA_ERROR_SYSTEM_DRIVER_MISMATCH",
        804 => "CUDA_ERROR_COMPAT_NOT_SUPPORTED_ON_DEVICE",
        _ => "CUDA_ERROR_UNKNOWN",
    }
}

/// Human-readable description of a CUDA status code.
pub fn result_description(code: CUresult) -> &'static str {
    match code {
        0 => "no error",
        1 => "invalid argument",
        2 => "out of memory",
        3 => "driver not initialized",
        4 => "driver deinitialized",
        34 => "CUDA driver is a stub library",
        100 => "no CUDA-capable device is detected",
        101 => "invalid device ordinal",
        201 => "invalid context",
        302 => "named symbol not found in shared object",
        303 => "shared object initialization failed",
        304 => "OS call failed",
        400 => "invalid resource handle",
        401 => "an illegal state was encountered",
        500 => "named symbol not found",
        600 => "not ready",
        700 => "an illegal memory access was encountered",
        800 => "operation not permitted",
        801 => "operation not supported",
        802 => "system not yet initialized",
        803 => "system has unsupported display driver / cuda driver combination",
        _ => "unknown error",
    }
}
