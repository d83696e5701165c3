//! Dynamic loading of the real CUDA driver library.
//!
//! Uses `libloading` to load `nvcuda.dll` (Windows) or `libcuda.so.1` (elsewhere),
//! binds the entry points listed in [`SYMBOL_TABLE`] and initializes the driver.

use std::ffi::{c_int, c_uint};
use std::sync::Arc;

use cudyn_common::platform::cuda_library_name;
use tracing::{debug, error, info, warn};

use crate::api::DriverApi;
use crate::error::{result_name, DriverError};
use crate::ffi::*;
use crate::loader::{DynamicLoader, LibraryLoader, NativeLibrary};
use crate::resolve::ResolvedSymbols;
use crate::shared;
use crate::symbols::{Target, SYMBOL_TABLE};
use crate::version::DriverVersion;

/// One loaded and initialized CUDA driver.
///
/// Every required entry point is bound; optional ones may be absent. Most
/// consumers should go through [`CudaDriver::get`] so the process shares a
/// single instance. The library is closed when the value is dropped.
pub struct CudaDriver {
    api: DriverApi,
    symbols: ResolvedSymbols,
    // Declared last so it is dropped after everything pointing into it.
    library: Box<dyn NativeLibrary>,
}

// SAFETY: The CUDA driver library handles are valid from any thread, and the
// symbol table is never mutated after construction. The CUDA driver API itself
// handles thread safety via context management.
unsafe impl Send for CudaDriver {}
unsafe impl Sync for CudaDriver {}

impl CudaDriver {
    /// Shared process-wide instance, constructed on first use.
    ///
    /// Stays alive while any returned `Arc` does; the next call after the last
    /// one is dropped loads the driver again.
    pub fn get() -> Result<Arc<Self>, DriverError> {
        shared::get_shared_instance()
    }

    /// Load and initialize a private instance from the platform driver library.
    pub fn load() -> Result<Self, DriverError> {
        Self::load_with(&DynamicLoader)
    }

    /// Load through `loader` instead of the platform dynamic linker.
    pub fn load_with(loader: &dyn LibraryLoader) -> Result<Self, DriverError> {
        Self::load_with_target(loader, Target::current())
    }

    /// Load through `loader`, attempting the platform-restricted rows of the
    /// symbol table that apply to `target`.
    pub fn load_with_target(
        loader: &dyn LibraryLoader,
        target: Target,
    ) -> Result<Self, DriverError> {
        let name = cuda_library_name();
        debug!("initializing CUDA driver binding from {}", name);

        let library = loader.open(name)?;
        let mut symbols = ResolvedSymbols::new(library.name());

        // 1. Initialization and version query first.
        symbols.resolve(
            library.as_ref(),
            SYMBOL_TABLE.iter().filter(|s| s.group.is_bootstrap()),
            target,
        )?;

        // 2. Report the driver version before touching anything else.
        // SAFETY: FnCuDriverGetVersion is the signature of cuDriverGetVersion.
        let get_version: FnCuDriverGetVersion = unsafe { symbols.required("cuDriverGetVersion")? };
        match query_version(get_version) {
            Ok(version) => info!("driver reported CUDA version: {}", version),
            Err(code) => warn!(
                "failed to query NVIDIA CUDA driver for version: {}",
                result_name(code)
            ),
        }

        // 3. Everything else, subsystem by subsystem.
        symbols.resolve(
            library.as_ref(),
            SYMBOL_TABLE.iter().filter(|s| !s.group.is_bootstrap()),
            target,
        )?;
        let api = DriverApi::bind(&symbols)?;

        // 4. Global driver initialization.
        let res = unsafe { (api.cu_init)(0) };
        if res != CUDA_SUCCESS {
            error!("cuInit failed: {} ({})", result_name(res), res);
            return Err(DriverError::init_failed(res));
        }

        let driver = Self {
            api,
            symbols,
            library,
        };
        info!(
            "CUDA driver ready: {} entry points bound, {} unavailable",
            driver.symbols.iter().filter(|s| s.is_bound()).count(),
            driver.symbols.iter().filter(|s| !s.is_bound()).count(),
        );
        Ok(driver)
    }

    /// Raw entry points, for direct invocation by memory, stream, context and
    /// graphics-interop code.
    pub fn api(&self) -> &DriverApi {
        &self.api
    }

    /// Per-symbol resolution results, in table order.
    pub fn symbols(&self) -> &ResolvedSymbols {
        &self.symbols
    }

    /// File name the driver library was opened under.
    pub fn library_name(&self) -> &str {
        self.library.name()
    }

    /// Whether the entry point with logical name `name` is bound.
    pub fn is_available(&self, name: &str) -> bool {
        self.symbols.is_bound(name)
    }

    /// Optional entry points this driver does not provide.
    pub fn missing_optional(&self) -> Vec<&'static str> {
        self.symbols.missing_optional().collect()
    }

    // ── Version Management ────────────────────────────────────────

    /// Raw driver version (`major * 1000 + minor * 10 + patch`), or 0 when
    /// the driver cannot report it.
    pub fn version(&self) -> i32 {
        self.driver_version().map(DriverVersion::to_raw).unwrap_or(0)
    }

    pub fn driver_version(&self) -> Result<DriverVersion, CUresult> {
        query_version(self.api.cu_driver_get_version)
    }

    // ── Primary Context ───────────────────────────────────────────

    pub fn device_primary_ctx_set_flags(&self, device: CUdevice, flags: u32) -> CUresult {
        if let Some(func) = self.api.cu_device_primary_ctx_set_flags {
            unsafe { func(device, flags as c_uint) }
        } else {
            CUDA_ERROR_NOT_SUPPORTED
        }
    }

    // ── Context Management ────────────────────────────────────────

    pub fn ctx_get_current(&self) -> Result<CUcontext, CUresult> {
        if let Some(func) = self.api.cu_ctx_get_current {
            let mut ctx: CUcontext = std::ptr::null_mut();
            let res = unsafe { func(&mut ctx) };
            if res == CUDA_SUCCESS {
                Ok(ctx)
            } else {
                Err(res)
            }
        } else {
            Err(CUDA_ERROR_NOT_SUPPORTED)
        }
    }

    pub fn ctx_set_current(&self, ctx: CUcontext) -> CUresult {
        if let Some(func) = self.api.cu_ctx_set_current {
            unsafe { func(ctx) }
        } else {
            CUDA_ERROR_NOT_SUPPORTED
        }
    }

    pub fn ctx_get_stream_priority_range(&self) -> Result<(i32, i32), CUresult> {
        let mut least: c_int = 0;
        let mut greatest: c_int = 0;
        let res =
            unsafe { (self.api.cu_ctx_get_stream_priority_range)(&mut least, &mut greatest) };
        if res == CUDA_SUCCESS {
            Ok((least, greatest))
        } else {
            Err(res)
        }
    }

    // ── Memory Management ─────────────────────────────────────────

    pub fn memset_d32(&self, dst: CUdeviceptr, value: u32, count: usize) -> CUresult {
        if let Some(func) = self.api.cu_memset_d32 {
            unsafe { func(dst, value, count) }
        } else {
            CUDA_ERROR_NOT_SUPPORTED
        }
    }

    // ── Stream Management ─────────────────────────────────────────

    /// Create a stream with `priority`, or a default-priority stream if the
    /// driver has no stream priorities.
    pub fn stream_create_with_priority(
        &self,
        flags: u32,
        priority: i32,
    ) -> Result<CUstream, CUresult> {
        let mut stream: CUstream = std::ptr::null_mut();
        let res = match self.api.cu_stream_create_with_priority {
            Some(func) => unsafe { func(&mut stream, flags as c_uint, priority) },
            None => {
                debug!("stream priorities unavailable, creating default-priority stream");
                unsafe { (self.api.cu_stream_create)(&mut stream, flags as c_uint) }
            }
        };
        if res == CUDA_SUCCESS {
            Ok(stream)
        } else {
            Err(res)
        }
    }

    /// Priority `stream` was created with. Fails with `CUDA_ERROR_NOT_SUPPORTED`
    /// when the driver has no stream priorities.
    pub fn stream_get_priority(&self, stream: CUstream) -> Result<i32, CUresult> {
        if let Some(func) = self.api.cu_stream_get_priority {
            let mut priority: c_int = 0;
            let res = unsafe { func(stream, &mut priority) };
            if res == CUDA_SUCCESS {
                Ok(priority)
            } else {
                Err(res)
            }
        } else {
            Err(CUDA_ERROR_NOT_SUPPORTED)
        }
    }
}

impl Drop for CudaDriver {
    fn drop(&mut self) {
        debug!("finalizing CUDA driver binding (addr: {:p})", self as *const Self);
    }
}

fn query_version(get_version: FnCuDriverGetVersion) -> Result<DriverVersion, CUresult> {
    let mut raw: c_int = 0;
    let res = unsafe { get_version(&mut raw) };
    if res == CUDA_SUCCESS {
        Ok(DriverVersion::from_raw(raw))
    } else {
        Err(res)
    }
}
