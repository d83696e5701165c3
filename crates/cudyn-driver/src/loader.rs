//! The seam between the driver handle and the operating system's dynamic
//! loader.
//!
//! [`DynamicLoader`] is the real implementation on top of `libloading`.
//! Anything else implementing [`LibraryLoader`] can stand in for it, which is
//! how the construction and lifecycle logic is exercised without a GPU.

use std::ffi::c_void;
use std::ptr::NonNull;

use libloading::{Library, Symbol};
use tracing::{debug, info};

use crate::error::DriverError;

/// An opened native library. Closing happens on drop.
pub trait NativeLibrary: Send + Sync {
    /// File name the library was opened under, used in diagnostics.
    fn name(&self) -> &str;

    /// Resolve `symbol` to its address, or `None` if it is not exported.
    fn symbol(&self, symbol: &str) -> Option<NonNull<c_void>>;
}

/// Opens native libraries by file name.
pub trait LibraryLoader {
    fn open(&self, name: &str) -> Result<Box<dyn NativeLibrary>, DriverError>;
}

/// Loader backed by the platform dynamic linker (`dlopen` / `LoadLibrary`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicLoader;

impl LibraryLoader for DynamicLoader {
    fn open(&self, name: &str) -> Result<Box<dyn NativeLibrary>, DriverError> {
        // SAFETY: loading the vendor driver runs its initializers; the CUDA
        // driver does not require anything from the host process beyond libc.
        match unsafe { Library::new(name) } {
            Ok(lib) => {
                info!("loaded CUDA driver from: {}", name);
                Ok(Box::new(DynamicLibrary {
                    name: name.to_string(),
                    lib,
                }))
            }
            Err(e) => {
                debug!("failed to load {}: {}", name, e);
                Err(DriverError::LibraryLoad {
                    library: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

struct DynamicLibrary {
    name: String,
    lib: Library,
}

impl NativeLibrary for DynamicLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self, symbol: &str) -> Option<NonNull<c_void>> {
        // SAFETY: the address is only read here; callers reinterpret it as a
        // function pointer of the signature the driver documents for `symbol`.
        let sym: Symbol<*mut c_void> = unsafe { self.lib.get(symbol.as_bytes()) }.ok()?;
        NonNull::new(*sym)
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        debug!("closing {}", self.name);
    }
}
