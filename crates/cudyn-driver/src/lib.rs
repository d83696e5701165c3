//! Lazily loaded, process-wide handle to the NVIDIA CUDA driver API.
//!
//! [`CudaDriver::get`] opens the vendor driver library, binds the entry points
//! listed in [`symbols::SYMBOL_TABLE`], runs `cuInit` and hands out a shared
//! reference. Optional entry points missing from older drivers are left
//! unbound instead of failing the whole load.

pub mod api;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod loader;
pub mod resolve;
pub mod shared;
pub mod symbols;
pub mod version;

pub use api::DriverApi;
pub use driver::CudaDriver;
pub use error::{result_description, result_name, DriverError};
pub use loader::{DynamicLoader, LibraryLoader, NativeLibrary};
pub use resolve::{ResolvedSymbol, ResolvedSymbols, SymbolStatus};
pub use shared::{get_shared_instance, SharedRegistry};
pub use symbols::{SymbolGroup, SymbolSpec, Target, SYMBOL_TABLE};
pub use version::DriverVersion;
