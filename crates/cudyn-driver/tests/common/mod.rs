//! In-process stand-in for the CUDA driver library.
//!
//! `MockLoader` hands out libraries whose exports are plain `extern "C"`
//! functions defined here, and records what the driver handle asked for.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::{c_int, c_uint, c_void};
use std::io;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cudyn_driver::ffi::*;
use cudyn_driver::symbols::SYMBOL_TABLE;
use cudyn_driver::{DriverError, LibraryLoader, NativeLibrary};
use parking_lot::Mutex;

pub mod stubs {
    use super::*;

    pub extern "C" fn init<const R: i32>(_flags: c_uint) -> CUresult {
        R
    }

    pub extern "C" fn driver_get_version<const V: i32>(version: *mut c_int) -> CUresult {
        unsafe { *version = V };
        CUDA_SUCCESS
    }

    pub extern "C" fn driver_get_version_fails(_version: *mut c_int) -> CUresult {
        CUDA_ERROR_NOT_INITIALIZED
    }

    pub const FAKE_STREAM: usize = 0x5eed;
    pub const PRIORITY_STREAM: usize = 0x5ee0;
    pub const FAKE_CONTEXT: usize = 0xc0de;

    pub extern "C" fn stream_create(stream: *mut CUstream, _flags: c_uint) -> CUresult {
        unsafe { *stream = FAKE_STREAM as CUstream };
        CUDA_SUCCESS
    }

    pub extern "C" fn stream_create_with_priority(
        stream: *mut CUstream,
        _flags: c_uint,
        _priority: c_int,
    ) -> CUresult {
        unsafe { *stream = PRIORITY_STREAM as CUstream };
        CUDA_SUCCESS
    }

    pub extern "C" fn stream_get_priority(_stream: CUstream, priority: *mut c_int) -> CUresult {
        unsafe { *priority = -1 };
        CUDA_SUCCESS
    }

    pub extern "C" fn ctx_get_current(ctx: *mut CUcontext) -> CUresult {
        unsafe { *ctx = FAKE_CONTEXT as CUcontext };
        CUDA_SUCCESS
    }

    pub extern "C" fn ctx_set_current(_ctx: CUcontext) -> CUresult {
        CUDA_SUCCESS
    }

    pub extern "C" fn ctx_get_stream_priority_range(
        least: *mut c_int,
        greatest: *mut c_int,
    ) -> CUresult {
        unsafe {
            *least = 0;
            *greatest = -5;
        }
        CUDA_SUCCESS
    }

    pub extern "C" fn primary_ctx_set_flags(_dev: CUdevice, _flags: c_uint) -> CUresult {
        CUDA_SUCCESS
    }

    pub extern "C" fn memset_d32(_dst: CUdeviceptr, _value: u32, _count: usize) -> CUresult {
        CUDA_SUCCESS
    }

    /// Placeholder for entry points the tests never call.
    pub extern "C" fn not_called() -> CUresult {
        CUDA_ERROR_UNKNOWN
    }
}

/// What the handle did with the libraries a loader opened.
#[derive(Default)]
pub struct MockState {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub lookups: Mutex<Vec<String>>,
}

impl MockState {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn looked_up(&self, name: &str) -> bool {
        self.lookups.lock().iter().any(|l| l == name)
    }
}

#[derive(Clone)]
pub struct MockLoader {
    exports: HashMap<String, usize>,
    fail_open: bool,
    pub state: Arc<MockState>,
}

impl MockLoader {
    /// A driver exporting every table entry under its lookup name, including
    /// the Windows-only ones, reporting version 11.6.
    pub fn full() -> Self {
        let mut exports: HashMap<String, usize> = SYMBOL_TABLE
            .iter()
            .map(|spec| (spec.lookup_name().into_owned(), stubs::not_called as usize))
            .collect();

        let overrides: [(&str, usize); 11] = [
            ("cuInit", stubs::init::<CUDA_SUCCESS> as usize),
            ("cuDriverGetVersion", stubs::driver_get_version::<11060> as usize),
            ("cuStreamCreate", stubs::stream_create as usize),
            ("cuStreamCreateWithPriority", stubs::stream_create_with_priority as usize),
            ("cuStreamGetPriority", stubs::stream_get_priority as usize),
            ("cuCtxGetCurrent", stubs::ctx_get_current as usize),
            ("cuCtxSetCurrent", stubs::ctx_set_current as usize),
            ("cuCtxGetStreamPriorityRange", stubs::ctx_get_stream_priority_range as usize),
            ("cuDevicePrimaryCtxSetFlags_v2", stubs::primary_ctx_set_flags as usize),
            ("cuMemsetD32_v2", stubs::memset_d32 as usize),
            ("cuMemsetD32Async", stubs::not_called as usize),
        ];
        for (name, addr) in overrides {
            exports.insert(name.to_string(), addr);
        }

        Self {
            exports,
            fail_open: false,
            state: Arc::default(),
        }
    }

    /// Only the entry points every driver must provide.
    pub fn required_only() -> Self {
        let mut loader = Self::full();
        for spec in SYMBOL_TABLE.iter().filter(|s| !s.is_required()) {
            loader.exports.remove(spec.lookup_name().as_ref());
        }
        loader
    }

    pub fn with(mut self, lookup: &str, addr: usize) -> Self {
        self.exports.insert(lookup.to_string(), addr);
        self
    }

    pub fn without(mut self, lookup: &str) -> Self {
        self.exports.remove(lookup);
        self
    }

    /// Refuse to open anything, as if the driver were not installed.
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::full()
        }
    }
}

impl LibraryLoader for MockLoader {
    fn open(&self, name: &str) -> Result<Box<dyn NativeLibrary>, DriverError> {
        if self.fail_open {
            return Err(DriverError::LibraryLoad {
                library: name.to_string(),
                reason: "cannot open shared object file: No such file or directory".to_string(),
            });
        }
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockLibrary {
            name: name.to_string(),
            exports: self.exports.clone(),
            state: self.state.clone(),
        }))
    }
}

struct MockLibrary {
    name: String,
    exports: HashMap<String, usize>,
    state: Arc<MockState>,
}

impl NativeLibrary for MockLibrary {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self, symbol: &str) -> Option<NonNull<c_void>> {
        self.state.lookups.lock().push(symbol.to_string());
        self.exports
            .get(symbol)
            .and_then(|&addr| NonNull::new(addr as *mut c_void))
    }
}

impl Drop for MockLibrary {
    fn drop(&mut self) {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every event, returning the result
/// and the formatted log output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
    (result, logs)
}
