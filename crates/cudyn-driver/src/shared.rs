//! Process-wide sharing of the driver handle.
//!
//! The registry keeps only a weak reference, so the handle lives exactly as
//! long as some caller holds an `Arc` to it. Once the last one is dropped the
//! library is closed, and the next request loads it again.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::driver::CudaDriver;
use crate::error::DriverError;

/// A slot holding at most one live `T`, handed out as `Arc<T>`.
pub struct SharedRegistry<T> {
    slot: Mutex<Weak<T>>,
}

impl<T> SharedRegistry<T> {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Weak::new()),
        }
    }

    /// Return the live instance, or construct one with `init`.
    ///
    /// The lock is held across `init`, so concurrent callers wait for the
    /// first construction and then share its result. A failed `init` leaves
    /// the slot empty and the next call tries again.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let mut slot = self.slot.lock();
        if let Some(existing) = slot.upgrade() {
            return Ok(existing);
        }

        let instance = Arc::new(init()?);
        *slot = Arc::downgrade(&instance);
        Ok(instance)
    }

    /// Whether some caller still holds the instance.
    pub fn is_live(&self) -> bool {
        self.strong_count() > 0
    }

    pub fn strong_count(&self) -> usize {
        self.slot.lock().strong_count()
    }
}

impl<T> Default for SharedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

static DRIVER: SharedRegistry<CudaDriver> = SharedRegistry::new();

/// Shared [`CudaDriver`], loaded from the platform library on first use.
pub fn get_shared_instance() -> Result<Arc<CudaDriver>, DriverError> {
    DRIVER.get_or_try_init(|| {
        let driver = CudaDriver::load()?;
        debug!("created shared CUDA driver binding");
        Ok(driver)
    })
}

/// Whether a shared [`CudaDriver`] is currently alive.
pub fn is_shared_instance_live() -> bool {
    DRIVER.is_live()
}
