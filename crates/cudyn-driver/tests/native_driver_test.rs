//! Integration test: the installed CUDA driver
//!
//! Loads the real driver library through the shared accessor. Skips when no
//! driver is installed or no device is present.
//!
//! Run with: cargo test --test native_driver_test -- --nocapture

use std::sync::Arc;

use cudyn_driver::shared::is_shared_instance_live;
use cudyn_driver::CudaDriver;

#[test]
fn test_shared_native_driver() {
    let driver = match CudaDriver::get() {
        Ok(driver) => driver,
        Err(e) => {
            println!("skipping, no usable CUDA driver: {}", e);
            assert!(!is_shared_instance_live());
            return;
        }
    };

    println!(
        "driver {} from {}",
        driver.driver_version().map(|v| v.to_string()).unwrap_or_default(),
        driver.library_name()
    );
    assert!(driver.version() > 0);
    assert!(driver.is_available("cuInit"));

    let again = CudaDriver::get().unwrap();
    assert!(Arc::ptr_eq(&driver, &again));

    drop(driver);
    drop(again);
    assert!(!is_shared_instance_live());
}
