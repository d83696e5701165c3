//! Typed entry points of a resolved driver library.

use crate::error::DriverError;
use crate::ffi::*;
use crate::resolve::ResolvedSymbols;

/// Function pointers for every row of the symbol table, named after the
/// logical (unsuffixed) driver symbol.
///
/// Required entry points are plain function pointers. Optional ones are
/// `Option`s and `None` means the loaded driver does not export them; check
/// before calling. All pointers stay valid for as long as the owning
/// [`CudaDriver`](crate::CudaDriver) is alive.
pub struct DriverApi {
    // Initialization
    pub cu_init: FnCuInit,
    // Version management
    pub cu_driver_get_version: FnCuDriverGetVersion,
    // Device management
    pub cu_device_get_name: FnCuDeviceGetName,
    pub cu_device_get_luid: FnCuDeviceGetLuid,
    pub cu_device_get_uuid: FnCuDeviceGetUuid,
    // Primary context
    pub cu_device_primary_ctx_retain: FnCuDevicePrimaryCtxRetain,
    pub cu_device_primary_ctx_release: FnCuDevicePrimaryCtxRelease,
    pub cu_device_primary_ctx_set_flags: Option<FnCuDevicePrimaryCtxSetFlags>,
    // Context management
    pub cu_ctx_create: FnCuCtxCreate,
    pub cu_ctx_destroy: FnCuCtxDestroy,
    pub cu_ctx_push_current: FnCuCtxPushCurrent,
    pub cu_ctx_pop_current: FnCuCtxPopCurrent,
    pub cu_ctx_get_current: Option<FnCuCtxGetCurrent>,
    pub cu_ctx_set_current: Option<FnCuCtxSetCurrent>,
    pub cu_ctx_get_stream_priority_range: FnCuCtxGetStreamPriorityRange,
    pub cu_ctx_synchronize: FnCuCtxSynchronize,
    // Memory management
    pub cu_mem_alloc: FnCuMemAlloc,
    pub cu_mem_alloc_pitch: FnCuMemAllocPitch,
    pub cu_mem_free: FnCuMemFree,
    pub cu_memcpy: FnCuMemcpy,
    pub cu_memcpy2d: FnCuMemcpy2D,
    pub cu_memcpy2d_async: FnCuMemcpy2DAsync,
    pub cu_array_get_descriptor: Option<FnCuArrayGetDescriptor>,
    pub cu_memcpy_atoa: Option<FnCuMemcpyAtoA>,
    pub cu_memcpy_atod: Option<FnCuMemcpyAtoD>,
    pub cu_memcpy_atoh: Option<FnCuMemcpyAtoH>,
    pub cu_memcpy_atoh_async: Option<FnCuMemcpyAtoHAsync>,
    pub cu_memcpy_dtoa: Option<FnCuMemcpyDtoA>,
    pub cu_memcpy_dtod: Option<FnCuMemcpyDtoD>,
    pub cu_memcpy_dtoh: Option<FnCuMemcpyDtoH>,
    pub cu_memcpy_dtoh_async: Option<FnCuMemcpyDtoHAsync>,
    pub cu_memcpy_htoa: Option<FnCuMemcpyHtoA>,
    pub cu_memcpy_htoa_async: Option<FnCuMemcpyHtoAAsync>,
    pub cu_memcpy_htod: Option<FnCuMemcpyHtoD>,
    pub cu_memcpy_htod_async: Option<FnCuMemcpyHtoDAsync>,
    pub cu_mem_host_get_device_pointer: Option<FnCuMemHostGetDevicePointer>,
    pub cu_memset_d8: FnCuMemsetD8,
    pub cu_memset_d8_async: FnCuMemsetD8Async,
    pub cu_memset_d16: Option<FnCuMemsetD16>,
    pub cu_memset_d16_async: Option<FnCuMemsetD16Async>,
    pub cu_memset_d32: Option<FnCuMemsetD32>,
    pub cu_memset_d32_async: Option<FnCuMemsetD32Async>,
    // Stream management
    pub cu_stream_create: FnCuStreamCreate,
    pub cu_stream_destroy: FnCuStreamDestroy,
    pub cu_stream_synchronize: FnCuStreamSynchronize,
    pub cu_stream_create_with_priority: Option<FnCuStreamCreateWithPriority>,
    pub cu_stream_get_priority: Option<FnCuStreamGetPriority>,
    // Graphics interoperability
    pub cu_graphics_map_resources: FnCuGraphicsMapResources,
    pub cu_graphics_sub_resource_get_mapped_array: FnCuGraphicsSubResourceGetMappedArray,
    pub cu_graphics_unmap_resources: FnCuGraphicsUnmapResources,
    pub cu_graphics_unregister_resource: FnCuGraphicsUnregisterResource,
    // Direct3D 10 interoperability. The Direct3D entry points are bound only
    // when the Windows rows of the table were resolved; `cuD3D10GetDevice`
    // and `cuD3D11GetDevice` are then guaranteed to be `Some`.
    pub cu_d3d10_get_device: Option<FnCuD3D10GetDevice>,
    pub cu_graphics_d3d10_register_resource: Option<FnCuGraphicsD3D10RegisterResource>,
    // Direct3D 11 interoperability
    pub cu_d3d11_get_device: Option<FnCuD3D11GetDevice>,
    pub cu_graphics_d3d11_register_resource: Option<FnCuGraphicsD3D11RegisterResource>,
}

impl DriverApi {
    /// Build the typed table from fully resolved symbols.
    ///
    /// Fails only if a required row was never resolved, which construction
    /// rules out before getting here.
    pub(crate) fn bind(symbols: &ResolvedSymbols) -> Result<Self, DriverError> {
        // SAFETY: each field type in `ffi` is the documented driver signature
        // of the symbol it is bound from.
        unsafe {
            Ok(Self {
                // Initialization
                cu_init: symbols.required("cuInit")?,
                // Version management
                cu_driver_get_version: symbols.required("cuDriverGetVersion")?,
                // Device management
                cu_device_get_name: symbols.required("cuDeviceGetName")?,
                cu_device_get_luid: symbols.required("cuDeviceGetLuid")?,
                cu_device_get_uuid: symbols.required("cuDeviceGetUuid")?,
                // Primary context
                cu_device_primary_ctx_retain: symbols.required("cuDevicePrimaryCtxRetain")?,
                cu_device_primary_ctx_release: symbols.required("cuDevicePrimaryCtxRelease")?,
                cu_device_primary_ctx_set_flags: symbols.optional("cuDevicePrimaryCtxSetFlags"),
                // Context management
                cu_ctx_create: symbols.required("cuCtxCreate")?,
                cu_ctx_destroy: symbols.required("cuCtxDestroy")?,
                cu_ctx_push_current: symbols.required("cuCtxPushCurrent")?,
                cu_ctx_pop_current: symbols.required("cuCtxPopCurrent")?,
                cu_ctx_get_current: symbols.optional("cuCtxGetCurrent"),
                cu_ctx_set_current: symbols.optional("cuCtxSetCurrent"),
                cu_ctx_get_stream_priority_range: symbols.required("cuCtxGetStreamPriorityRange")?,
                cu_ctx_synchronize: symbols.required("cuCtxSynchronize")?,
                // Memory management
                cu_mem_alloc: symbols.required("cuMemAlloc")?,
                cu_mem_alloc_pitch: symbols.required("cuMemAllocPitch")?,
                cu_mem_free: symbols.required("cuMemFree")?,
                cu_memcpy: symbols.required("cuMemcpy")?,
                cu_memcpy2d: symbols.required("cuMemcpy2D")?,
                cu_memcpy2d_async: symbols.required("cuMemcpy2DAsync")?,
                cu_array_get_descriptor: symbols.optional("cuArrayGetDescriptor"),
                cu_memcpy_atoa: symbols.optional("cuMemcpyAtoA"),
                cu_memcpy_atod: symbols.optional("cuMemcpyAtoD"),
                cu_memcpy_atoh: symbols.optional("cuMemcpyAtoH"),
                cu_memcpy_atoh_async: symbols.optional("cuMemcpyAtoHAsync"),
                cu_memcpy_dtoa: symbols.optional("cuMemcpyDtoA"),
                cu_memcpy_dtod: symbols.optional("cuMemcpyDtoD"),
                cu_memcpy_dtoh: symbols.optional("cuMemcpyDtoH"),
                cu_memcpy_dtoh_async: symbols.optional("cuMemcpyDtoHAsync"),
                cu_memcpy_htoa: symbols.optional("cuMemcpyHtoA"),
                cu_memcpy_htoa_async: symbols.optional("cuMemcpyHtoAAsync"),
                cu_memcpy_htod: symbols.optional("cuMemcpyHtoD"),
                cu_memcpy_htod_async: symbols.optional("cuMemcpyHtoDAsync"),
                cu_mem_host_get_device_pointer: symbols.optional("cuMemHostGetDevicePointer"),
                cu_memset_d8: symbols.required("cuMemsetD8")?,
                cu_memset_d8_async: symbols.required("cuMemsetD8Async")?,
                cu_memset_d16: symbols.optional("cuMemsetD16"),
                cu_memset_d16_async: symbols.optional("cuMemsetD16Async"),
                cu_memset_d32: symbols.optional("cuMemsetD32"),
                cu_memset_d32_async: symbols.optional("cuMemsetD32Async"),
                // Stream management
                cu_stream_create: symbols.required("cuStreamCreate")?,
                cu_stream_destroy: symbols.required("cuStreamDestroy")?,
                cu_stream_synchronize: symbols.required("cuStreamSynchronize")?,
                cu_stream_create_with_priority: symbols.optional("cuStreamCreateWithPriority"),
                cu_stream_get_priority: symbols.optional("cuStreamGetPriority"),
                // Graphics interoperability
                cu_graphics_map_resources: symbols.required("cuGraphicsMapResources")?,
                cu_graphics_sub_resource_get_mapped_array: symbols
                    .required("cuGraphicsSubResourceGetMappedArray")?,
                cu_graphics_unmap_resources: symbols.required("cuGraphicsUnmapResources")?,
                cu_graphics_unregister_resource: symbols.required("cuGraphicsUnregisterResource")?,
                // Direct3D 10 interoperability
                cu_d3d10_get_device: symbols.optional("cuD3D10GetDevice"),
                cu_graphics_d3d10_register_resource: symbols
                    .optional("cuGraphicsD3D10RegisterResource"),
                // Direct3D 11 interoperability
                cu_d3d11_get_device: symbols.optional("cuD3D11GetDevice"),
                cu_graphics_d3d11_register_resource: symbols
                    .optional("cuGraphicsD3D11RegisterResource"),
            })
        }
    }
}
