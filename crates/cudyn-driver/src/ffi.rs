//! Raw CUDA driver ABI types and the function pointer signatures bound by
//! [`DriverApi`](crate::api::DriverApi).

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_uint, c_void};

/// CUDA result type (CUresult).
pub type CUresult = c_int;

/// CUDA device type.
pub type CUdevice = c_int;

/// Opaque CUDA types (represented as pointers).
pub type CUcontext = *mut c_void;
pub type CUdeviceptr = u64;
pub type CUstream = *mut c_void;
pub type CUarray = *mut c_void;
pub type CUgraphicsResource = *mut c_void;

pub const CUDA_SUCCESS: CUresult = 0;
pub const CUDA_ERROR_INVALID_VALUE: CUresult = 1;
pub const CUDA_ERROR_NOT_INITIALIZED: CUresult = 3;
pub const CUDA_ERROR_NO_DEVICE: CUresult = 100;
pub const CUDA_ERROR_NOT_SUPPORTED: CUresult = 801;
pub const CUDA_ERROR_UNKNOWN: CUresult = 999;

/// UUID structure (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct CUuuid {
    pub bytes: [c_char; 16],
}

/// Memory type selector used by [`CUDA_MEMCPY2D`].
pub type CUmemorytype = c_uint;

pub const CU_MEMORYTYPE_HOST: CUmemorytype = 1;
pub const CU_MEMORYTYPE_DEVICE: CUmemorytype = 2;
pub const CU_MEMORYTYPE_ARRAY: CUmemorytype = 3;
pub const CU_MEMORYTYPE_UNIFIED: CUmemorytype = 4;

/// 2D copy parameters for `cuMemcpy2D_v2` / `cuMemcpy2DAsync_v2`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CUDA_MEMCPY2D {
    pub src_x_in_bytes: usize,
    pub src_y: usize,
    pub src_memory_type: CUmemorytype,
    pub src_host: *const c_void,
    pub src_device: CUdeviceptr,
    pub src_array: CUarray,
    pub src_pitch: usize,

    pub dst_x_in_bytes: usize,
    pub dst_y: usize,
    pub dst_memory_type: CUmemorytype,
    pub dst_host: *mut c_void,
    pub dst_device: CUdeviceptr,
    pub dst_array: CUarray,
    pub dst_pitch: usize,

    pub width_in_bytes: usize,
    pub height: usize,
}

/// Array format (CUarray_format).
pub type CUarray_format = c_uint;

/// Descriptor filled in by `cuArrayGetDescriptor_v2`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct CUDA_ARRAY_DESCRIPTOR {
    pub width: usize,
    pub height: usize,
    pub format: CUarray_format,
    pub num_channels: c_uint,
}

// Initialization and version
pub type FnCuInit = unsafe extern "C" fn(flags: c_uint) -> CUresult;
pub type FnCuDriverGetVersion = unsafe extern "C" fn(version: *mut c_int) -> CUresult;

// Device management
pub type FnCuDeviceGetName =
    unsafe extern "C" fn(name: *mut c_char, len: c_int, dev: CUdevice) -> CUresult;
pub type FnCuDeviceGetLuid = unsafe extern "C" fn(
    luid: *mut c_char,
    device_node_mask: *mut c_uint,
    dev: CUdevice,
) -> CUresult;
pub type FnCuDeviceGetUuid = unsafe extern "C" fn(uuid: *mut CUuuid, dev: CUdevice) -> CUresult;

// Primary context
pub type FnCuDevicePrimaryCtxRetain =
    unsafe extern "C" fn(pctx: *mut CUcontext, dev: CUdevice) -> CUresult;
pub type FnCuDevicePrimaryCtxRelease = unsafe extern "C" fn(dev: CUdevice) -> CUresult;
pub type FnCuDevicePrimaryCtxSetFlags =
    unsafe extern "C" fn(dev: CUdevice, flags: c_uint) -> CUresult;

// Context management
pub type FnCuCtxCreate =
    unsafe extern "C" fn(pctx: *mut CUcontext, flags: c_uint, dev: CUdevice) -> CUresult;
pub type FnCuCtxDestroy = unsafe extern "C" fn(ctx: CUcontext) -> CUresult;
pub type FnCuCtxPushCurrent = unsafe extern "C" fn(ctx: CUcontext) -> CUresult;
pub type FnCuCtxPopCurrent = unsafe extern "C" fn(pctx: *mut CUcontext) -> CUresult;
pub type FnCuCtxGetCurrent = unsafe extern "C" fn(pctx: *mut CUcontext) -> CUresult;
pub type FnCuCtxSetCurrent = unsafe extern "C" fn(ctx: CUcontext) -> CUresult;
pub type FnCuCtxGetStreamPriorityRange =
    unsafe extern "C" fn(least: *mut c_int, greatest: *mut c_int) -> CUresult;
pub type FnCuCtxSynchronize = unsafe extern "C" fn() -> CUresult;

// Memory management
pub type FnCuMemAlloc = unsafe extern "C" fn(dptr: *mut CUdeviceptr, bytesize: usize) -> CUresult;
pub type FnCuMemAllocPitch = unsafe extern "C" fn(
    dptr: *mut CUdeviceptr,
    ppitch: *mut usize,
    width_in_bytes: usize,
    height: usize,
    element_size_bytes: c_uint,
) -> CUresult;
pub type FnCuMemFree = unsafe extern "C" fn(dptr: CUdeviceptr) -> CUresult;
pub type FnCuMemcpy =
    unsafe extern "C" fn(dst: CUdeviceptr, src: CUdeviceptr, byte_count: usize) -> CUresult;
pub type FnCuMemcpy2D = unsafe extern "C" fn(copy: *const CUDA_MEMCPY2D) -> CUresult;
pub type FnCuMemcpy2DAsync =
    unsafe extern "C" fn(copy: *const CUDA_MEMCPY2D, hstream: CUstream) -> CUresult;
pub type FnCuArrayGetDescriptor =
    unsafe extern "C" fn(desc: *mut CUDA_ARRAY_DESCRIPTOR, harray: CUarray) -> CUresult;
pub type FnCuMemcpyAtoA = unsafe extern "C" fn(
    dst: CUarray,
    dst_offset: usize,
    src: CUarray,
    src_offset: usize,
    byte_count: usize,
) -> CUresult;
pub type FnCuMemcpyAtoD = unsafe extern "C" fn(
    dst: CUdeviceptr,
    src: CUarray,
    src_offset: usize,
    byte_count: usize,
) -> CUresult;
pub type FnCuMemcpyAtoH = unsafe extern "C" fn(
    dst: *mut c_void,
    src: CUarray,
    src_offset: usize,
    byte_count: usize,
) -> CUresult;
pub type FnCuMemcpyAtoHAsync = unsafe extern "C" fn(
    dst: *mut c_void,
    src: CUarray,
    src_offset: usize,
    byte_count: usize,
    hstream: CUstream,
) -> CUresult;
pub type FnCuMemcpyDtoA = unsafe extern "C" fn(
    dst: CUarray,
    dst_offset: usize,
    src: CUdeviceptr,
    byte_count: usize,
) -> CUresult;
pub type FnCuMemcpyDtoD =
    unsafe extern "C" fn(dst: CUdeviceptr, src: CUdeviceptr, byte_count: usize) -> CUresult;
pub type FnCuMemcpyDtoH =
    unsafe extern "C" fn(dst: *mut c_void, src: CUdeviceptr, byte_count: usize) -> CUresult;
pub type FnCuMemcpyDtoHAsync = unsafe extern "C" fn(
    dst: *mut c_void,
    src: CUdeviceptr,
    byte_count: usize,
    hstream: CUstream,
) -> CUresult;
pub type FnCuMemcpyHtoA = unsafe extern "C" fn(
    dst: CUarray,
    dst_offset: usize,
    src: *const c_void,
    byte_count: usize,
) -> CUresult;
pub type FnCuMemcpyHtoAAsync = unsafe extern "C" fn(
    dst: CUarray,
    dst_offset: usize,
    src: *const c_void,
    byte_count: usize,
    hstream: CUstream,
) -> CUresult;
pub type FnCuMemcpyHtoD =
    unsafe extern "C" fn(dst: CUdeviceptr, src: *const c_void, byte_count: usize) -> CUresult;
pub type FnCuMemcpyHtoDAsync = unsafe extern "C" fn(
    dst: CUdeviceptr,
    src: *const c_void,
    byte_count: usize,
    hstream: CUstream,
) -> CUresult;
pub type FnCuMemHostGetDevicePointer =
    unsafe extern "C" fn(pdptr: *mut CUdeviceptr, p: *mut c_void, flags: c_uint) -> CUresult;
pub type FnCuMemsetD8 = unsafe extern "C" fn(dst: CUdeviceptr, value: u8, count: usize) -> CUresult;
pub type FnCuMemsetD8Async =
    unsafe extern "C" fn(dst: CUdeviceptr, value: u8, count: usize, hstream: CUstream) -> CUresult;
pub type FnCuMemsetD16 =
    unsafe extern "C" fn(dst: CUdeviceptr, value: u16, count: usize) -> CUresult;
pub type FnCuMemsetD16Async =
    unsafe extern "C" fn(dst: CUdeviceptr, value: u16, count: usize, hstream: CUstream) -> CUresult;
pub type FnCuMemsetD32 =
    unsafe extern "C" fn(dst: CUdeviceptr, value: u32, count: usize) -> CUresult;
pub type FnCuMemsetD32Async =
    unsafe extern "C" fn(dst: CUdeviceptr, value: u32, count: usize, hstream: CUstream) -> CUresult;

// Stream management
pub type FnCuStreamCreate =
    unsafe extern "C" fn(phstream: *mut CUstream, flags: c_uint) -> CUresult;
pub type FnCuStreamDestroy = unsafe extern "C" fn(hstream: CUstream) -> CUresult;
pub type FnCuStreamSynchronize = unsafe extern "C" fn(hstream: CUstream) -> CUresult;
pub type FnCuStreamCreateWithPriority =
    unsafe extern "C" fn(phstream: *mut CUstream, flags: c_uint, priority: c_int) -> CUresult;
pub type FnCuStreamGetPriority =
    unsafe extern "C" fn(hstream: CUstream, priority: *mut c_int) -> CUresult;

// Graphics interoperability
pub type FnCuGraphicsMapResources = unsafe extern "C" fn(
    count: c_uint,
    resources: *mut CUgraphicsResource,
    hstream: CUstream,
) -> CUresult;
pub type FnCuGraphicsSubResourceGetMappedArray = unsafe extern "C" fn(
    parray: *mut CUarray,
    resource: CUgraphicsResource,
    array_index: c_uint,
    mip_level: c_uint,
) -> CUresult;
pub type FnCuGraphicsUnmapResources = unsafe extern "C" fn(
    count: c_uint,
    resources: *mut CUgraphicsResource,
    hstream: CUstream,
) -> CUresult;
pub type FnCuGraphicsUnregisterResource =
    unsafe extern "C" fn(resource: CUgraphicsResource) -> CUresult;

// Direct3D interoperability. Adapter and resource arguments are COM
// interface pointers (IDXGIAdapter, ID3D10Resource, ID3D11Resource).
pub type FnCuD3D10GetDevice =
    unsafe extern "C" fn(pdevice: *mut CUdevice, adapter: *mut c_void) -> CUresult;
pub type FnCuGraphicsD3D10RegisterResource = unsafe extern "C" fn(
    presource: *mut CUgraphicsResource,
    d3d_resource: *mut c_void,
    flags: c_uint,
) -> CUresult;
pub type FnCuD3D11GetDevice =
    unsafe extern "C" fn(pdevice: *mut CUdevice, adapter: *mut c_void) -> CUresult;
pub type FnCuGraphicsD3D11RegisterResource = unsafe extern "C" fn(
    presource: *mut CUgraphicsResource,
    d3d_resource: *mut c_void,
    flags: c_uint,
) -> CUresult;
