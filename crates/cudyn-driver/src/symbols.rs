//! Declarative table of every driver entry point the handle binds.
//!
//! Each row names the logical symbol, the subsystem it belongs to, whether its
//! absence is fatal, whether it is looked up under the `_v2` ABI revision, and
//! which platform it exists on. The table is walked in order by
//! [`resolve`](crate::resolve), so the bootstrap groups come first.

use std::borrow::Cow;
use std::fmt;

/// Suffix of the revised ABI entry points (`cuMemAlloc` is exported as `cuMemAlloc_v2`).
pub const VERSION_SUFFIX: &str = "_v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Absence aborts construction.
    Required,
    /// Absence leaves the entry point unavailable and logs a warning.
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    /// Looked up under the logical name.
    Exact,
    /// Looked up under the logical name plus [`VERSION_SUFFIX`].
    Versioned,
}

/// Platform an entry point is exported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Any,
    Windows,
}

/// Operating system family the resolver runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Windows,
    Other,
}

impl Target {
    pub const fn current() -> Self {
        if cfg!(windows) {
            Target::Windows
        } else {
            Target::Other
        }
    }
}

impl Platform {
    pub const fn supports(self, target: Target) -> bool {
        match self {
            Platform::Any => true,
            Platform::Windows => matches!(target, Target::Windows),
        }
    }
}

/// CUDA driver API subsystem, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolGroup {
    Initialization,
    VersionManagement,
    DeviceManagement,
    PrimaryContext,
    ContextManagement,
    MemoryManagement,
    StreamManagement,
    GraphicsInterop,
    Direct3D10Interop,
    Direct3D11Interop,
}

impl SymbolGroup {
    pub const ALL: [SymbolGroup; 10] = [
        SymbolGroup::Initialization,
        SymbolGroup::VersionManagement,
        SymbolGroup::DeviceManagement,
        SymbolGroup::PrimaryContext,
        SymbolGroup::ContextManagement,
        SymbolGroup::MemoryManagement,
        SymbolGroup::StreamManagement,
        SymbolGroup::GraphicsInterop,
        SymbolGroup::Direct3D10Interop,
        SymbolGroup::Direct3D11Interop,
    ];

    /// Groups that must be bound, and the version queried, before the rest.
    pub const fn is_bootstrap(self) -> bool {
        matches!(
            self,
            SymbolGroup::Initialization | SymbolGroup::VersionManagement
        )
    }

    /// Short identifier, as accepted by the CLI.
    pub const fn label(self) -> &'static str {
        match self {
            SymbolGroup::Initialization => "init",
            SymbolGroup::VersionManagement => "version",
            SymbolGroup::DeviceManagement => "device",
            SymbolGroup::PrimaryContext => "primary-context",
            SymbolGroup::ContextManagement => "context",
            SymbolGroup::MemoryManagement => "memory",
            SymbolGroup::StreamManagement => "stream",
            SymbolGroup::GraphicsInterop => "graphics",
            SymbolGroup::Direct3D10Interop => "d3d10",
            SymbolGroup::Direct3D11Interop => "d3d11",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for SymbolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolSpec {
    pub name: &'static str,
    pub group: SymbolGroup,
    pub policy: Policy,
    pub suffix: Suffix,
    pub platform: Platform,
}

impl SymbolSpec {
    const fn new(group: SymbolGroup, name: &'static str, policy: Policy, suffix: Suffix) -> Self {
        Self {
            name,
            group,
            policy,
            suffix,
            platform: Platform::Any,
        }
    }

    pub const fn required(group: SymbolGroup, name: &'static str) -> Self {
        Self::new(group, name, Policy::Required, Suffix::Exact)
    }

    pub const fn optional(group: SymbolGroup, name: &'static str) -> Self {
        Self::new(group, name, Policy::Optional, Suffix::Exact)
    }

    pub const fn required_v2(group: SymbolGroup, name: &'static str) -> Self {
        Self::new(group, name, Policy::Required, Suffix::Versioned)
    }

    pub const fn optional_v2(group: SymbolGroup, name: &'static str) -> Self {
        Self::new(group, name, Policy::Optional, Suffix::Versioned)
    }

    pub const fn windows_only(self) -> Self {
        Self {
            platform: Platform::Windows,
            ..self
        }
    }

    pub const fn is_required(&self) -> bool {
        matches!(self.policy, Policy::Required)
    }

    /// Name to ask the library for.
    pub fn lookup_name(&self) -> Cow<'static, str> {
        match self.suffix {
            Suffix::Exact => Cow::Borrowed(self.name),
            Suffix::Versioned => Cow::Owned(format!("{}{}", self.name, VERSION_SUFFIX)),
        }
    }
}

/// Find the table row for a logical name.
pub fn find(name: &str) -> Option<&'static SymbolSpec> {
    SYMBOL_TABLE.iter().find(|spec| spec.name == name)
}

use SymbolGroup::*;

/// Every entry point bound by [`CudaDriver`](crate::CudaDriver), in resolution order.
pub static SYMBOL_TABLE: &[SymbolSpec] = &[
    // Initialization
    SymbolSpec::required(Initialization, "cuInit"),
    // Version Management
    SymbolSpec::required(VersionManagement, "cuDriverGetVersion"),
    // Device Management
    SymbolSpec::required(DeviceManagement, "cuDeviceGetName"),
    SymbolSpec::required(DeviceManagement, "cuDeviceGetLuid"),
    SymbolSpec::required(DeviceManagement, "cuDeviceGetUuid"),
    // Primary Context Management
    SymbolSpec::required(PrimaryContext, "cuDevicePrimaryCtxRetain"),
    SymbolSpec::required_v2(PrimaryContext, "cuDevicePrimaryCtxRelease"),
    SymbolSpec::optional_v2(PrimaryContext, "cuDevicePrimaryCtxSetFlags"),
    // Context Management
    SymbolSpec::required_v2(ContextManagement, "cuCtxCreate"),
    SymbolSpec::required_v2(ContextManagement, "cuCtxDestroy"),
    SymbolSpec::required_v2(ContextManagement, "cuCtxPushCurrent"),
    SymbolSpec::required_v2(ContextManagement, "cuCtxPopCurrent"),
    SymbolSpec::optional(ContextManagement, "cuCtxGetCurrent"),
    SymbolSpec::optional(ContextManagement, "cuCtxSetCurrent"),
    SymbolSpec::required(ContextManagement, "cuCtxGetStreamPriorityRange"),
    SymbolSpec::required(ContextManagement, "cuCtxSynchronize"),
    // Memory Management
    SymbolSpec::required_v2(MemoryManagement, "cuMemAlloc"),
    SymbolSpec::required_v2(MemoryManagement, "cuMemAllocPitch"),
    SymbolSpec::required_v2(MemoryManagement, "cuMemFree"),
    SymbolSpec::required(MemoryManagement, "cuMemcpy"),
    SymbolSpec::required_v2(MemoryManagement, "cuMemcpy2D"),
    SymbolSpec::required_v2(MemoryManagement, "cuMemcpy2DAsync"),
    SymbolSpec::optional_v2(MemoryManagement, "cuArrayGetDescriptor"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyAtoA"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyAtoD"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyAtoH"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyAtoHAsync"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyDtoA"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyDtoD"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyDtoH"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyDtoHAsync"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyHtoA"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyHtoAAsync"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyHtoD"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemcpyHtoDAsync"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemHostGetDevicePointer"),
    SymbolSpec::required_v2(MemoryManagement, "cuMemsetD8"),
    SymbolSpec::required(MemoryManagement, "cuMemsetD8Async"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemsetD16"),
    SymbolSpec::optional(MemoryManagement, "cuMemsetD16Async"),
    SymbolSpec::optional_v2(MemoryManagement, "cuMemsetD32"),
    SymbolSpec::optional(MemoryManagement, "cuMemsetD32Async"),
    // Stream Management
    SymbolSpec::required(StreamManagement, "cuStreamCreate"),
    SymbolSpec::required_v2(StreamManagement, "cuStreamDestroy"),
    SymbolSpec::required(StreamManagement, "cuStreamSynchronize"),
    SymbolSpec::optional(StreamManagement, "cuStreamCreateWithPriority"),
    SymbolSpec::optional(StreamManagement, "cuStreamGetPriority"),
    // Graphics Interoperability
    SymbolSpec::required(GraphicsInterop, "cuGraphicsMapResources"),
    SymbolSpec::required(GraphicsInterop, "cuGraphicsSubResourceGetMappedArray"),
    SymbolSpec::required(GraphicsInterop, "cuGraphicsUnmapResources"),
    SymbolSpec::required(GraphicsInterop, "cuGraphicsUnregisterResource"),
    // Direct3D10 Interoperability
    SymbolSpec::required(Direct3D10Interop, "cuD3D10GetDevice").windows_only(),
    SymbolSpec::optional(Direct3D10Interop, "cuGraphicsD3D10RegisterResource").windows_only(),
    // Direct3D11 Interoperability
    SymbolSpec::required(Direct3D11Interop, "cuD3D11GetDevice").windows_only(),
    SymbolSpec::optional(Direct3D11Interop, "cuGraphicsD3D11RegisterResource").windows_only(),
];
