//! Integration test: symbol table policies
//!
//! Enumerates the declarative table and checks the policy of every row.

use std::collections::HashSet;

use cudyn_driver::symbols::{self, Platform, Policy, Suffix, SymbolGroup, SYMBOL_TABLE};

fn spec(name: &str) -> &'static symbols::SymbolSpec {
    symbols::find(name).unwrap_or_else(|| panic!("{name} missing from table"))
}

#[test]
fn test_table_has_unique_names() {
    let names: HashSet<_> = SYMBOL_TABLE.iter().map(|s| s.name).collect();
    assert_eq!(names.len(), SYMBOL_TABLE.len());
    assert_eq!(SYMBOL_TABLE.len(), 55);
}

#[test]
fn test_bootstrap_symbols_are_required_and_exact() {
    for name in ["cuInit", "cuDriverGetVersion"] {
        let s = spec(name);
        assert!(s.group.is_bootstrap());
        assert_eq!(s.policy, Policy::Required);
        assert_eq!(s.suffix, Suffix::Exact);
    }
}

#[test]
fn test_versioned_lookup_names() {
    assert_eq!(spec("cuMemAlloc").lookup_name(), "cuMemAlloc_v2");
    assert_eq!(spec("cuCtxCreate").lookup_name(), "cuCtxCreate_v2");
    assert_eq!(spec("cuMemsetD32").lookup_name(), "cuMemsetD32_v2");
    assert_eq!(spec("cuMemcpy").lookup_name(), "cuMemcpy");
    assert_eq!(spec("cuMemsetD8Async").lookup_name(), "cuMemsetD8Async");
    assert_eq!(spec("cuStreamDestroy").lookup_name(), "cuStreamDestroy_v2");
}

#[test]
fn test_required_and_optional_rows() {
    let required = [
        "cuDeviceGetName",
        "cuDeviceGetLuid",
        "cuDeviceGetUuid",
        "cuDevicePrimaryCtxRetain",
        "cuDevicePrimaryCtxRelease",
        "cuCtxGetStreamPriorityRange",
        "cuMemAlloc",
        "cuMemcpy2DAsync",
        "cuMemsetD8",
        "cuStreamCreate",
        "cuGraphicsMapResources",
        "cuGraphicsUnregisterResource",
    ];
    let optional = [
        "cuDevicePrimaryCtxSetFlags",
        "cuCtxGetCurrent",
        "cuCtxSetCurrent",
        "cuArrayGetDescriptor",
        "cuMemcpyHtoD",
        "cuMemHostGetDevicePointer",
        "cuMemsetD16",
        "cuMemsetD32Async",
        "cuStreamCreateWithPriority",
        "cuStreamGetPriority",
    ];
    for name in required {
        assert!(spec(name).is_required(), "{name} should be required");
    }
    for name in optional {
        assert!(!spec(name).is_required(), "{name} should be optional");
    }

    let required_count = SYMBOL_TABLE.iter().filter(|s| s.is_required()).count();
    assert_eq!(required_count, 30);
}

#[test]
fn test_direct3d_rows_are_windows_only() {
    for s in SYMBOL_TABLE {
        let d3d = matches!(
            s.group,
            SymbolGroup::Direct3D10Interop | SymbolGroup::Direct3D11Interop
        );
        assert_eq!(s.platform == Platform::Windows, d3d, "{}", s.name);
    }
    assert!(spec("cuD3D10GetDevice").is_required());
    assert!(spec("cuD3D11GetDevice").is_required());
    assert!(!spec("cuGraphicsD3D10RegisterResource").is_required());
    assert!(!spec("cuGraphicsD3D11RegisterResource").is_required());
}

#[test]
fn test_group_labels() {
    assert_eq!(SymbolGroup::from_label("memory"), Some(SymbolGroup::MemoryManagement));
    assert_eq!(SymbolGroup::PrimaryContext.to_string(), "primary-context");
    assert_eq!(SymbolGroup::ALL.len(), 10);
    assert!(symbols::find("cuLaunchKernel").is_none());
}
