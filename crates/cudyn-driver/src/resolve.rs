//! Applies the [`SYMBOL_TABLE`](crate::symbols::SYMBOL_TABLE) policies
//! against an opened library.

use std::borrow::Cow;
use std::ffi::c_void;
use std::mem;
use std::ptr::NonNull;

use tracing::{debug, error, trace, warn};

use crate::error::DriverError;
use crate::loader::NativeLibrary;
use crate::symbols::{SymbolSpec, Target};

/// Outcome of resolving one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolStatus {
    /// Resolved to a non-null address.
    Bound,
    /// Optional and not exported by the library.
    Missing,
    /// Not attempted, the row belongs to another platform.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ResolvedSymbol {
    pub spec: &'static SymbolSpec,
    /// Name the library was asked for.
    pub lookup: Cow<'static, str>,
    address: Option<NonNull<c_void>>,
    skipped: bool,
}

impl ResolvedSymbol {
    pub fn status(&self) -> SymbolStatus {
        match (self.address, self.skipped) {
            (Some(_), _) => SymbolStatus::Bound,
            (None, true) => SymbolStatus::Skipped,
            (None, false) => SymbolStatus::Missing,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<NonNull<c_void>> {
        self.address
    }
}

/// Logical name → entry point mapping built up stage by stage during
/// construction. Read-only once the driver handle is ready.
#[derive(Debug, Clone)]
pub struct ResolvedSymbols {
    library: String,
    entries: Vec<ResolvedSymbol>,
}

impl ResolvedSymbols {
    pub fn new(library: &str) -> Self {
        Self {
            library: library.to_string(),
            entries: Vec::new(),
        }
    }

    /// Resolve `specs` in order against `lib`, appending the results.
    ///
    /// Stops at the first required symbol that cannot be found. Optional
    /// misses are logged and recorded as [`SymbolStatus::Missing`]; rows for
    /// a platform other than `target` are recorded as [`SymbolStatus::Skipped`].
    pub fn resolve<I>(
        &mut self,
        lib: &dyn NativeLibrary,
        specs: I,
        target: Target,
    ) -> Result<(), DriverError>
    where
        I: IntoIterator<Item = &'static SymbolSpec>,
    {
        for spec in specs {
            let lookup = spec.lookup_name();

            if !spec.platform.supports(target) {
                debug!("skipping '{}': not exported on this platform", spec.name);
                self.entries.push(ResolvedSymbol {
                    spec,
                    lookup,
                    address: None,
                    skipped: true,
                });
                continue;
            }

            let address = lib.symbol(&lookup);
            match address {
                Some(addr) => trace!("resolved '{}' as '{}' at {:p}", spec.name, lookup, addr),
                None if spec.is_required() => {
                    error!("failed to load '{}' from '{}'", spec.name, self.library);
                    return Err(DriverError::MissingSymbol {
                        symbol: spec.name,
                        lookup: lookup.into_owned(),
                        library: self.library.clone(),
                    });
                }
                None => warn!("loading of optional symbol '{}' failed", spec.name),
            }

            self.entries.push(ResolvedSymbol {
                spec,
                lookup,
                address,
                skipped: false,
            });
        }
        Ok(())
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedSymbol> {
        self.entries.iter().find(|e| e.spec.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedSymbol> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` resolved to an entry point.
    pub fn is_bound(&self, name: &str) -> bool {
        self.get(name).is_some_and(ResolvedSymbol::is_bound)
    }

    /// Optional entry points the library did not export.
    pub fn missing_optional(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|e| e.status() == SymbolStatus::Missing)
            .map(|e| e.spec.name)
    }

    /// Typed view of a bound required entry point.
    ///
    /// # Safety
    /// `F` must be the function pointer type matching the driver's signature
    /// for `name`.
    pub(crate) unsafe fn required<F: Copy>(&self, name: &'static str) -> Result<F, DriverError> {
        match self.get(name).and_then(ResolvedSymbol::address) {
            // SAFETY: forwarded to the caller.
            Some(addr) => Ok(unsafe { cast(addr) }),
            None => Err(DriverError::MissingSymbol {
                symbol: name,
                lookup: self
                    .get(name)
                    .map(|e| e.lookup.to_string())
                    .unwrap_or_else(|| name.to_string()),
                library: self.library.clone(),
            }),
        }
    }

    /// Typed view of an optional entry point, `None` when unavailable.
    ///
    /// # Safety
    /// Same contract as [`required`](Self::required).
    pub(crate) unsafe fn optional<F: Copy>(&self, name: &str) -> Option<F> {
        self.get(name)
            .and_then(ResolvedSymbol::address)
            // SAFETY: forwarded to the caller.
            .map(|addr| unsafe { cast(addr) })
    }
}

/// # Safety
/// `F` must be a function pointer type that `addr` actually implements.
unsafe fn cast<F: Copy>(addr: NonNull<c_void>) -> F {
    assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());
    // SAFETY: sizes checked above, validity of the signature is on the caller.
    unsafe { mem::transmute_copy::<*mut c_void, F>(&addr.as_ptr()) }
}
