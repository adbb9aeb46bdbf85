//! Fluid registry: name resolution plus a lazily populated table cache.
//!
//! Each fluid's [`PropertyTable`] is built on first access and shared through
//! an `Arc` afterwards. Loading happens under the slot's write lock, so
//! concurrent first callers observe a single load and the same table.

use crate::catalog;
use crate::error::{FluidError, FluidResult};
use crate::kind::FluidKind;
use crate::model::FluidModel;
use crate::range::ValidRange;
use crate::table::PropertyTable;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

type Slot = RwLock<Option<Arc<PropertyTable>>>;

/// Process-wide registry of fluid property tables.
#[derive(Debug)]
pub struct FluidRegistry {
    slots: [Slot; FluidKind::COUNT],
    loads: AtomicUsize,
}

static GLOBAL: OnceLock<FluidRegistry> = OnceLock::new();

impl Default for FluidRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FluidRegistry {
    /// Empty registry; tables load on first use.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| RwLock::new(None)),
            loads: AtomicUsize::new(0),
        }
    }

    /// Shared registry used by [`resolve_fluid`].
    pub fn global() -> &'static FluidRegistry {
        GLOBAL.get_or_init(FluidRegistry::new)
    }

    /// Resolve a case-insensitive fluid name or alias to a handle.
    pub fn resolve(&self, name: &str) -> FluidResult<FluidHandle> {
        let kind = catalog::lookup(name).ok_or_else(|| FluidError::FluidNotFound {
            name: name.trim().to_string(),
        })?;
        self.handle(kind)
    }

    pub fn handle(&self, kind: FluidKind) -> FluidResult<FluidHandle> {
        let slot = &self.slots[kind.index()];

        if let Some(table) = slot.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(FluidHandle {
                kind,
                table: Arc::clone(table),
            });
        }

        let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = guard.as_ref() {
            return Ok(FluidHandle {
                kind,
                table: Arc::clone(table),
            });
        }
        let table = Arc::new(PropertyTable::load(kind)?);
        let count = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(fluid = kind.key(), model = table.name(), loads = count, "property table loaded");
        *guard = Some(Arc::clone(&table));
        Ok(FluidHandle { kind, table })
    }

    pub fn is_loaded(&self, kind: FluidKind) -> bool {
        self.slots[kind.index()]
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of table loads performed since construction.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Drop every cached table so the next access reloads it.
    ///
    /// Handles already given out keep their table alive.
    pub fn reset(&self) {
        for slot in &self.slots {
            *slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        }
        debug!("fluid registry reset");
    }
}

/// Immutable binding of a fluid to its loaded property table.
#[derive(Debug, Clone)]
pub struct FluidHandle {
    kind: FluidKind,
    table: Arc<PropertyTable>,
}

impl FluidHandle {
    pub fn kind(&self) -> FluidKind {
        self.kind
    }

    pub fn table(&self) -> &PropertyTable {
        &self.table
    }

    pub fn valid_range(&self) -> ValidRange {
        self.table.valid_range()
    }

    /// Whether both handles share one loaded table.
    pub fn same_table(&self, other: &FluidHandle) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }
}

/// Resolve a fluid name against the global registry.
pub fn resolve_fluid(name: &str) -> FluidResult<FluidHandle> {
    FluidRegistry::global().resolve(name)
}

/// Valid (T, P) envelope of a resolved fluid.
pub fn valid_range(handle: &FluidHandle) -> ValidRange {
    handle.valid_range()
}
