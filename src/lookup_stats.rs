use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counters describing how lookups went.
#[derive(Debug)]
pub struct LookupStats {
    lookups: AtomicU64,
    rpc_failovers: AtomicU64,
    explorer_pages: AtomicU64,
    degraded_fields: AtomicU64,
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupStats {
    pub const fn new() -> Self {
        Self {
            lookups: AtomicU64::new(0),
            rpc_failovers: AtomicU64::new(0),
            explorer_pages: AtomicU64::new(0),
            degraded_fields: AtomicU64::new(0),
        }
    }

    pub fn inc_lookups(&self, n: u64) {
        self.lookups.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_rpc_failovers(&self, n: u64) {
        self.rpc_failovers.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_explorer_pages(&self, n: u64) {
        self.explorer_pages.fetch_add(n, Ordering::Relaxed);
    }

    /// A field that fell back to its zero default because its source failed.
    pub fn inc_degraded_fields(&self, n: u64) {
        self.degraded_fields.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LookupSnapshot {
        LookupSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            rpc_failovers: self.rpc_failovers.load(Ordering::Relaxed),
            explorer_pages: self.explorer_pages.load(Ordering::Relaxed),
            degraded_fields: self.degraded_fields.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LookupSnapshot {
    pub lookups: u64,
    pub rpc_failovers: u64,
    pub explorer_pages: u64,
    pub degraded_fields: u64,
}

pub static LOOKUP_STATS: LookupStats = LookupStats::new();
