//! # Restaurant State
//!
//! The restaurant shared between screens, plus the files its effects go to.
//!
//! ## Thread Safety
//! The restaurant is wrapped in `Arc<Mutex<T>>`. A command, the delivery of
//! its notifications to every subscriber, and the writing of its effects all
//! happen under one lock, so no screen can observe an order that one
//! collaborator has seen and another has not.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action            RestaurantState            Files              │
//! │  ─────────────            ───────────────            ─────              │
//! │                                                                         │
//! │  Place order ──────► execute(|r| r.place_order(..))                     │
//! │                         │ lock                                          │
//! │                         ├─ command + fan-out                            │
//! │                         ├─ FileSink.apply(effects) ──► log.txt          │
//! │                         │                         └──► requests.txt     │
//! │                         │ unlock                                        │
//! │                                                                         │
//! │  Pending orders ───► with_restaurant(|r| ..)  (read only)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use restman_core::effect::{AuditEvent, Effect, EffectSink};
use restman_core::ingredient::RestockSignal;
use restman_core::{CoreResult, Restaurant};

use crate::audit::AuditLog;
use crate::config::RestmanConfig;
use crate::requests::RequestsFile;
use crate::snapshot::SnapshotStore;

// =============================================================================
// File Sink
// =============================================================================

/// Sends audit events to the log file and restock signals to the requests file.
#[derive(Debug, Clone)]
pub struct FileSink {
    audit: AuditLog,
    requests: RequestsFile,
}

impl FileSink {
    pub fn new(audit: AuditLog, requests: RequestsFile) -> Self {
        FileSink { audit, requests }
    }

    pub fn from_config(config: &RestmanConfig) -> Self {
        FileSink {
            audit: AuditLog::new(&config.paths.audit_log),
            requests: RequestsFile::new(&config.paths.requests),
        }
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn requests(&self) -> &RequestsFile {
        &self.requests
    }
}

impl EffectSink for FileSink {
    fn record_audit(&mut self, event: &AuditEvent) -> bool {
        self.audit.record(event)
    }

    fn request_restock(&mut self, signal: &RestockSignal) -> bool {
        self.requests.request(signal)
    }
}

// =============================================================================
// Shared State
// =============================================================================

struct Inner {
    restaurant: Restaurant,
    sink: FileSink,
}

#[derive(Clone)]
pub struct RestaurantState {
    inner: Arc<Mutex<Inner>>,
    snapshot: SnapshotStore,
}

impl RestaurantState {
    pub fn new(restaurant: Restaurant, sink: FileSink, snapshot: SnapshotStore) -> Self {
        RestaurantState {
            inner: Arc::new(Mutex::new(Inner { restaurant, sink })),
            snapshot,
        }
    }

    /// Restores the snapshot named in `config` (or starts fresh) and wires
    /// the file sinks.
    pub fn open(config: &RestmanConfig) -> Self {
        let snapshot = SnapshotStore::new(&config.paths.snapshot);
        let mut restaurant = snapshot.load_or_new();
        restaurant
            .ledger_mut()
            .set_restock_quantity(config.restock_quantity());

        info!(
            orders = restaurant.orders().count(),
            tables = restaurant.tables().count(),
            "Restaurant opened"
        );
        Self::new(restaurant, FileSink::from_config(config), snapshot)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Commands validate before mutating, so a panicked holder left the
        // restaurant in its last consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only access to the restaurant.
    pub fn with_restaurant<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Restaurant) -> R,
    {
        let inner = self.lock();
        f(&inner.restaurant)
    }

    /// Mutable access for operations that produce no effects, such as
    /// `open_table` or `hire`.
    ///
    /// Nothing returned from `f` is applied. Commands that return
    /// `CoreResult<Vec<Effect>>` (stock changes, seating, order transitions)
    /// must go through [`execute`](Self::execute) instead, or their audit
    /// lines and restock requests are lost.
    pub fn with_restaurant_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Restaurant) -> R,
    {
        let mut inner = self.lock();
        f(&mut inner.restaurant)
    }

    /// Runs a command and applies its effects before releasing the lock.
    ///
    /// Effects that could not be written are logged and counted, never
    /// turned into a command failure.
    pub fn execute<F>(&self, command: F) -> CoreResult<Vec<Effect>>
    where
        F: FnOnce(&mut Restaurant) -> CoreResult<Vec<Effect>>,
    {
        let mut guard = self.lock();
        let Inner { restaurant, sink } = &mut *guard;

        let effects = command(restaurant)?;
        let failed = sink.apply(&effects);
        if failed > 0 {
            warn!(failed, total = effects.len(), "Some effects could not be recorded");
        }
        Ok(effects)
    }

    /// Writes the snapshot. Returns false on failure.
    pub fn save(&self) -> bool {
        let inner = self.lock();
        self.snapshot.save(&inner.restaurant)
    }

    pub fn sink(&self) -> FileSink {
        self.lock().sink.clone()
    }
}
