//! # restman-store: File Layer for Restman
//!
//! Everything in Restman that touches the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Restman Data Flow                                │
//! │                                                                         │
//! │  Screen command (place order)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  restman-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ RestaurantSt. │    │   FileSink    │    │  Snapshot    │  │   │
//! │  │   │  (state.rs)   │───►│  audit.rs     │    │ snapshot.rs  │  │   │
//! │  │   │ Arc<Mutex<..>>│    │  requests.rs  │    │              │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 restman-core (pure domain)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - `restman.toml` and `RESTMAN_*` overrides
//! - [`audit`] - Append-only audit log
//! - [`requests`] - Restock requests file
//! - [`snapshot`] - JSON snapshot of the whole restaurant
//! - [`state`] - Shared state and the file-backed effect sink
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use restman_store::{RestaurantState, RestmanConfig};
//!
//! let config = RestmanConfig::load_or_default(None);
//! let state = RestaurantState::open(&config);
//!
//! let table = state.with_restaurant_mut(|r| r.open_table());
//! state.execute(|r| r.seat_customers(table, 4))?;
//! state.save();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod config;
pub mod error;
pub mod requests;
pub mod snapshot;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use audit::AuditLog;
pub use config::RestmanConfig;
pub use error::{StoreError, StoreResult};
pub use requests::RequestsFile;
pub use snapshot::SnapshotStore;
pub use state::{FileSink, RestaurantState};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=restman=trace` - Show trace for restman crates only
/// - Default: INFO, with DEBUG for restman crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,restman=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
