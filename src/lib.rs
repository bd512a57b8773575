//! # sfile
//!
//! A paired-file store: each record is a raw data file plus a companion
//! header file of named attributes.
//! - Positioned writes into the data file (sparse gaps allowed)
//! - Whole-snapshot writes of the attribute set into the header file
//! - All-or-nothing open, best-effort full release on close
//!
//! ## Architecture Overview
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │       StoreWriter       │
//!                 │ save_data / save_header │
//!                 │         / close         │
//!                 └────────────┬────────────┘
//!                              │
//!             ┌────────────────┴────────────────┐
//!             │                                 │
//!             ▼                                 ▼
//!   ┌───────────────────┐             ┌───────────────────┐
//!   │  PairedFileStore  │             │    MemoryStore    │
//!   │   (filesystem)    │             │  (byte buffers)   │
//!   └─────────┬─────────┘             └───────────────────┘
//!             │
//!      ┌──────┴───────┐
//!      ▼              ▼
//!   <base>      <base>-Header
//!   (payload)   (attribute snapshot)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sfile::{Attributes, AttributeValue, PairedFileStore, StoreWriter};
//!
//! let mut store = PairedFileStore::open("record.bin")?;
//! store.save_data(b"payload", 0)?;
//!
//! let mut attrs = Attributes::new();
//! attrs.insert("rate".to_string(), AttributeValue::from(44_100));
//! store.save_header(&attrs)?;
//!
//! store.close()?;
//! # Ok::<(), sfile::SFileError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod header;
pub mod writer;
pub mod store;
pub mod memory;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SFileError};
pub use config::{StoreConfig, SyncPolicy};
pub use header::{AttributeValue, Attributes};
pub use writer::StoreWriter;
pub use store::PairedFileStore;
pub use memory::{MemoryStore, MemoryStoreView};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sfile
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
