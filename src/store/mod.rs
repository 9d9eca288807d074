//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Store::open(path)
//!     → read JSON file if present (table name → record list)
//!     → keep tables in memory
//!
//! On every mutation (insert/update/delete):
//!     lock tables
//!     → apply change in memory
//!     → rewrite the whole file (no incremental diffing)
//!     → unlock
//! ```
//!
//! # Design Decisions
//! - One mutex guards both the tables and the backing file, so concurrent
//!   requests cannot interleave a mutation with a rewrite
//! - Writes are plain whole-file writes; a crash mid-write may corrupt the
//!   file (accepted limitation, no transactionality)
//! - `update`/`delete` report a missing id as an explicit `NotFound` error
//!   instead of no-opping, so callers need no pre-check

pub mod tables;

pub use tables::{Store, StoreError};
