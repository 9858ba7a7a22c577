//! # kvctl
//!
//! A minimal client for the etcd v3 KV gRPC interface:
//! - `Put`, range `Get` (including prefix scans) and `DeleteRange`
//! - Prefix boundary computation for prefix queries
//! - One scoped connection and one remote call per invocation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI arguments                           │
//! │              (text → canonical byte keys)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Operation
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Dispatcher                              │
//! │          (one request, one reply, then render)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ KvService
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connection                              │
//! │            (tonic channel, scoped lifetime)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ gRPC
//!                       ▼
//!                 remote KV store
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod protocol;
pub mod network;
pub mod render;
pub mod dispatch;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use key::{prefix_range_end, to_bytes, to_bytes_opt, to_text, Key, KeyRange};
pub use protocol::{Operation, Outcome};
pub use dispatch::Dispatcher;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvctl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
