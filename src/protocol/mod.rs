//! Protocol Module
//!
//! Typed operations and the gRPC messages they map onto.
//!
//! ## Calls
//! ```text
//! ┌─────────────┬───────────────────────────────┬──────────────────────────────┐
//! │ Operation   │ Method                        │ Reply                        │
//! ├─────────────┼───────────────────────────────┼──────────────────────────────┤
//! │ Put         │ /etcdserverpb.KV/Put          │ header, prev_kv?             │
//! │ Range       │ /etcdserverpb.KV/Range        │ header, kvs, more, count     │
//! │ DeleteRange │ /etcdserverpb.KV/DeleteRange  │ header, deleted, prev_kvs    │
//! └─────────────┴───────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! An empty `range_end` addresses exactly `key`; otherwise the call covers
//! `[key, range_end)` in unsigned byte order.

pub mod rpc;
mod command;
mod response;

pub use command::{DeleteOp, Operation, OperationKind, PutOp, RangeOp};
pub use response::Outcome;
pub use rpc::range_request::{SortOrder, SortTarget};
pub use rpc::KeyValue;
