//! Network Module
//!
//! gRPC client side of the KV service.
//!
//! ## Architecture
//! - One connection per invocation, scoped to the operation
//! - One in-flight call per connection
//! - Deadlines delegated to the transport

mod client;
mod connection;
mod service;

pub use client::KvClient;
pub use connection::Connection;
pub use service::KvService;
