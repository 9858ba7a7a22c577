//! Transport seam
//!
//! The dispatcher talks to the store only through [`KvService`], so the
//! remote connection can be swapped for an in-process implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::rpc::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest, RangeResponse,
};

/// The three KV calls
///
/// Each call is a single request/response exchange. Failures reported by
/// the store come back as [`KvError::Remote`](crate::KvError::Remote).
#[async_trait]
pub trait KvService: Send {
    async fn put(&mut self, request: PutRequest) -> Result<PutResponse>;

    async fn range(&mut self, request: RangeRequest) -> Result<RangeResponse>;

    async fn delete_range(&mut self, request: DeleteRangeRequest) -> Result<DeleteRangeResponse>;
}
