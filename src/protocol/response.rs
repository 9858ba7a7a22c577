//! Response definitions
//!
//! Decoded replies from the remote store, owned by the caller until they
//! have been rendered.

use super::rpc::{DeleteRangeResponse, KeyValue, PutResponse, RangeResponse, ResponseHeader};

/// The reply to one [`Operation`](super::Operation)
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Put(PutResponse),
    Range(RangeResponse),
    DeleteRange(DeleteRangeResponse),
}

impl Outcome {
    pub fn header(&self) -> Option<&ResponseHeader> {
        match self {
            Outcome::Put(r) => r.header.as_ref(),
            Outcome::Range(r) => r.header.as_ref(),
            Outcome::DeleteRange(r) => r.header.as_ref(),
        }
    }

    /// Store revision the reply was served at (0 when the header is missing)
    pub fn revision(&self) -> i64 {
        self.header().map_or(0, |h| h.revision)
    }

    /// Key/value pairs carried by the reply, in server order
    ///
    /// Range results for a read, previous values for a write or delete.
    pub fn pairs(&self) -> &[KeyValue] {
        match self {
            Outcome::Put(r) => r.prev_kv.as_slice(),
            Outcome::Range(r) => &r.kvs,
            Outcome::DeleteRange(r) => &r.prev_kvs,
        }
    }
}
