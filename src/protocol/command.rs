//! Operation definitions
//!
//! The three calls a client can make, as immutable values built once
//! per invocation and turned into exactly one request message.

use std::str::FromStr;

use crate::error::KvError;
use crate::key::{Key, KeyRange};

use super::rpc::range_request::{SortOrder, SortTarget};
use super::rpc::{DeleteRangeRequest, PutRequest, RangeRequest};

/// Operation names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Get,
    Put,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::Put => "put",
            OperationKind::Delete => "del",
        }
    }
}

impl FromStr for OperationKind {
    type Err = KvError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "get" => Ok(OperationKind::Get),
            "put" => Ok(OperationKind::Put),
            "del" => Ok(OperationKind::Delete),
            other => Err(KvError::UnknownOperation(other.to_string())),
        }
    }
}

/// A single client operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Store a value under a key
    Put(PutOp),

    /// Read one key or a range of keys
    Range(RangeOp),

    /// Remove one key or a range of keys
    DeleteRange(DeleteOp),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Put(_) => OperationKind::Put,
            Operation::Range(_) => OperationKind::Get,
            Operation::DeleteRange(_) => OperationKind::Delete,
        }
    }
}

impl From<PutOp> for Operation {
    fn from(op: PutOp) -> Self {
        Operation::Put(op)
    }
}

impl From<RangeOp> for Operation {
    fn from(op: RangeOp) -> Self {
        Operation::Range(op)
    }
}

impl From<DeleteOp> for Operation {
    fn from(op: DeleteOp) -> Self {
        Operation::DeleteRange(op)
    }
}

// =============================================================================
// Put
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PutOp {
    pub key: Key,
    pub value: Key,

    /// Lease ID to attach (0 = none)
    pub lease: i64,

    /// Ask the server for the value being overwritten
    pub prev_kv: bool,
}

impl PutOp {
    pub fn new(key: impl Into<Key>, value: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            lease: 0,
            prev_kv: false,
        }
    }

    pub fn lease(mut self, lease: i64) -> Self {
        self.lease = lease;
        self
    }

    pub fn prev_kv(mut self, prev_kv: bool) -> Self {
        self.prev_kv = prev_kv;
        self
    }

    pub fn to_request(&self) -> PutRequest {
        PutRequest {
            key: self.key.clone().into_bytes(),
            value: self.value.clone().into_bytes(),
            lease: self.lease,
            prev_kv: self.prev_kv,
            ..Default::default()
        }
    }
}

// =============================================================================
// Range
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RangeOp {
    pub range: KeyRange,

    /// Maximum number of pairs returned (0 = unbounded)
    pub limit: u64,

    /// Point-in-time revision to read at (0 = latest)
    pub revision: i64,

    pub sort_order: SortOrder,
    pub sort_target: SortTarget,

    /// Serve from the local member without a quorum read
    pub serializable: bool,

    pub keys_only: bool,
    pub count_only: bool,
}

impl RangeOp {
    pub fn new(range: KeyRange) -> Self {
        Self {
            range,
            limit: 0,
            revision: 0,
            sort_order: SortOrder::None,
            sort_target: SortTarget::Key,
            serializable: false,
            keys_only: false,
            count_only: false,
        }
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    pub fn sort(mut self, order: SortOrder, target: SortTarget) -> Self {
        self.sort_order = order;
        self.sort_target = target;
        self
    }

    pub fn serializable(mut self, serializable: bool) -> Self {
        self.serializable = serializable;
        self
    }

    pub fn keys_only(mut self, keys_only: bool) -> Self {
        self.keys_only = keys_only;
        self
    }

    pub fn count_only(mut self, count_only: bool) -> Self {
        self.count_only = count_only;
        self
    }

    pub fn to_request(&self) -> RangeRequest {
        let mut request = RangeRequest {
            key: self.range.key.clone().into_bytes(),
            range_end: self.range.wire_range_end(),
            limit: i64::try_from(self.limit).unwrap_or(i64::MAX),
            revision: self.revision,
            serializable: self.serializable,
            keys_only: self.keys_only,
            count_only: self.count_only,
            ..Default::default()
        };
        request.set_sort_order(self.sort_order);
        request.set_sort_target(self.sort_target);
        request
    }
}

// =============================================================================
// DeleteRange
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOp {
    pub range: KeyRange,

    /// Ask the server for the deleted pairs
    pub prev_kv: bool,
}

impl DeleteOp {
    pub fn new(range: KeyRange) -> Self {
        Self {
            range,
            prev_kv: false,
        }
    }

    pub fn prev_kv(mut self, prev_kv: bool) -> Self {
        self.prev_kv = prev_kv;
        self
    }

    pub fn to_request(&self) -> DeleteRangeRequest {
        DeleteRangeRequest {
            key: self.range.key.clone().into_bytes(),
            range_end: self.range.wire_range_end(),
            prev_kv: self.prev_kv,
        }
    }
}
