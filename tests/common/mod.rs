//! Shared test helpers
//!
//! An in-process KV store behind the same `KvService` seam the real
//! connection uses.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use kvctl::network::KvService;
use kvctl::protocol::rpc::{
    DeleteRangeRequest, DeleteRangeResponse, KeyValue, PutRequest, PutResponse, RangeRequest,
    RangeResponse, ResponseHeader,
};
use kvctl::{KeyRange, KvError, Result};

/// Sorted in-memory store with call accounting
#[derive(Default)]
pub struct MemoryKv {
    data: BTreeMap<Bytes, KeyValue>,
    revision: i64,

    /// Every request received, in order
    pub calls: Vec<Call>,

    /// When set, every call fails with this status
    pub fail_with: Option<tonic::Status>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Put(PutRequest),
    Range(RangeRequest),
    DeleteRange(DeleteRangeRequest),
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut kv = Self::new();
        for (key, value) in pairs {
            kv.insert(Bytes::copy_from_slice(key.as_bytes()), Bytes::copy_from_slice(value.as_bytes()));
        }
        kv
    }

    pub fn insert(&mut self, key: Bytes, value: Bytes) -> Option<KeyValue> {
        self.revision += 1;
        let previous = self.data.get(&key).cloned();
        let entry = KeyValue {
            key: key.clone(),
            value,
            create_revision: previous.as_ref().map_or(self.revision, |p| p.create_revision),
            mod_revision: self.revision,
            version: previous.as_ref().map_or(1, |p| p.version + 1),
            lease: 0,
        };
        self.data.insert(key, entry);
        previous
    }

    pub fn keys(&self) -> Vec<Bytes> {
        self.data.keys().cloned().collect()
    }

    fn header(&self) -> Option<ResponseHeader> {
        Some(ResponseHeader {
            cluster_id: 1,
            member_id: 1,
            revision: self.revision,
            raft_term: 1,
        })
    }

    fn matching(&self, key: &Bytes, range_end: &Bytes) -> Vec<KeyValue> {
        let range = KeyRange::between(key.clone(), range_end.clone());
        self.data
            .values()
            .filter(|kv| range.contains(&kv.key))
            .cloned()
            .collect()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.fail_with {
            Some(status) => Err(KvError::Remote(status.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KvService for MemoryKv {
    async fn put(&mut self, request: PutRequest) -> Result<PutResponse> {
        self.calls.push(Call::Put(request.clone()));
        self.check_failure()?;

        let previous = self.insert(request.key, request.value);
        Ok(PutResponse {
            header: self.header(),
            prev_kv: if request.prev_kv { previous } else { None },
        })
    }

    async fn range(&mut self, request: RangeRequest) -> Result<RangeResponse> {
        self.calls.push(Call::Range(request.clone()));
        self.check_failure()?;

        let mut kvs = self.matching(&request.key, &request.range_end);
        let count = kvs.len() as i64;
        let more = request.limit > 0 && count > request.limit;
        if request.limit > 0 {
            kvs.truncate(request.limit as usize);
        }
        if request.keys_only {
            for kv in &mut kvs {
                kv.value = Bytes::new();
            }
        }
        if request.count_only {
            kvs.clear();
        }

        Ok(RangeResponse {
            header: self.header(),
            kvs,
            more,
            count,
        })
    }

    async fn delete_range(&mut self, request: DeleteRangeRequest) -> Result<DeleteRangeResponse> {
        self.calls.push(Call::DeleteRange(request.clone()));
        self.check_failure()?;

        let removed = self.matching(&request.key, &request.range_end);
        for kv in &removed {
            self.data.remove(&kv.key);
        }
        if !removed.is_empty() {
            self.revision += 1;
        }

        Ok(DeleteRangeResponse {
            header: self.header(),
            deleted: removed.len() as i64,
            prev_kvs: if request.prev_kv { removed } else { Vec::new() },
        })
    }
}
