//! gRPC stub for the `etcdserverpb.KV` service
//!
//! Unary calls only; each method sends one request and awaits one reply.
//! Local transport failures surface as [`KvError::Transport`], statuses
//! sent by the server as [`KvError::Remote`].

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Request, Response};

use crate::error::{KvError, Result};

use crate::protocol::rpc::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest, RangeResponse,
};

const RANGE_PATH: &str = "/etcdserverpb.KV/Range";
const PUT_PATH: &str = "/etcdserverpb.KV/Put";
const DELETE_RANGE_PATH: &str = "/etcdserverpb.KV/DeleteRange";

/// Client half of the KV service
#[derive(Debug, Clone)]
pub struct KvClient {
    inner: tonic::client::Grpc<Channel>,
}

impl KvClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn range(&mut self, request: RangeRequest) -> Result<Response<RangeResponse>> {
        self.unary(Request::new(request), RANGE_PATH).await
    }

    pub async fn put(&mut self, request: PutRequest) -> Result<Response<PutResponse>> {
        self.unary(Request::new(request), PUT_PATH).await
    }

    pub async fn delete_range(
        &mut self,
        request: DeleteRangeRequest,
    ) -> Result<Response<DeleteRangeResponse>> {
        self.unary(Request::new(request), DELETE_RANGE_PATH).await
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Request<Req>,
        path: &'static str,
    ) -> Result<Response<Resp>>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner.ready().await?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        self.inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map_err(KvError::from_status)
    }
}
