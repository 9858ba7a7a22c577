//! Dispatch Module
//!
//! Executes one operation against a [`KvService`] and renders the reply.
//!
//! ## Responsibilities
//! - Turn the operation into exactly one request
//! - Issue exactly one remote call (no retries, no caching)
//! - Hand the reply to the renderer
//!
//! Errors from the transport or the store propagate unchanged.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::key::{display_text, KeyRange};
use crate::network::{Connection, KvService};
use crate::protocol::{Operation, Outcome};
use crate::render::Renderer;

/// Runs operations over a service
pub struct Dispatcher<S> {
    service: S,
    renderer: Renderer,
}

impl<S: KvService> Dispatcher<S> {
    pub fn new(service: S, renderer: Renderer) -> Self {
        Self { service, renderer }
    }

    /// Send one operation and return the decoded reply
    pub async fn execute(&mut self, operation: &Operation) -> Result<Outcome> {
        match operation {
            Operation::Put(op) => {
                tracing::debug!("put {}", display_text(&op.key));
                let response = self.service.put(op.to_request()).await?;
                Ok(Outcome::Put(response))
            }
            Operation::Range(op) => {
                tracing::debug!("get {} (limit {})", describe(&op.range), op.limit);
                let response = self.service.range(op.to_request()).await?;
                if response.more {
                    tracing::debug!(
                        "{} of {} keys returned, more available",
                        response.kvs.len(),
                        response.count
                    );
                }
                Ok(Outcome::Range(response))
            }
            Operation::DeleteRange(op) => {
                tracing::debug!("del {}", describe(&op.range));
                let response = self.service.delete_range(op.to_request()).await?;
                Ok(Outcome::DeleteRange(response))
            }
        }
    }

    /// Execute and render to `out`
    pub async fn dispatch<W: Write>(&mut self, operation: &Operation, out: &mut W) -> Result<Outcome> {
        let outcome = self.execute(operation).await?;
        self.renderer.render(operation, &outcome, out)?;
        Ok(outcome)
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

/// Open a connection, run `operation`, and release the connection
///
/// The connection is dropped on every path out of this function,
/// including when the returned future is cancelled.
pub async fn run<W: Write>(config: &Config, operation: &Operation, out: &mut W) -> Result<Outcome> {
    let connection = Connection::open(config).await?;
    tracing::debug!("{} via {}", operation.kind().as_str(), connection.endpoint());
    let mut dispatcher = Dispatcher::new(connection, Renderer::new(config.output));
    dispatcher.dispatch(operation, out).await
}

fn describe(range: &KeyRange) -> String {
    match &range.range_end {
        Some(end) if !end.is_empty() => {
            format!("[{}, {})", display_text(&range.key), display_text(end))
        }
        _ => format!("key {}", display_text(&range.key)),
    }
}
