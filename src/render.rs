//! Response rendering
//!
//! Turns an [`Outcome`] into output lines. Keys and values are never
//! assumed to be text: in simple output UTF-8 payloads print as-is and
//! anything else is ASCII-escaped; in JSON output every key and value is
//! standard base64.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::error::Result;
use crate::key::display_text;
use crate::protocol::rpc::{KeyValue, ResponseHeader};
use crate::protocol::{Operation, Outcome};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain lines: keys and values, counts, or OK
    #[default]
    Simple,

    /// One JSON document per reply, keys and values base64-encoded
    Json,
}

/// Writes outcomes in the configured format
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render the reply to `operation`
    pub fn render<W: Write>(&self, operation: &Operation, outcome: &Outcome, out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Simple => render_simple(operation, outcome, out)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &JsonOutcome::from(outcome))?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::Simple)
    }
}

// =============================================================================
// Simple
// =============================================================================

fn render_simple<W: Write>(operation: &Operation, outcome: &Outcome, out: &mut W) -> Result<()> {
    match (operation, outcome) {
        (Operation::Range(op), Outcome::Range(response)) => {
            if op.count_only {
                writeln!(out, "{}", response.count)?;
                return Ok(());
            }
            for kv in &response.kvs {
                writeln!(out, "{}", display_text(&kv.key))?;
                if !op.keys_only {
                    writeln!(out, "{}", display_text(&kv.value))?;
                }
            }
        }
        (_, Outcome::Put(response)) => {
            writeln!(out, "OK")?;
            if let Some(prev) = &response.prev_kv {
                write_pair(prev, out)?;
            }
        }
        (_, Outcome::DeleteRange(response)) => {
            writeln!(out, "{}", response.deleted)?;
            for kv in &response.prev_kvs {
                write_pair(kv, out)?;
            }
        }
        (_, Outcome::Range(response)) => {
            for kv in &response.kvs {
                write_pair(kv, out)?;
            }
        }
    }
    Ok(())
}

fn write_pair<W: Write>(kv: &KeyValue, out: &mut W) -> Result<()> {
    writeln!(out, "{}", display_text(&kv.key))?;
    writeln!(out, "{}", display_text(&kv.value))?;
    Ok(())
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonHeader {
    cluster_id: u64,
    member_id: u64,
    revision: i64,
    raft_term: u64,
}

impl From<&ResponseHeader> for JsonHeader {
    fn from(h: &ResponseHeader) -> Self {
        Self {
            cluster_id: h.cluster_id,
            member_id: h.member_id,
            revision: h.revision,
            raft_term: h.raft_term,
        }
    }
}

#[derive(Serialize)]
struct JsonKeyValue {
    key: String,
    value: String,
    create_revision: i64,
    mod_revision: i64,
    version: i64,
    #[serde(skip_serializing_if = "is_zero")]
    lease: i64,
}

impl From<&KeyValue> for JsonKeyValue {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: STANDARD.encode(&kv.key),
            value: STANDARD.encode(&kv.value),
            create_revision: kv.create_revision,
            mod_revision: kv.mod_revision,
            version: kv.version,
            lease: kv.lease,
        }
    }
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonOutcome {
    Put {
        header: Option<JsonHeader>,
        #[serde(skip_serializing_if = "Option::is_none")]
        prev_kv: Option<JsonKeyValue>,
    },
    Range {
        header: Option<JsonHeader>,
        kvs: Vec<JsonKeyValue>,
        more: bool,
        count: i64,
    },
    DeleteRange {
        header: Option<JsonHeader>,
        deleted: i64,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        prev_kvs: Vec<JsonKeyValue>,
    },
}

impl From<&Outcome> for JsonOutcome {
    fn from(outcome: &Outcome) -> Self {
        let header = outcome.header().map(JsonHeader::from);
        match outcome {
            Outcome::Put(r) => JsonOutcome::Put {
                header,
                prev_kv: r.prev_kv.as_ref().map(JsonKeyValue::from),
            },
            Outcome::Range(r) => JsonOutcome::Range {
                header,
                kvs: r.kvs.iter().map(JsonKeyValue::from).collect(),
                more: r.more,
                count: r.count,
            },
            Outcome::DeleteRange(r) => JsonOutcome::DeleteRange {
                header,
                deleted: r.deleted,
                prev_kvs: r.prev_kvs.iter().map(JsonKeyValue::from).collect(),
            },
        }
    }
}
