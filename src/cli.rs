//! Command-line surface
//!
//! Argument parsing lives here so the text-to-bytes decisions are made
//! once, before anything reaches the dispatcher.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::key::{to_bytes, to_bytes_opt, KeyRange};
use crate::protocol::{DeleteOp, Operation, OperationKind, PutOp, RangeOp, SortOrder, SortTarget};
use crate::render::OutputFormat;

/// kvctl
#[derive(Parser, Debug)]
#[command(name = "kvctl")]
#[command(about = "Command-line client for the etcd v3 KV API")]
#[command(version)]
pub struct Args {
    /// Server endpoint (host:port)
    #[arg(long, global = true, default_value = "http://127.0.0.1:2379")]
    pub endpoints: String,

    /// Connect timeout in milliseconds (0 = none)
    #[arg(long, global = true, default_value_t = 2000)]
    pub dial_timeout: u64,

    /// Per-request timeout in milliseconds (0 = none)
    #[arg(long, global = true, default_value_t = 5000)]
    pub command_timeout: u64,

    /// Output format
    #[arg(short = 'w', long, global = true, value_enum, default_value_t = OutputFormat::Simple)]
    pub write_out: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gets the key or a range of keys
    Get {
        /// Maximum number of results (0 = unbounded)
        #[arg(long, default_value_t = 0)]
        limit: u64,

        /// Get keys with matching prefix
        #[arg(long)]
        prefix: bool,

        /// Revision to read at (0 = latest)
        #[arg(long, default_value_t = 0)]
        rev: i64,

        /// Order of results
        #[arg(long, value_enum, default_value_t = SortOrderArg::None)]
        sort_order: SortOrderArg,

        /// Field to sort by
        #[arg(long, value_enum, default_value_t = SortTargetArg::Key)]
        sort_by: SortTargetArg,

        /// Get only the keys
        #[arg(long)]
        keys_only: bool,

        /// Get only the count
        #[arg(long)]
        count_only: bool,

        /// Linearizable (l) or serializable (s) read
        #[arg(long, value_enum, default_value_t = Consistency::Linearizable)]
        consistency: Consistency,

        key: String,

        /// Exclusive end of the range
        range_end: Option<String>,
    },

    /// Puts the given key into the store
    Put {
        /// Lease ID to attach to the key (0 = none)
        #[arg(long, default_value_t = 0)]
        lease: i64,

        /// Return the previous key-value pair
        #[arg(long)]
        prev_kv: bool,

        key: String,

        value: String,
    },

    /// Removes the specified key or range of keys [key, range_end)
    Del {
        /// Delete keys with matching prefix
        #[arg(long)]
        prefix: bool,

        /// Return the deleted key-value pairs
        #[arg(long)]
        prev_kv: bool,

        key: String,

        /// Exclusive end of the range
        range_end: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    #[value(name = "NONE", alias = "none")]
    None,
    #[value(name = "ASCEND", alias = "ascend")]
    Ascend,
    #[value(name = "DESCEND", alias = "descend")]
    Descend,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::None => SortOrder::None,
            SortOrderArg::Ascend => SortOrder::Ascend,
            SortOrderArg::Descend => SortOrder::Descend,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortTargetArg {
    #[value(name = "KEY", alias = "key")]
    Key,
    #[value(name = "VERSION", alias = "version")]
    Version,
    #[value(name = "CREATE", alias = "create")]
    Create,
    #[value(name = "MODIFY", alias = "modify")]
    Modify,
    #[value(name = "VALUE", alias = "value")]
    Value,
}

impl From<SortTargetArg> for SortTarget {
    fn from(arg: SortTargetArg) -> Self {
        match arg {
            SortTargetArg::Key => SortTarget::Key,
            SortTargetArg::Version => SortTarget::Version,
            SortTargetArg::Create => SortTarget::Create,
            SortTargetArg::Modify => SortTarget::Mod,
            SortTargetArg::Value => SortTarget::Value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Consistency {
    #[value(name = "l")]
    Linearizable,
    #[value(name = "s")]
    Serializable,
}

impl Args {
    /// Connection and output settings from the global flags
    pub fn config(&self) -> Config {
        Config::builder()
            .endpoint(&self.endpoints)
            .dial_timeout_ms(self.dial_timeout)
            .command_timeout_ms(self.command_timeout)
            .output(self.write_out)
            .build()
    }

    /// The single operation this invocation asks for
    pub fn operation(&self) -> Result<Operation> {
        self.command.to_operation()
    }
}

impl Commands {
    pub fn kind(&self) -> OperationKind {
        match self {
            Commands::Get { .. } => OperationKind::Get,
            Commands::Put { .. } => OperationKind::Put,
            Commands::Del { .. } => OperationKind::Delete,
        }
    }

    pub fn to_operation(&self) -> Result<Operation> {
        let operation: Operation = match self {
            Commands::Get {
                limit,
                prefix,
                rev,
                sort_order,
                sort_by,
                keys_only,
                count_only,
                consistency,
                key,
                range_end,
            } => {
                if *rev < 0 {
                    return Err(KvError::InvalidArgument(format!(
                        "revision must not be negative, got {}",
                        rev
                    )));
                }
                RangeOp::new(key_range(key, range_end.as_deref(), *prefix))
                    .limit(*limit)
                    .revision(*rev)
                    .sort((*sort_order).into(), (*sort_by).into())
                    .serializable(*consistency == Consistency::Serializable)
                    .keys_only(*keys_only)
                    .count_only(*count_only)
                    .into()
            }
            Commands::Put {
                lease,
                prev_kv,
                key,
                value,
            } => PutOp::new(to_bytes(key.as_str()), to_bytes(value.as_str()))
                .lease(*lease)
                .prev_kv(*prev_kv)
                .into(),
            Commands::Del {
                prefix,
                prev_kv,
                key,
                range_end,
            } => DeleteOp::new(key_range(key, range_end.as_deref(), *prefix))
                .prev_kv(*prev_kv)
                .into(),
        };
        Ok(operation)
    }
}

/// Map clap's unrecognized-subcommand error onto an unknown operation
///
/// Returns `None` for every other parse error.
pub fn unknown_operation(err: &clap::Error) -> Option<KvError> {
    if err.kind() != ErrorKind::InvalidSubcommand {
        return None;
    }
    match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(name)) => name.parse::<OperationKind>().err(),
        _ => None,
    }
}

/// `--prefix` wins over a literal range end
fn key_range(key: &str, range_end: Option<&str>, prefix: bool) -> KeyRange {
    let key = to_bytes(key);
    if prefix {
        if let Some(end) = range_end {
            tracing::warn!("Ignoring range end {:?} because --prefix is set", end);
        }
        KeyRange::prefix(key)
    } else {
        KeyRange {
            key,
            range_end: to_bytes_opt(range_end),
        }
    }
}
