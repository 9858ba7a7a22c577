//! Keys and key ranges
//!
//! Every key, value and range end crossing the library boundary is a
//! [`Key`]: an owned, binary-safe byte sequence. Text inputs are encoded
//! as UTF-8 once, at construction.
//!
//! ## Prefix ranges
//! ```text
//!   prefix      "app"          "a\xff"        "\xff\xff"
//!   range end   "apq"          "b"            "\xff\xff"  (unchanged)
//!               [app, apq)     [a\xff, b)     exact key only
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use bytes::Bytes;

use crate::error::Result;

/// Canonical byte-sequence key (also used for values and range ends)
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Bytes);

impl Key {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl Deref for Key {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(\"{}\")", self.0.escape_ascii())
    }
}

impl From<Bytes> for Key {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(bytes: &[u8; N]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Self(Bytes::from(text.into_bytes()))
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Self(Bytes::copy_from_slice(text.as_bytes()))
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<Key> for Bytes {
    fn from(key: Key) -> Self {
        key.0
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize text or binary input into a [`Key`]
///
/// Binary input passes through unchanged, text is UTF-8 encoded.
pub fn to_bytes<T: Into<Key>>(input: T) -> Key {
    input.into()
}

/// Like [`to_bytes`], but absence stays absence (no range end)
pub fn to_bytes_opt<T: Into<Key>>(input: Option<T>) -> Option<Key> {
    input.map(Into::into)
}

/// Decode bytes that are known to hold UTF-8 text
pub fn to_text(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

/// Printable form of arbitrary bytes
///
/// UTF-8 payloads are shown as-is; anything else is ASCII-escaped.
pub fn display_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.escape_ascii().to_string()),
    }
}

// =============================================================================
// Prefix boundary
// =============================================================================

/// Exclusive upper bound of all keys starting with `prefix`
///
/// Increments the right-most byte below 0xFF and drops everything after
/// it. An empty or all-0xFF prefix has no finite bound and is returned
/// unchanged.
pub fn prefix_range_end(prefix: &[u8]) -> Key {
    let mut end = prefix.to_vec();

    if let Some(pos) = end.iter().rposition(|&b| b < 0xff) {
        end[pos] += 1;
        end.truncate(pos + 1);
    }

    Key::from(end)
}

// =============================================================================
// Key ranges
// =============================================================================

/// A key plus an optional exclusive range end
///
/// No (or an empty) range end means the exact key only; otherwise the
/// range is the half-open interval `[key, range_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub key: Key,
    pub range_end: Option<Key>,
}

impl KeyRange {
    /// Exactly one key
    pub fn single(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            range_end: None,
        }
    }

    /// Every key in `[key, range_end)`
    pub fn between(key: impl Into<Key>, range_end: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            range_end: Some(range_end.into()),
        }
    }

    /// Every key starting with `prefix`
    pub fn prefix(prefix: impl Into<Key>) -> Self {
        let key = prefix.into();
        let range_end = prefix_range_end(&key);
        Self {
            key,
            range_end: Some(range_end),
        }
    }

    /// True when this addresses a single key rather than a scan
    pub fn is_single(&self) -> bool {
        self.range_end.as_ref().map_or(true, |end| end.is_empty())
    }

    /// Whether `candidate` falls inside this range
    pub fn contains(&self, candidate: &[u8]) -> bool {
        match &self.range_end {
            Some(end) if !end.is_empty() => {
                self.key.as_bytes() <= candidate && candidate < end.as_bytes()
            }
            _ => self.key.as_bytes() == candidate,
        }
    }

    /// Range end as sent on the wire (empty when absent)
    pub fn wire_range_end(&self) -> Bytes {
        self.range_end
            .clone()
            .map(Key::into_bytes)
            .unwrap_or_default()
    }
}
