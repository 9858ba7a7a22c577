//! Dispatch Tests
//!
//! These tests verify:
//! - Each operation issues exactly one call
//! - Exact-key versus range versus prefix requests
//! - Limits, the more flag and counts
//! - Remote failures pass through untouched

mod common;

use common::{Call, MemoryKv};
use kvctl::protocol::{DeleteOp, Operation, Outcome, PutOp, RangeOp};
use kvctl::render::{OutputFormat, Renderer};
use kvctl::{Dispatcher, KeyRange, KvError};

// =============================================================================
// Helper Functions
// =============================================================================

fn dispatcher(kv: MemoryKv) -> Dispatcher<MemoryKv> {
    Dispatcher::new(kv, Renderer::new(OutputFormat::Simple))
}

async fn dispatch(dispatcher: &mut Dispatcher<MemoryKv>, operation: Operation) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = dispatcher.dispatch(&operation, &mut out).await.unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

fn fruit() -> MemoryKv {
    MemoryKv::with_pairs(&[
        ("apple", "red"),
        ("apply", "verb"),
        ("apricot", "orange"),
        ("banana", "yellow"),
    ])
}

// =============================================================================
// Put
// =============================================================================

#[tokio::test]
async fn test_put_reports_ok() {
    let mut d = dispatcher(MemoryKv::new());

    let (outcome, printed) = dispatch(&mut d, PutOp::new("k", "v").into()).await;

    assert!(matches!(outcome, Outcome::Put(_)));
    assert_eq!(printed, "OK\n");

    let kv = d.into_inner();
    assert_eq!(kv.calls.len(), 1);
    assert_eq!(kv.keys(), vec![bytes::Bytes::from_static(b"k")]);
}

#[tokio::test]
async fn test_put_prev_kv_returns_overwritten_value() {
    let mut d = dispatcher(MemoryKv::with_pairs(&[("k", "old")]));

    let (outcome, printed) = dispatch(&mut d, PutOp::new("k", "new").prev_kv(true).into()).await;

    assert_eq!(outcome.pairs().len(), 1);
    assert_eq!(printed, "OK\nk\nold\n");
}

// =============================================================================
// Range
// =============================================================================

#[tokio::test]
async fn test_get_without_range_end_is_exact_lookup() {
    let mut d = dispatcher(fruit());

    let op = RangeOp::new(KeyRange::single("apple"));
    let (_, printed) = dispatch(&mut d, op.into()).await;

    assert_eq!(printed, "apple\nred\n");

    let kv = d.into_inner();
    match &kv.calls[..] {
        [Call::Range(request)] => {
            assert_eq!(&request.key[..], b"apple");
            assert!(request.range_end.is_empty());
            assert_eq!(request.limit, 0);
        }
        calls => panic!("Expected one range call, got {:?}", calls),
    }
}

#[tokio::test]
async fn test_exact_lookup_does_not_match_longer_keys() {
    let mut d = dispatcher(fruit());

    let (outcome, printed) = dispatch(&mut d, RangeOp::new(KeyRange::single("app")).into()).await;

    assert!(outcome.pairs().is_empty());
    assert_eq!(printed, "");
}

#[tokio::test]
async fn test_prefix_get_returns_only_prefixed_keys() {
    let mut d = dispatcher(fruit());

    let (outcome, printed) = dispatch(&mut d, RangeOp::new(KeyRange::prefix("app")).into()).await;

    let keys: Vec<&[u8]> = outcome.pairs().iter().map(|kv| &kv.key[..]).collect();
    assert_eq!(keys, vec![&b"apple"[..], &b"apply"[..]]);
    assert_eq!(printed, "apple\nred\napply\nverb\n");

    let kv = d.into_inner();
    match &kv.calls[..] {
        [Call::Range(request)] => assert_eq!(&request.range_end[..], b"apq"),
        calls => panic!("Expected one range call, got {:?}", calls),
    }
}

#[tokio::test]
async fn test_literal_range() {
    let mut d = dispatcher(fruit());

    let op = RangeOp::new(KeyRange::between("apr", "b"));
    let (outcome, _) = dispatch(&mut d, op.into()).await;

    assert_eq!(outcome.pairs().len(), 1);
    assert_eq!(&outcome.pairs()[0].key[..], b"apricot");
}

#[tokio::test]
async fn test_limit_sets_more_flag() {
    let mut d = dispatcher(fruit());

    let op = RangeOp::new(KeyRange::prefix("ap")).limit(2);
    let (outcome, _) = dispatch(&mut d, op.into()).await;

    match outcome {
        Outcome::Range(response) => {
            assert_eq!(response.kvs.len(), 2);
            assert_eq!(response.count, 3);
            assert!(response.more);
        }
        other => panic!("Expected range outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_count_only() {
    let mut d = dispatcher(fruit());

    let op = RangeOp::new(KeyRange::prefix("a")).count_only(true);
    let (_, printed) = dispatch(&mut d, op.into()).await;

    assert_eq!(printed, "3\n");
}

// =============================================================================
// DeleteRange
// =============================================================================

#[tokio::test]
async fn test_delete_prefix_reports_count() {
    let mut d = dispatcher(fruit());

    let (outcome, printed) = dispatch(&mut d, DeleteOp::new(KeyRange::prefix("ap")).into()).await;

    match outcome {
        Outcome::DeleteRange(response) => assert_eq!(response.deleted, 3),
        other => panic!("Expected delete outcome, got {:?}", other),
    }
    assert_eq!(printed, "3\n");
    assert_eq!(d.into_inner().keys(), vec![bytes::Bytes::from_static(b"banana")]);
}

#[tokio::test]
async fn test_delete_missing_key_reports_zero() {
    let mut d = dispatcher(fruit());

    let (_, printed) = dispatch(&mut d, DeleteOp::new(KeyRange::single("cherry")).into()).await;

    assert_eq!(printed, "0\n");
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_remote_error_passes_through() {
    let mut kv = fruit();
    kv.fail_with = Some(tonic::Status::invalid_argument("etcdserver: key is not provided"));
    let mut d = dispatcher(kv);

    let mut out = Vec::new();
    let op = Operation::from(RangeOp::new(KeyRange::single("")));
    let err = d.dispatch(&op, &mut out).await.unwrap_err();

    match err {
        KvError::Remote(status) => {
            assert_eq!(status.code(), tonic::Code::InvalidArgument);
            assert_eq!(status.message(), "etcdserver: key is not provided");
        }
        other => panic!("Expected remote error, got {:?}", other),
    }
    assert!(out.is_empty());
    assert_eq!(d.into_inner().calls.len(), 1);
}
