// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::MarkerState;
use crate::testing::test_queue;

const PUSH_TTL: Duration = Duration::from_secs(10);

#[tokio::test]
async fn extend_renews_store_ttl_and_moves_deadline() {
    let (queue, store, clock) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    store.set_latency(Duration::from_millis(20));

    let start = clock.now();
    let mut lease = queue.pop().await.unwrap().unwrap();
    assert_eq!(lease.until(), start + Duration::from_millis(950));

    // issue the extend at t=0.5s
    clock.advance(Duration::from_millis(460));
    let extend_at = clock.now();
    assert_eq!(extend_at, start + Duration::from_millis(500));

    assert!(lease.extend().await.unwrap());
    assert_eq!(lease.until(), extend_at + Duration::from_millis(950));
    assert_eq!(store.inner.ttl(lease.key()), Some(Duration::from_secs(1)));
}

#[tokio::test]
async fn extend_after_expiry_reports_lost_lease() {
    let (queue, _, clock) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let mut lease = queue.pop().await.unwrap().unwrap();
    let until = lease.until();

    clock.advance(Duration::from_secs(1));

    assert!(!lease.extend().await.unwrap());
    assert_eq!(lease.until(), until);
    assert!(!lease.is_valid());
}

#[tokio::test]
async fn release_after_natural_expiry_returns_false() {
    let (queue, _, clock) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let lease = queue.pop().await.unwrap().unwrap();

    clock.advance(Duration::from_millis(1001));

    assert!(!lease.release().await.unwrap());
}

#[tokio::test]
async fn stale_lease_is_fenced_out_by_new_owner() {
    let (queue, store, clock) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let mut stale = queue.pop().await.unwrap().unwrap();

    clock.advance(Duration::from_secs(2));
    queue.push("x", PUSH_TTL).await.unwrap();
    let current = queue.pop().await.unwrap().unwrap();

    assert!(!stale.extend().await.unwrap());
    assert!(!stale.release().await.unwrap());
    assert_eq!(
        store.inner.marker(current.key()),
        MarkerState::Claimed(current.token().clone())
    );
    assert!(current.release().await.unwrap());
}

#[tokio::test]
async fn release_is_not_repeatable() {
    let (queue, _, _) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let lease = queue.pop().await.unwrap().unwrap();

    assert!(lease.release().await.unwrap());
    assert!(!lease.release().await.unwrap());
}

#[tokio::test]
async fn slow_extend_reports_exhausted_deadline() {
    let (queue, store, _) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let mut lease = queue.pop().await.unwrap().unwrap();
    let until = lease.until();

    store.set_latency(Duration::from_millis(960));
    let err = lease.extend().await.unwrap_err();

    assert!(matches!(
        err,
        QueueError::DeadlineExhausted { phase: LeasePhase::Extend, .. }
    ));
    assert_eq!(lease.until(), until);
    // the store accepted the renewal even though the client cannot trust it
    assert_eq!(
        store.inner.marker(lease.key()),
        MarkerState::Claimed(lease.token().clone())
    );
}

#[tokio::test]
async fn validity_tracks_local_clock() {
    let (queue, _, clock) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let lease = queue.pop().await.unwrap().unwrap();

    assert!(lease.is_valid());
    assert_eq!(lease.remaining(), Duration::from_millis(950));

    clock.advance(Duration::from_millis(949));
    assert!(lease.is_valid());

    clock.advance(Duration::from_millis(1));
    assert!(!lease.is_valid());
    assert_eq!(lease.remaining(), Duration::ZERO);
}

#[tokio::test]
async fn debug_output_names_item() {
    let (queue, _, _) = test_queue();
    queue.push("x", PUSH_TTL).await.unwrap();
    let lease = queue.pop().await.unwrap().unwrap();

    let rendered = format!("{:?}", lease);
    assert!(rendered.contains("item: \"x\""));
    assert!(rendered.contains("lease-1"));
}
