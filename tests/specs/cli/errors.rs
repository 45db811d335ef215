use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn push_requires_items() {
    leaseq()
        .arg("push")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn unreachable_store_is_reported() {
    leaseq()
        .args(["--redis", UNREACHABLE_REDIS, "pop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to connect"));
}

#[test]
fn invalid_duration_is_rejected() {
    leaseq()
        .args(["--lease-ttl", "soon", "demo", "--memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--lease-ttl"));
}

#[test]
fn sub_millisecond_lease_ttl_is_rejected() {
    leaseq()
        .args(["--lease-ttl", "500us", "demo", "--memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1ms"));
}
