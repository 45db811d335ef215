use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn memory_demo_completes_all_rounds() {
    leaseq()
        .args([
            "demo",
            "--memory",
            "--items",
            "5",
            "--consumers",
            "2",
            "--rounds",
            "2",
            "--hold",
            "10ms",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("claimed: 4"))
        .stdout(predicate::str::contains("released: 4"))
        .stdout(predicate::str::contains("overlaps: 0"));
}

#[test]
fn short_lease_loses_extend() {
    leaseq()
        .args(["--lease-ttl", "50ms"])
        .args([
            "demo",
            "--memory",
            "--items",
            "1",
            "--consumers",
            "1",
            "--rounds",
            "1",
            "--hold",
            "150ms",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("lost extends: 1"));
}

#[test]
fn zero_push_ttl_is_rejected() {
    leaseq()
        .args(["demo", "--memory", "--push-ttl", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--push-ttl"));
}

#[test]
fn zero_items_is_rejected() {
    leaseq()
        .args(["demo", "--memory", "--items", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--items"));
}
