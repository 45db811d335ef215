use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    leaseq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("pop"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn push_help_documents_ttl() {
    leaseq()
        .args(["push", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ttl"));
}
