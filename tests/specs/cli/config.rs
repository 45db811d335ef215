use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn out_of_range_drift_factor_is_rejected() {
    leaseq()
        .args(["--drift-factor", "1.5", "demo", "--memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("drift factor"));
}

#[test]
fn broken_config_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue.toml");
    std::fs::write(&path, "name = [").unwrap();

    leaseq()
        .arg("--config")
        .arg(&path)
        .args(["demo", "--memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue.toml"));
}

#[test]
fn config_file_drives_demo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue.toml");
    std::fs::write(&path, "name = \"specs\"\nlease_ttl = \"2s\"\n").unwrap();

    leaseq()
        .arg("--config")
        .arg(&path)
        .args([
            "demo",
            "--memory",
            "--items",
            "3",
            "--consumers",
            "1",
            "--rounds",
            "1",
            "--hold",
            "5ms",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("released: 1"));
}
