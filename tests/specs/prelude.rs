//! Shared helpers for CLI specs

use assert_cmd::Command;

/// Redis URL nothing listens on
pub const UNREACHABLE_REDIS: &str = "redis://127.0.0.1:1";

/// The leaseq binary with logging kept quiet
pub fn leaseq() -> Command {
    let mut cmd = Command::cargo_bin("leaseq").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}
