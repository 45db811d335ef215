// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis store adapter
//!
//! Each conditional operation is a Lua script, which Redis runs without
//! interleaving other commands. The list pop is a plain RPOP.

use async_trait::async_trait;
use leaseq_core::store::{LeaseStore, StoreError, PENDING};
use leaseq_core::Token;
use redis::aio::MultiplexedConnection;
use redis::{Client, ErrorKind, RedisError, Script};
use std::sync::Arc;
use std::time::Duration;

// KEYS[1] = list, KEYS[2] = marker; ARGV[1] = pending value, ARGV[2] = ttl ms
const PUSH_SCRIPT: &str = r#"
if redis.call("EXISTS", KEYS[2]) == 0 then
    redis.call("LPUSH", KEYS[1], KEYS[2])
    redis.call("SET", KEYS[2], ARGV[1], "PX", ARGV[2])
    return 1
end
return 0
"#;

// KEYS[1] = marker; ARGV[1] = pending value, ARGV[2] = token, ARGV[3] = ttl ms
const CLAIM_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    redis.call("SET", KEYS[1], ARGV[2], "PX", ARGV[3])
    return 1
end
return 0
"#;

// KEYS[1] = marker; ARGV[1] = token, ARGV[2] = ttl ms
const EXTEND_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("PEXPIRE", KEYS[1], ARGV[2])
end
return 0
"#;

// KEYS[1] = marker; ARGV[1] = token
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
end
return 0
"#;

struct Scripts {
    push: Script,
    claim: Script,
    extend: Script,
    release: Script,
}

impl Scripts {
    fn new() -> Self {
        Self {
            push: Script::new(PUSH_SCRIPT),
            claim: Script::new(CLAIM_SCRIPT),
            extend: Script::new(EXTEND_SCRIPT),
            release: Script::new(RELEASE_SCRIPT),
        }
    }
}

/// Store backed by a single Redis instance
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    scripts: Arc<Scripts>,
}

impl RedisStore {
    /// Connect to the Redis server at `url` (e.g. `redis://127.0.0.1:6379`)
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(store_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(store_error)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            scripts: Arc::new(Scripts::new()),
        }
    }
}

#[async_trait]
impl LeaseStore for RedisStore {
    async fn push_if_absent(
        &self,
        list: &str,
        marker: &str,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let mut invocation = self.scripts.push.key(list);
        invocation.key(marker).arg(PENDING).arg(ttl_millis(ttl));
        let status: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(status == 1)
    }

    async fn pop_tail(&self, list: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let marker: Option<String> = redis::cmd("RPOP")
            .arg(list)
            .query_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(marker)
    }

    async fn claim_if_pending(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let mut invocation = self.scripts.claim.key(marker);
        invocation
            .arg(PENDING)
            .arg(token.as_str())
            .arg(ttl_millis(ttl));
        let status: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(status == 1)
    }

    async fn extend_if_owner(
        &self,
        marker: &str,
        token: &Token,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let mut invocation = self.scripts.extend.key(marker);
        invocation.arg(token.as_str()).arg(ttl_millis(ttl));
        let status: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(status == 1)
    }

    async fn delete_if_owner(&self, marker: &str, token: &Token) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let mut invocation = self.scripts.release.key(marker);
        invocation.arg(token.as_str());
        let status: i64 = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(store_error)?;
        Ok(status == 1)
    }
}

/// TTL in whole milliseconds, rounded up so the store never expires a key
/// before the client-side estimate
fn ttl_millis(ttl: Duration) -> u64 {
    let millis = ttl.as_nanos().div_ceil(1_000_000);
    u64::try_from(millis).unwrap_or(u64::MAX).max(1)
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreError::Connection(err.to_string())
    } else if err.kind() == ErrorKind::TypeError {
        StoreError::Reply(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}

#[cfg(test)]
#[path = "redis_tests.rs"]
mod tests;
