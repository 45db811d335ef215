// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store adapters backed by external services

mod redis;

pub use self::redis::RedisStore;
