// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store key layout for one named queue

const SUFFIX: &str = "leaseq";
const ITEM_SEGMENT: &str = ":item:";

/// Namespaced keys for a queue
///
/// Every key starts with the queue name, so independent queues can share
/// one store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueKeys {
    list: String,
    marker_prefix: String,
}

impl QueueKeys {
    pub fn new(name: &str) -> Self {
        let list = format!("{}:{}", name, SUFFIX);
        let marker_prefix = format!("{}{}", list, ITEM_SEGMENT);
        Self {
            list,
            marker_prefix,
        }
    }

    /// Key of the FIFO list of pending markers
    pub fn list(&self) -> &str {
        &self.list
    }

    /// Marker key for an item
    pub fn marker(&self, item: &str) -> String {
        format!("{}{}", self.marker_prefix, item)
    }

    /// Recover the item from a marker key, if it belongs to this queue
    pub fn item_of<'a>(&self, marker: &'a str) -> Option<&'a str> {
        marker.strip_prefix(self.marker_prefix.as_str())
    }
}
