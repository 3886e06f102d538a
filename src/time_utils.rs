// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and timestamp-based ids.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::ShapeId;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Issues `shape-<millis>` ids from the wall clock.
///
/// Ids are strictly increasing: a burst inside one millisecond, or a clock
/// stepping backwards, borrows the next free millisecond instead.
#[derive(Debug, Default)]
pub struct ShapeIdGenerator {
    last_millis: i64,
}

impl ShapeIdGenerator {
    pub fn next_id(&mut self) -> ShapeId {
        self.next_at(Utc::now())
    }

    pub(crate) fn next_at(&mut self, now: DateTime<Utc>) -> ShapeId {
        let millis = now.timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;
        ShapeId::new(format!("shape-{}", millis))
    }
}
