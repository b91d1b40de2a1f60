// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
///
/// The fixed width keeps lexicographic order equal to chronological order,
/// which the store relies on when sorting by `date`.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in the stored record format.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Parse a stored RFC3339 timestamp back into UTC.
pub fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Calendar date of a stored timestamp as seen from a fixed UTC offset.
pub fn local_date(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    parse_rfc3339(raw).map(|dt| dt.with_timezone(&offset).date_naive())
}
