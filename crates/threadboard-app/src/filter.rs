// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Duration;

use crate::{FilterSelector, ThreadRecord};

const TODAY_WINDOW: Duration = Duration::DAY;
const WEEK_WINDOW: Duration = Duration::WEEK;

/// Inclusion decision for one record: both the search and the selector must
/// match.
pub fn include(query: &str, filter: FilterSelector, record: &ThreadRecord) -> bool {
    search_matches(query, record) && filter_matches(filter, record)
}

/// String-selector entry point. Unknown selector names match nothing.
pub fn include_named(query: &str, selector: &str, record: &ThreadRecord) -> bool {
    FilterSelector::parse(selector).is_some_and(|filter| include(query, filter, record))
}

/// Case-insensitive substring match over sender name, subject and preview.
/// The summary and sender email are not searched.
pub fn search_matches(query: &str, record: &ThreadRecord) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        record.sender.name.as_str(),
        record.subject.as_str(),
        record.preview.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_matches(filter: FilterSelector, record: &ThreadRecord) -> bool {
    match filter {
        FilterSelector::All => true,
        FilterSelector::Unread => record.is_unread,
        FilterSelector::Important => record.is_important,
        FilterSelector::Starred => record.is_starred,
        FilterSelector::Today => active_within(record, TODAY_WINDOW),
        FilterSelector::Week => active_within(record, WEEK_WINDOW),
    }
}

fn active_within(record: &ThreadRecord, window: Duration) -> bool {
    activity_age(&record.last_activity).is_some_and(|age| age < window)
}

/// Parses a relative activity label such as "2 hours ago" or "yesterday".
/// Months count as 30 days and years as 365.
pub fn activity_age(label: &str) -> Option<Duration> {
    let normalized = label.trim().to_lowercase();
    match normalized.as_str() {
        "just now" | "now" => return Some(Duration::ZERO),
        "yesterday" => return Some(Duration::DAY),
        _ => {}
    }

    let mut words = normalized.split_whitespace();
    let amount: u32 = match words.next()? {
        "a" | "an" => 1,
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse().ok()?
        }
        _ => return None,
    };
    let unit = words.next()?;
    if words.next()? != "ago" || words.next().is_some() {
        return None;
    }

    let per_unit = match unit.strip_suffix('s').unwrap_or(unit) {
        "second" => Duration::SECOND,
        "minute" => Duration::MINUTE,
        "hour" => Duration::HOUR,
        "day" => Duration::DAY,
        "week" => Duration::WEEK,
        "month" => Duration::days(30),
        "year" => Duration::days(365),
        _ => return None,
    };
    per_unit.checked_mul(i32::try_from(amount).ok()?)
}
