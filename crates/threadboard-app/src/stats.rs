// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{FilterSelector, ThreadRecord};

/// Shown on the "Processed" card. Not derived from any record field.
pub const PROCESSED_PLACEHOLDER_PERCENT: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ThreadStats {
    pub total: usize,
    pub unread: usize,
    pub important: usize,
    pub starred: usize,
}

impl ThreadStats {
    /// Badge count for a selector. Recency selectors have no precomputed count.
    pub const fn count_for(&self, filter: FilterSelector) -> Option<usize> {
        match filter {
            FilterSelector::All => Some(self.total),
            FilterSelector::Unread => Some(self.unread),
            FilterSelector::Important => Some(self.important),
            FilterSelector::Starred => Some(self.starred),
            FilterSelector::Today | FilterSelector::Week => None,
        }
    }
}

pub fn compute_stats<'a, I>(records: I) -> ThreadStats
where
    I: IntoIterator<Item = &'a ThreadRecord>,
{
    records
        .into_iter()
        .fold(ThreadStats::default(), |mut stats, record| {
            stats.total += 1;
            stats.unread += usize::from(record.is_unread);
            stats.important += usize::from(record.is_important);
            stats.starred += usize::from(record.is_starred);
            stats
        })
}
