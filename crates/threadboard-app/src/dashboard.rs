// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::filter::include;
use crate::stats::{ThreadStats, compute_stats};
use crate::{FilterSelector, ThreadRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dashboard {
    threads: Vec<ThreadRecord>,
}

impl Dashboard {
    pub fn new(threads: Vec<ThreadRecord>) -> Self {
        Self { threads }
    }

    pub fn threads(&self) -> &[ThreadRecord] {
        &self.threads
    }

    pub fn replace_threads(&mut self, threads: Vec<ThreadRecord>) {
        self.threads = threads;
    }

    /// Records passing the predicate, in collection order.
    pub fn visible(&self, query: &str, filter: FilterSelector) -> Vec<&ThreadRecord> {
        self.threads
            .iter()
            .filter(|record| include(query, filter, record))
            .collect()
    }

    /// Always computed over the full collection, not the visible subset.
    pub fn stats(&self) -> ThreadStats {
        compute_stats(&self.threads)
    }

    pub fn listing_label(visible_count: usize, filter: FilterSelector) -> String {
        match filter {
            FilterSelector::All => format!("{visible_count} threads"),
            other => format!("{visible_count} {} threads", other.as_str()),
        }
    }

    pub fn empty_message(query: &str) -> &'static str {
        if query.is_empty() {
            "Your email threads will appear here once connected"
        } else {
            "Try adjusting your search terms or filters"
        }
    }
}
