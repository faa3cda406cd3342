// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use threadboard_app::{Sender, ThreadId, ThreadRecord};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const DOMAINS: [&str; 8] = [
    "company.com",
    "techcorp.com",
    "marketing.co",
    "vendor.com",
    "hr.company.com",
    "studio.io",
    "example.org",
    "partners.net",
];

const SUBJECT_TOPICS: [&str; 14] = [
    "Budget Review",
    "Sprint Planning",
    "Quarterly Report",
    "Vendor Contract",
    "Hiring Update",
    "Launch Checklist",
    "Security Audit",
    "Team Offsite",
    "Customer Escalation",
    "Design Feedback",
    "Roadmap Sync",
    "Invoice Reminder",
    "Onboarding Plan",
    "Incident Postmortem",
];
const SUBJECT_SUFFIXES: [&str; 6] = [
    "Action Items",
    "Follow-up",
    "Draft",
    "Final Version",
    "Questions",
    "Next Steps",
];

const ACTIVITY_LABELS: [&str; 14] = [
    "just now",
    "5 minutes ago",
    "an hour ago",
    "2 hours ago",
    "6 hours ago",
    "23 hours ago",
    "yesterday",
    "1 day ago",
    "3 days ago",
    "6 days ago",
    "1 week ago",
    "2 weeks ago",
    "a month ago",
    "sometime last year",
];

const WORDS: [&str; 30] = [
    "review",
    "budget",
    "schedule",
    "deadline",
    "proposal",
    "meeting",
    "update",
    "draft",
    "contract",
    "timeline",
    "team",
    "project",
    "report",
    "numbers",
    "approval",
    "feedback",
    "launch",
    "customer",
    "invoice",
    "payment",
    "agenda",
    "notes",
    "priority",
    "release",
    "summary",
    "quarter",
    "forecast",
    "roadmap",
    "estimate",
    "checklist",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for thread collections. The same seed always yields the
/// same sequence.
#[derive(Debug, Clone)]
pub struct ThreadFaker {
    rng: DeterministicRng,
    next_id: u64,
}

impl ThreadFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn thread(&mut self) -> ThreadRecord {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&DOMAINS);
        let id = self.next_id;
        self.next_id += 1;

        ThreadRecord {
            id: ThreadId::new(format!("gen-{id}")),
            sender: Sender {
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}@{domain}",
                    first.to_ascii_lowercase(),
                    last.to_ascii_lowercase()
                ),
                avatar: None,
            },
            subject: format!(
                "{} - {}",
                self.pick(&SUBJECT_TOPICS),
                self.pick(&SUBJECT_SUFFIXES)
            ),
            preview: self.sentence(8, 20),
            summary: self.sentence(6, 14),
            message_count: 1 + self.rng.int_n(12) as u32,
            last_activity: self.pick(&ACTIVITY_LABELS).to_owned(),
            is_unread: self.rng.bool(),
            is_important: self.rng.int_n(4) == 0,
            is_starred: self.rng.int_n(5) == 0,
        }
    }

    pub fn threads(&mut self, count: usize) -> Vec<ThreadRecord> {
        (0..count).map(|_| self.thread()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let span = max_words.saturating_sub(min_words) + 1;
        let count = min_words + self.rng.int_n(span);
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&WORDS).to_owned());
        }
        let mut sentence = parts.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

/// Writes `threads` as a JSON array into a fresh temp dir. Keep the returned
/// `TempDir` alive for as long as the path is used.
pub fn temp_threads_file(threads: &[ThreadRecord]) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("threads.json");
    let raw = serde_json::to_string_pretty(threads).context("encode threads")?;
    std::fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn activity_labels() -> &'static [&'static str] {
    &ACTIVITY_LABELS
}

#[cfg(test)]
mod tests {
    use super::{ThreadFaker, temp_threads_file};
    use anyhow::Result;
    use threadboard_app::ThreadRecord;

    #[test]
    fn new_deterministic_seed() {
        let mut a = ThreadFaker::new(42);
        let mut b = ThreadFaker::new(42);
        assert_eq!(a.threads(10), b.threads(10));
    }

    #[test]
    fn zero_seed_is_normalized() {
        let mut zero = ThreadFaker::new(0);
        let mut one = ThreadFaker::new(1);
        assert_eq!(zero.thread(), one.thread());
    }

    #[test]
    fn thread_fields_are_populated() {
        let mut faker = ThreadFaker::new(7);
        for thread in faker.threads(50) {
            assert!(thread.id.as_str().starts_with("gen-"));
            assert!(thread.sender.name.contains(' '));
            assert!(thread.sender.email.contains('@'));
            assert!(thread.subject.contains(" - "));
            assert!(thread.preview.ends_with('.'));
            assert!(thread.message_count >= 1);
            assert!(!thread.last_activity.is_empty());
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut faker = ThreadFaker::new(3);
        let ids = faker
            .threads(3)
            .into_iter()
            .map(|thread| thread.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["gen-1", "gen-2", "gen-3"]);
    }

    #[test]
    fn variety_across_seeds() {
        let first = ThreadFaker::new(1).threads(20);
        let second = ThreadFaker::new(2).threads(20);
        assert_ne!(first, second);
    }

    #[test]
    fn temp_threads_file_round_trips_through_json() -> Result<()> {
        let threads = ThreadFaker::new(9).threads(4);
        let (_dir, path) = temp_threads_file(&threads)?;
        let raw = std::fs::read_to_string(&path)?;
        let decoded: Vec<ThreadRecord> = serde_json::from_str(&raw)?;
        assert_eq!(decoded, threads);
        assert!(raw.contains("\"lastActivity\""));
        Ok(())
    }
}
