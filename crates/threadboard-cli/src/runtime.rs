// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::{Config, SourceKind};
use anyhow::{Context, Result, anyhow};
use std::fmt::Write as _;
use threadboard_app::{
    Dashboard, DemoSource, FilterSelector, PROCESSED_PLACEHOLDER_PERCENT, ThreadRecord,
    ThreadSource,
};
use threadboard_feed::{FileSource, HttpSource};

pub struct SourceRuntime {
    source: Box<dyn ThreadSource>,
}

impl SourceRuntime {
    pub fn new(source: Box<dyn ThreadSource>) -> Self {
        Self { source }
    }
}

impl threadboard_tui::AppRuntime for SourceRuntime {
    fn source_name(&self) -> String {
        self.source.name()
    }

    fn load_threads(&mut self) -> Result<Vec<ThreadRecord>> {
        let threads = self
            .source
            .fetch_threads()
            .with_context(|| format!("load threads from {}", self.source.name()))?;
        tracing::debug!(source = %self.source.name(), count = threads.len(), "threads fetched");
        Ok(threads)
    }
}

pub fn build_source(config: &Config) -> Result<Box<dyn ThreadSource>> {
    let source: Box<dyn ThreadSource> = match config.source_kind() {
        SourceKind::Demo => Box::new(DemoSource),
        SourceKind::File => {
            let path = config
                .source_path()
                .ok_or_else(|| anyhow!("source.kind = \"file\" requires source.path"))?;
            Box::new(FileSource::new(path))
        }
        SourceKind::Http => {
            let url = config
                .source_url()
                .ok_or_else(|| anyhow!("source.kind = \"http\" requires source.url"))?;
            Box::new(HttpSource::new(url, config.source_timeout()?)?)
        }
    };
    tracing::debug!(kind = config.source_kind().as_str(), source = %source.name(), "source configured");
    Ok(source)
}

/// Plain-text rendering of the dashboard for `--list`.
pub fn listing_text(dashboard: &Dashboard, query: &str, filter: FilterSelector) -> String {
    let stats = dashboard.stats();
    let visible = dashboard.visible(query, filter);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "threads: {} | unread: {} | important: {} | starred: {} | processed: {}% (placeholder)",
        stats.total, stats.unread, stats.important, stats.starred, PROCESSED_PLACEHOLDER_PERCENT
    );
    let _ = writeln!(
        out,
        "Email Threads ({})",
        Dashboard::listing_label(visible.len(), filter)
    );

    if visible.is_empty() {
        let _ = writeln!(out, "No email threads found");
        let _ = writeln!(out, "{}", Dashboard::empty_message(query));
        return out;
    }

    for record in visible {
        let _ = writeln!(
            out,
            "[{}] {} <{}> | {} | {} | {}",
            record.id,
            record.sender.name,
            record.sender.email,
            flag_badges(record),
            record.last_activity,
            record.message_count_label()
        );
        let _ = writeln!(out, "    {}", record.subject);
    }
    out
}

fn flag_badges(record: &ThreadRecord) -> String {
    let badges = [
        (record.is_unread, "New"),
        (record.is_important, "!"),
        (record.is_starred, "*"),
    ]
    .into_iter()
    .filter_map(|(set, badge)| set.then_some(badge))
    .collect::<Vec<_>>();
    if badges.is_empty() {
        "-".to_owned()
    } else {
        badges.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::{SourceRuntime, build_source, listing_text};
    use crate::config::Config;
    use anyhow::Result;
    use threadboard_app::{Dashboard, FilterSelector, ThreadSource, demo_threads};
    use threadboard_testkit::{ThreadFaker, temp_threads_file};
    use threadboard_tui::AppRuntime;

    fn load_config(content: &str) -> Result<(tempfile::TempDir, Config)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        let config = Config::load(&path)?;
        Ok((temp, config))
    }

    #[test]
    fn default_config_builds_demo_source() -> Result<()> {
        let source = build_source(&Config::default())?;
        let mut runtime = SourceRuntime::new(source);
        assert_eq!(runtime.load_threads()?, demo_threads());
        Ok(())
    }

    #[test]
    fn file_source_loads_generated_threads() -> Result<()> {
        let threads = ThreadFaker::new(12).threads(6);
        let (_dir, threads_path) = temp_threads_file(&threads)?;
        let (_temp, config) = load_config(&format!(
            "version = 1\n[source]\nkind = \"file\"\npath = {:?}\n",
            threads_path.display().to_string()
        ))?;

        let mut runtime = SourceRuntime::new(build_source(&config)?);
        assert!(runtime.source_name().contains("threads.json"));
        assert_eq!(runtime.load_threads()?, threads);
        Ok(())
    }

    #[test]
    fn missing_file_error_names_the_source() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let missing = temp.path().join("gone.json");
        let (_config_dir, config) = load_config(&format!(
            "version = 1\n[source]\nkind = \"file\"\npath = {:?}\n",
            missing.display().to_string()
        ))?;

        let mut runtime = SourceRuntime::new(build_source(&config)?);
        let error = runtime.load_threads().expect_err("missing file should fail");
        let message = format!("{error:#}");
        assert!(message.contains("load threads from"), "unexpected message: {message}");
        assert!(message.contains("gone.json"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn http_config_builds_http_source() -> Result<()> {
        let (_temp, config) = load_config(
            "version = 1\n[source]\nkind = \"http\"\nurl = \"http://127.0.0.1:9/threads\"\n",
        )?;
        let source = build_source(&config)?;
        assert!(source.name().starts_with("http "));
        Ok(())
    }

    #[test]
    fn listing_shows_stats_and_visible_threads() {
        let dashboard = Dashboard::new(demo_threads());
        let text = listing_text(&dashboard, "", FilterSelector::Important);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(
            lines[0],
            "threads: 5 | unread: 2 | important: 2 | starred: 1 | processed: 85% (placeholder)"
        );
        assert_eq!(lines[1], "Email Threads (2 important threads)");
        assert_eq!(
            lines[2],
            "[1] Sarah Johnson <sarah.johnson@company.com> | New ! | 2 hours ago | 5 messages"
        );
        assert_eq!(lines[3], "    Q4 Budget Review Meeting - Action Items");
        assert_eq!(
            lines[4],
            "[4] David Park <d.park@hr.company.com> | ! | 1 day ago | 1 message"
        );
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn listing_reports_empty_result() {
        let dashboard = Dashboard::new(demo_threads());
        let text = listing_text(&dashboard, "recommendations", FilterSelector::All);
        assert!(text.contains("Email Threads (0 threads)"));
        assert!(text.contains("No email threads found"));
        assert!(text.contains("Try adjusting your search terms or filters"));
    }

    #[test]
    fn listing_marks_threads_without_flags() {
        let dashboard = Dashboard::new(demo_threads());
        let text = listing_text(&dashboard, "lisa", FilterSelector::All);
        assert!(text.contains("[5] Lisa Thompson <lisa.thompson@vendor.com> | - | 2 days ago"));
    }
}
