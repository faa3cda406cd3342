// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use threadboard_app::FilterSelector;

pub const APP_NAME: &str = "threadboard";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_SOURCE_TIMEOUT: &str = "5s";
const DEFAULT_REFRESH_DELAY: &str = "2s";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: Source::default(),
            ui: Ui::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Demo,
    File,
    Http,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::File => "file",
            Self::Http => "http",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Source {
    pub kind: Option<SourceKind>,
    pub path: Option<String>,
    pub url: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub default_filter: Option<String>,
    pub refresh_delay: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            default_filter: Some(FilterSelector::All.as_str().to_owned()),
            refresh_delay: Some(DEFAULT_REFRESH_DELAY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            dir: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("THREADBOARD_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set THREADBOARD_CONFIG_PATH to the config file"
            )
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [source], [ui], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        match self.source_kind() {
            SourceKind::Demo => {}
            SourceKind::File => {
                if self.source_path().is_none() {
                    bail!(
                        "source.kind = \"file\" in {} requires source.path",
                        path.display()
                    );
                }
            }
            SourceKind::Http => {
                let url = self.source_url().ok_or_else(|| {
                    anyhow!(
                        "source.kind = \"http\" in {} requires source.url",
                        path.display()
                    )
                })?;
                threadboard_feed::validate_feed_url(url)
                    .with_context(|| format!("invalid source.url in {}", path.display()))?;
            }
        }

        if let Some(timeout) = &self.source.timeout {
            require_positive("source.timeout", timeout, path)?;
        }
        if let Some(delay) = &self.ui.refresh_delay {
            require_positive("ui.refresh_delay", delay, path)?;
        }

        if let Some(name) = &self.ui.default_filter
            && FilterSelector::parse(name).is_none()
        {
            bail!(
                "ui.default_filter in {} is {:?}; expected one of: {}",
                path.display(),
                name,
                FilterSelector::names()
            );
        }

        if let Some(level) = &self.logging.level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "logging.level in {} is {:?}; expected one of: {}",
                path.display(),
                level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind.unwrap_or_default()
    }

    pub fn source_path(&self) -> Option<PathBuf> {
        self.source
            .path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn source_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.source
                .timeout
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE_TIMEOUT),
        )
    }

    pub fn default_filter(&self) -> FilterSelector {
        self.ui
            .default_filter
            .as_deref()
            .and_then(FilterSelector::parse)
            .unwrap_or(FilterSelector::All)
    }

    pub fn refresh_delay(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .refresh_delay
                .as_deref()
                .unwrap_or(DEFAULT_REFRESH_DELAY),
        )
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.logging.dir {
            return Ok(PathBuf::from(dir));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory for logs; set [logging].dir in the config")
        })?;
        Ok(data_root.join(APP_NAME).join("logs"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# threadboard config\n# Place this file at: {}\n\nversion = 1\n\n[source]\n# demo | file | http\nkind = \"demo\"\n# path = \"/absolute/path/to/threads.json\"\n# url = \"http://localhost:8080/threads\"\ntimeout = \"{}\"\n\n[ui]\n# {}\ndefault_filter = \"all\"\nrefresh_delay = \"{}\"\n\n[logging]\n# trace | debug | info | warn | error (RUST_LOG overrides)\nlevel = \"{}\"\n# Optional. Default is platform data dir (for example ~/.local/share/threadboard/logs)\n# dir = \"/absolute/path/to/logs\"\n",
            path.display(),
            DEFAULT_SOURCE_TIMEOUT,
            FilterSelector::names(),
            DEFAULT_REFRESH_DELAY,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn require_positive(key: &str, raw: &str, path: &Path) -> Result<()> {
    let parsed = parse_duration(raw).with_context(|| format!("{key} in {}", path.display()))?;
    if parsed <= Duration::ZERO {
        bail!("{key} in {} must be positive, got {raw}", path.display());
    }
    Ok(())
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, SourceKind, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;
    use threadboard_app::FilterSelector;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.source_kind(), SourceKind::Demo);
        assert_eq!(config.default_filter(), FilterSelector::All);
        assert_eq!(config.refresh_delay()?, Duration::from_secs(2));
        assert_eq!(config.source_timeout()?, Duration::from_secs(5));
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[source]\nkind = \"demo\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[source], [ui], and [logging]"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[source]\nkind = \"http\"\nurl = \"http://localhost:8080/threads\"\ntimeout = \"750ms\"\n[ui]\ndefault_filter = \"starred\"\nrefresh_delay = \"1s\"\n[logging]\nlevel = \"debug\"\ndir = \"/var/log/threadboard\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.source_kind(), SourceKind::Http);
        assert_eq!(config.source_url(), Some("http://localhost:8080/threads"));
        assert_eq!(config.source_timeout()?, Duration::from_millis(750));
        assert_eq!(config.default_filter(), FilterSelector::Starred);
        assert_eq!(config.refresh_delay()?, Duration::from_secs(1));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_dir()?, PathBuf::from("/var/log/threadboard"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 7\n")?;
        let error = Config::load(&path).expect_err("v7 config should fail");
        assert!(error.to_string().contains("unsupported config version 7"));
        Ok(())
    }

    #[test]
    fn unknown_source_kind_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\nkind = \"imap\"\n")?;
        let error = Config::load(&path).expect_err("unknown kind should fail");
        let message = format!("{error:#}");
        assert!(message.contains("decode config"), "unexpected message: {message}");
        assert!(message.contains("imap"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn file_source_requires_path() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\nkind = \"file\"\npath = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank path should fail");
        assert!(error.to_string().contains("requires source.path"));
        Ok(())
    }

    #[test]
    fn http_source_requires_http_url() -> Result<()> {
        let (_temp, missing) = write_config("version = 1\n[source]\nkind = \"http\"\n")?;
        let error = Config::load(&missing).expect_err("missing url should fail");
        assert!(error.to_string().contains("requires source.url"));

        let (_temp, ftp) = write_config(
            "version = 1\n[source]\nkind = \"http\"\nurl = \"ftp://mail.example/threads\"\n",
        )?;
        let error = Config::load(&ftp).expect_err("ftp url should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid source.url"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn unknown_default_filter_lists_valid_names() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ndefault_filter = \"spam\"\n")?;
        let error = Config::load(&path).expect_err("unknown filter should fail");
        let message = error.to_string();
        assert!(message.contains("ui.default_filter"));
        assert!(message.contains("all, unread, important, starred, today, week"));
        Ok(())
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[logging]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        assert!(error.to_string().contains("logging.level"));
        Ok(())
    }

    #[test]
    fn non_positive_durations_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nrefresh_delay = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero delay should fail");
        assert!(error.to_string().contains("must be positive"));

        let (_temp, path) = write_config("version = 1\n[source]\ntimeout = \"soon\"\n")?;
        let error = Config::load(&path).expect_err("invalid timeout should fail");
        let message = format!("{error:#}");
        assert!(message.contains("source.timeout"), "unexpected message: {message}");
        assert!(message.contains("invalid duration"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn durations_parse_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        assert!(parse_duration("oops").is_err());
        Ok(())
    }

    #[test]
    fn oversized_minutes_are_rejected_instead_of_overflowing() -> Result<()> {
        let error = parse_duration("307445734561825861m").expect_err("overflow should fail");
        assert!(error.to_string().contains("too large"));

        let (_temp, path) =
            write_config("version = 1\n[ui]\nrefresh_delay = \"307445734561825861m\"\n")?;
        let error = Config::load(&path).expect_err("oversized delay should fail");
        let message = format!("{error:#}");
        assert!(message.contains("ui.refresh_delay"), "unexpected message: {message}");
        assert!(message.contains("too large"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("THREADBOARD_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("THREADBOARD_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("THREADBOARD_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("threadboard/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_loads_cleanly() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[source]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[logging]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.source_kind(), SourceKind::Demo);
        Ok(())
    }
}
