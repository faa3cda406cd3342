// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::SourceRuntime;
use std::env;
use std::path::PathBuf;
use threadboard_app::{Dashboard, DashboardState, FilterSelector};
use threadboard_tui::{AppRuntime, TuiOptions};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `threadboard --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    match config
        .log_dir()
        .and_then(|dir| logging::init(&dir, config.log_level()))
    {
        Ok(path) => tracing::debug!(path = %path.display(), "log file ready"),
        Err(error) => eprintln!("warning: logging disabled: {error:#}"),
    }

    let source = runtime::build_source(&config).with_context(|| {
        format!(
            "invalid [source] config in {}; fix kind/path/url/timeout values",
            options.config_path.display()
        )
    })?;
    let refresh_delay = config.refresh_delay()?;
    if options.check_only {
        return Ok(());
    }

    let filter = options.filter.unwrap_or_else(|| config.default_filter());
    let mut runtime = SourceRuntime::new(source);
    tracing::info!(
        source = %runtime.source_name(),
        filter = filter.as_str(),
        "starting threadboard"
    );

    if options.list {
        let dashboard = Dashboard::new(runtime.load_threads()?);
        print!(
            "{}",
            runtime::listing_text(
                &dashboard,
                options.query.as_deref().unwrap_or(""),
                filter
            )
        );
        return Ok(());
    }

    let mut state = DashboardState::with_filter(filter);
    if let Some(query) = options.query {
        state.query = query;
    }
    threadboard_tui::run_app(&mut state, &mut runtime, TuiOptions { refresh_delay })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    list: bool,
    query: Option<String>,
    filter: Option<FilterSelector>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        list: false,
        query: None,
        filter: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                options.list = true;
            }
            "--query" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--query requires search text"))?;
                options.query = Some(value.as_ref().to_owned());
            }
            "--filter" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!(
                        "--filter requires a name; expected one of: {}",
                        FilterSelector::names()
                    )
                })?;
                let name = value.as_ref();
                let filter = FilterSelector::parse(name).ok_or_else(|| {
                    anyhow!(
                        "unknown filter {name:?}; expected one of: {}",
                        FilterSelector::names()
                    )
                })?;
                options.filter = Some(filter);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("threadboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and source settings");
    println!("  --list                   Print stats and matching threads, then exit");
    println!("  --query <text>           Start with a search query");
    println!(
        "  --filter <name>          Start with a filter ({})",
        FilterSelector::names()
    );
    println!("  --help                   Show this help");
}
