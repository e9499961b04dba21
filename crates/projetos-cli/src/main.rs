// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::{Config, StartView};
use projetos_app::AppState;
use projetos_tui::UiOptions;
use runtime::{ApiRuntime, DemoRuntime};
use std::env;
use std::path::PathBuf;
use url::Url;

const DEMO_SEED: u64 = 2026;
const DEMO_PROJECT_COUNT: usize = 24;

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
            "load config {}; run `projetos --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let base_url = Url::parse(config.base_url())
        .with_context(|| format!("parse api.base_url {:?}", config.base_url()))?;
    let client = projetos_api::Client::new(config.base_url(), config.identity(), config.timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout/remote_user values",
                options.config_path.display()
            )
        })?;
    if options.check_only {
        return Ok(());
    }

    let log_path = logging::default_log_path()?;
    logging::init(&log_path)?;

    let mut state = AppState {
        route: options.start_view.unwrap_or(config.start_view()).route(),
        ..AppState::default()
    };

    let mut ui_options = UiOptions::new(base_url);
    ui_options.home_limit = config.home_limit();

    tracing::info!(
        base_url = client.base_url(),
        demo = options.demo,
        route = %state.route.path(),
        "starting projetos"
    );

    if options.demo {
        let mut runtime =
            DemoRuntime::seeded(DEMO_SEED, DEMO_PROJECT_COUNT, config.identity());
        projetos_tui::run_app(&mut state, &mut runtime, ui_options)
    } else {
        let mut runtime = ApiRuntime::new(client);
        projetos_tui::run_app(&mut state, &mut runtime, ui_options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    start_view: Option<StartView>,
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
        demo: false,
        check_only: false,
        start_view: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--home" => {
                options.start_view = Some(StartView::Home);
            }
            "--history" => {
                options.start_view = Some(StartView::History);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("projetos");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with in-memory demo projects (no network)");
    println!("  --check                  Validate config and API client settings");
    println!("  --home                   Start on the home list");
    println!("  --history                Start on the history table");
    println!("  --help                   Show this help");
}
