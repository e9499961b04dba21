// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::APP_NAME;

const LOG_ENV: &str = "PROJETOS_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// The terminal owns stdout, so logs go to a file under the platform data dir.
pub fn default_log_path() -> Result<PathBuf> {
    let data_root = dirs::data_dir()
        .ok_or_else(|| anyhow!("cannot resolve data directory for the log file"))?;
    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join(format!("{APP_NAME}.log")))
}

pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let directive = filter_directive(env::var(LOG_ENV).ok(), env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

fn filter_directive(app_env: Option<String>, rust_log: Option<String>) -> String {
    [app_env, rust_log]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}
