// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use projetos_api::{DEFAULT_REMOTE_GROUPS, DEFAULT_REMOTE_USER, Identity};
use projetos_app::Route;
use projetos_tui::DEFAULT_HOME_LIMIT;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const APP_NAME: &str = "projetos";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: &str = "10s";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub remote_user: Option<String>,
    pub remote_groups: Option<String>,
    pub home_limit: Option<i64>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
            remote_user: Some(DEFAULT_REMOTE_USER.to_owned()),
            remote_groups: Some(DEFAULT_REMOTE_GROUPS.to_owned()),
            home_limit: Some(i64::from(DEFAULT_HOME_LIMIT)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_view: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_view: Some("home".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartView {
    Home,
    History,
}

impl StartView {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "home" | "inicio" | "início" => Some(Self::Home),
            "history" | "historico" | "histórico" => Some(Self::History),
            _ => None,
        }
    }

    pub const fn route(self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::History => Route::History,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PROJETOS_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set PROJETOS_CONFIG_PATH to the config file"
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
                    "config file {} has no version. Add `version = 1` and put values under [api] and [ui]",
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
        let base_url = self.base_url();
        let parsed = Url::parse(base_url).with_context(|| {
            format!(
                "api.base_url in {} is not a valid URL: {base_url:?}",
                path.display()
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url in {} must use http or https, got {:?}",
                path.display(),
                parsed.scheme()
            );
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(limit) = self.api.home_limit
            && !(1..=1000).contains(&limit)
        {
            bail!(
                "api.home_limit in {} must be between 1 and 1000, got {}",
                path.display(),
                limit
            );
        }

        if let Some(user) = &self.api.remote_user
            && user.trim().is_empty()
        {
            bail!("api.remote_user in {} must not be empty", path.display());
        }

        if let Some(view) = &self.ui.start_view
            && StartView::parse(view).is_none()
        {
            bail!(
                "ui.start_view in {} must be \"home\" or \"history\", got {:?}",
                path.display(),
                view
            );
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim()
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn identity(&self) -> Identity {
        Identity {
            remote_user: self
                .api
                .remote_user
                .clone()
                .unwrap_or_else(|| DEFAULT_REMOTE_USER.to_owned()),
            remote_groups: self
                .api
                .remote_groups
                .clone()
                .unwrap_or_else(|| DEFAULT_REMOTE_GROUPS.to_owned()),
        }
    }

    pub fn home_limit(&self) -> u32 {
        self.api
            .home_limit
            .and_then(|limit| u32::try_from(limit).ok())
            .unwrap_or(DEFAULT_HOME_LIMIT)
    }

    pub fn start_view(&self) -> StartView {
        self.ui
            .start_view
            .as_deref()
            .and_then(StartView::parse)
            .unwrap_or(StartView::Home)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# projetos config\n# Place this file at: {}\n\nversion = 1\n\n[api]\nbase_url = \"{}\"\ntimeout = \"{}\"\n# Placeholder identity sent as remote-user / remote-groups headers\nremote_user = \"{}\"\nremote_groups = \"{}\"\n# Rows requested for the home list\nhome_limit = {}\n\n[ui]\n# \"home\" or \"history\"\nstart_view = \"home\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_REMOTE_USER,
            DEFAULT_REMOTE_GROUPS,
            DEFAULT_HOME_LIMIT,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let parse = |value: &str| -> Result<u64> {
        value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))
    };
    if let Some(value) = raw.strip_suffix("ms") {
        return Ok(Duration::from_millis(parse(value)?));
    }
    if let Some(value) = raw.strip_suffix('s') {
        return Ok(Duration::from_secs(parse(value)?));
    }
    if let Some(value) = raw.strip_suffix('m') {
        return Ok(Duration::from_secs(parse(value)?.saturating_mul(60)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}
