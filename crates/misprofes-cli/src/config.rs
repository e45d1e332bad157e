// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use misprofes_api::{ApiSchema, DEFAULT_BASE_URL};
use misprofes_app::{DEFAULT_PAGE_WINDOW, DEFAULT_ROWS_PER_PAGE};
use misprofes_tui::UiOptions;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "misprofes";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "30s";
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_PAGE_WINDOW: usize = 10;
const CONFIG_PATH_ENV: &str = "MISPROFES_CONFIG_PATH";
const API_URL_ENV: &str = "MISPROFES_API_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub schema: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: None,
            schema: Some(ApiSchema::Consulta.as_str().to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub rows_per_page: Option<usize>,
    pub page_window: Option<usize>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            rows_per_page: Some(DEFAULT_ROWS_PER_PAGE),
            page_window: Some(DEFAULT_PAGE_WINDOW),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
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
                    "config file {} is not versioned. Add `version = 1` and put values under [api], [ui], and [log]",
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
        if let Some(schema) = &self.api.schema
            && ApiSchema::parse(schema).is_none()
        {
            bail!(
                "api.schema in {} must be \"consulta\" or \"genai\", got {:?}",
                path.display(),
                schema
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

        if self.ui.rows_per_page == Some(0) {
            bail!(
                "ui.rows_per_page in {} must be positive, got 0",
                path.display()
            );
        }

        if let Some(window) = self.ui.page_window
            && window > MAX_PAGE_WINDOW
        {
            bail!(
                "ui.page_window in {} must be at most {}, got {}",
                path.display(),
                MAX_PAGE_WINDOW,
                window
            );
        }

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!(
                "log.level in {} must not be empty; use a filter such as \"info\" or \"misprofes_api=debug\"",
                path.display()
            );
        }

        Ok(())
    }

    /// `MISPROFES_API_URL` wins over `[api].base_url`, which wins over the
    /// local default.
    pub fn api_base_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url.trim().trim_end_matches('/').to_owned();
        }
        self.api
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim()
            .trim_end_matches('/')
            .to_owned()
    }

    pub fn api_schema(&self) -> ApiSchema {
        self.api
            .schema
            .as_deref()
            .and_then(ApiSchema::parse)
            .unwrap_or_default()
    }

    pub fn api_timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn ui_options(&self) -> UiOptions {
        UiOptions {
            rows_per_page: self.ui.rows_per_page.unwrap_or(DEFAULT_ROWS_PER_PAGE),
            page_window: self.ui.page_window.unwrap_or(DEFAULT_PAGE_WINDOW),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# misprofes config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# {API_URL_ENV} overrides base_url when set.\nbase_url = \"{}\"\n# \"consulta\" (current) or \"genai\" (legacy endpoint)\nschema = \"consulta\"\ntimeout = \"{}\"\n\n[ui]\nrows_per_page = {}\npage_window = {}\n\n[log]\n# Optional. Default is platform data dir (for example ~/.local/share/misprofes/misprofes.log)\n# path = \"/absolute/path/to/misprofes.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_ROWS_PER_PAGE,
            DEFAULT_PAGE_WINDOW,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 30s)")
}
