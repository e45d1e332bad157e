// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILTER_ENV: &str = "MISPROFES_LOG";

/// Filter directives from `MISPROFES_LOG` take precedence over the
/// configured level.
pub fn build_filter(configured: &str) -> Result<EnvFilter> {
    match std::env::var(LOG_FILTER_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives.trim())
            .with_context(|| format!("invalid {LOG_FILTER_ENV} filter {directives:?}")),
        _ => EnvFilter::try_new(configured)
            .with_context(|| format!("invalid log.level filter {configured:?}")),
    }
}

/// The terminal belongs to the TUI, so events are appended to a file.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::{LOG_FILTER_ENV, build_filter};
    use crate::test_support::env_lock;
    use anyhow::Result;

    #[test]
    fn configured_level_builds_filter() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_FILTER_ENV);
        }
        let filter = build_filter("misprofes_api=debug,info")?;
        assert!(filter.to_string().contains("misprofes_api=debug"));
        Ok(())
    }

    #[test]
    fn invalid_level_is_reported() {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_FILTER_ENV);
        }
        let error = build_filter("misprofes_api=loud").expect_err("bad level should fail");
        assert!(error.to_string().contains("log.level"));
    }

    #[test]
    fn env_filter_overrides_configured_level() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(LOG_FILTER_ENV, "misprofes_tui=trace");
        }
        let filter = build_filter("info");
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_FILTER_ENV);
        }
        assert!(filter?.to_string().contains("misprofes_tui=trace"));
        Ok(())
    }
}
