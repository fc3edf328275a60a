use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use client_core::DEFAULT_EVENT_CAPACITY;

pub const SETTINGS_FILE: &str = "desktop.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Defaults, then `desktop.toml` in the working directory, then `APP__*`
/// environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = Path::new(SETTINGS_FILE);
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: HashMap<String, toml::Value> = toml::from_str(raw)?;

    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    if let Some(v) = file_cfg.get("event_capacity").and_then(toml::Value::as_integer) {
        settings.event_capacity = usize::try_from(v)
            .ok()
            .filter(|capacity| *capacity > 0)
            .with_context(|| format!("event_capacity must be a positive integer, got {v}"))?;
    }

    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = lookup("APP__EVENT_CAPACITY") {
        settings.event_capacity = v
            .parse::<usize>()
            .ok()
            .filter(|capacity| *capacity > 0)
            .with_context(|| format!("APP__EVENT_CAPACITY must be a positive integer, got {v}"))?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
