use std::{fs, path::Path};

use anyhow::Context;
use list_core::DisplayOptions;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub large_font: bool,
    pub dictation_enabled: bool,
    pub log_filter: String,
    /// Pause between items the in-memory service sends, in milliseconds.
    pub item_delay_ms: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            large_font: false,
            dictation_enabled: true,
            log_filter: "info".into(),
            item_delay_ms: 0,
        }
    }
}

impl ViewerSettings {
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            large_font: self.large_font,
            dictation_enabled: self.dictation_enabled,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    large_font: Option<bool>,
    dictation: Option<bool>,
    log: Option<String>,
    item_delay_ms: Option<u64>,
}

/// Defaults, then the TOML file, then environment variables. An explicit
/// `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ViewerSettings> {
    let mut settings = ViewerSettings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    if let Some(raw) = raw {
        apply_file(&mut settings, &raw)?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut ViewerSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw).context("invalid viewer config")?;
    if let Some(v) = file_cfg.large_font {
        settings.large_font = v;
    }
    if let Some(v) = file_cfg.dictation {
        settings.dictation_enabled = v;
    }
    if let Some(v) = file_cfg.log {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.item_delay_ms {
        settings.item_delay_ms = v;
    }
    Ok(())
}

fn apply_env(settings: &mut ViewerSettings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["TASKS_LARGE_FONT", "APP__LARGE_FONT"] {
        if let Some(v) = lookup(key).as_deref().and_then(parse_flag) {
            settings.large_font = v;
        }
    }
    for key in ["TASKS_DICTATION", "APP__DICTATION"] {
        if let Some(v) = lookup(key).as_deref().and_then(parse_flag) {
            settings.dictation_enabled = v;
        }
    }
    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__ITEM_DELAY_MS").and_then(|v| v.parse().ok()) {
        settings.item_delay_ms = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
