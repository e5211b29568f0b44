use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use storage::DEFAULT_FILE_NAME;

pub const SETTINGS_FILE_NAME: &str = "step_editor.toml";

#[derive(Parser, Debug, Clone, Default)]
#[command(about = "Edit an ordered sequence of named steps")]
pub struct Args {
    /// Directory holding the persisted step sequence.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub file_name: Option<String>,
    /// tracing filter directive, e.g. `info` or `editor_core=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub file_name: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: DEFAULT_FILE_NAME.into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    data_dir: Option<PathBuf>,
    file_name: Option<String>,
    log_filter: Option<String>,
}

impl Settings {
    /// Command-line values win over the settings file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(v) = &args.data_dir {
            self.data_dir = Some(v.clone());
        }
        if let Some(v) = non_empty(args.file_name.as_deref()) {
            self.file_name = v;
        }
        if let Some(v) = non_empty(args.log_filter.as_deref()) {
            self.log_filter = v;
        }
    }
}

/// Reads `path` if it exists. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(settings),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };
    let file_cfg: FileSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    if let Some(v) = file_cfg.data_dir {
        settings.data_dir = Some(v);
    }
    if let Some(v) = non_empty(file_cfg.file_name.as_deref()) {
        settings.file_name = v;
    }
    if let Some(v) = non_empty(file_cfg.log_filter.as_deref()) {
        settings.log_filter = v;
    }

    Ok(settings)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub sequence_path: PathBuf,
}

impl AppPaths {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let root = if let Some(dir) = &settings.data_dir {
            dir.clone()
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
            base.join("step_editor")
        };

        Ok(Self {
            sequence_path: root.join(&settings.file_name),
            data_root: root,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
