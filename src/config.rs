use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_PLACEHOLDER;

pub const CONFIG_FILE_NAME: &str = ".pageglotrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the source-locale markup, relative to the project root.
    #[serde(default = "default_pages_root")]
    pub pages_root: String,
    /// Directory holding one sub-directory of stores per locale.
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    /// Sentinel marking an intentionally unfilled translation.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_report_path")]
    pub report_path: String,
    /// Flat store used by `fill`, relative to the source locale directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_store: Option<String>,
    /// Literal values for keys that cannot be extracted from markup.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

fn default_pages_root() -> String {
    "paginas/pt".to_string()
}

fn default_locales_root() -> String {
    "locales".to_string()
}

fn default_manifest() -> String {
    "pages-manifest.json".to_string()
}

fn default_locales() -> Vec<String> {
    ["pt", "en", "es", "fr"].map(String::from).to_vec()
}

fn default_source_locale() -> String {
    "pt".to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_report_path() -> String {
    "tools/i18n-issues-report.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_root: default_pages_root(),
            locales_root: default_locales_root(),
            manifest: default_manifest(),
            locales: default_locales(),
            source_locale: default_source_locale(),
            placeholder: default_placeholder(),
            ignores: Vec::new(),
            report_path: default_report_path(),
            reference_store: None,
            overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no locale is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.locales.is_empty() {
            bail!("'locales' must list at least one locale");
        }
        if self.placeholder.trim().is_empty() {
            bail!("'placeholder' must not be blank");
        }

        Ok(())
    }

    /// Override value for a key, looked up by full path first, then by lookup path.
    pub fn override_for(&self, full_path: &str, lookup_path: &str) -> Option<&str> {
        self.overrides
            .get(full_path)
            .or_else(|| self.overrides.get(lookup_path))
            .map(String::as_str)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
