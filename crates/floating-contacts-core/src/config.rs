//! Application configuration types and parsing.
//!
//! This is the renderer's own configuration (where the settings snapshot
//! lives, icon set version, translatable labels), not the admin-edited
//! contact settings, which live in [`crate::settings`].

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use toml::Table;

use crate::error::{Error, Result};

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings snapshot location.
    pub store: StoreConfig,

    /// Icon set configuration.
    pub icons: IconsConfig,

    /// User-visible strings.
    pub labels: LabelsConfig,

    /// Markup identifiers.
    pub markup: MarkupConfig,
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse a user TOML string, deep-merge it over the embedded defaults
    /// (user values win), then deserialize the result.
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// If `explicit_path` is `Some`, that path is used directly and an error
    /// is returned if it doesn't exist or can't be parsed (no fallback).
    ///
    /// If `explicit_path` is `None`, searches in order:
    /// 1. `$XDG_CONFIG_HOME/floating-contacts/config.toml`
    /// 2. `~/.config/floating-contacts/config.toml`
    /// 3. `./config.toml` (current working directory)
    ///
    /// If no config file is found in the search chain, the embedded defaults
    /// are used.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        // A config file that exists but fails to load is an error; defaults
        // are only used when no file exists at all.
        let search_paths = Self::config_search_paths();
        let mut first_error: Option<(PathBuf, Error)> = None;

        for path in &search_paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return Ok(ConfigLoadResult {
                            config,
                            source: Some(path.clone()),
                            used_defaults: false,
                        });
                    }
                    Err(e) => {
                        if first_error.is_none() {
                            first_error = Some((path.clone(), e));
                        }
                    }
                }
            }
        }

        if let Some((path, error)) = first_error {
            tracing::error!(
                "Config file {:?} exists but failed to load: {}",
                path,
                error
            );
            return Err(error);
        }

        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("floating-contacts/config.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/floating-contacts/config.toml"));
        }

        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Validate the configuration, returning every invalid value at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if parse_version(&self.icons.font_awesome_version).is_none() {
            errors.push(format!(
                "icons.font_awesome_version: invalid value '{}', expected a dotted version like '6.7.2'",
                self.icons.font_awesome_version
            ));
        }

        if self.icons.fallback.trim().is_empty() {
            errors.push("icons.fallback: must not be empty".to_string());
        }

        for (key, value) in [
            ("labels.container", &self.labels.container),
            ("labels.list", &self.labels.list),
            ("labels.email", &self.labels.email),
            ("labels.whatsapp", &self.labels.whatsapp),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{}: must not be empty", key));
            }
        }

        if !is_valid_html_id(&self.markup.list_id) {
            errors.push(format!(
                "markup.list_id: invalid value '{}', expected letters, digits, '-' or '_' starting with a letter",
                self.markup.list_id
            ));
        }

        if self.store.settings_path.as_os_str().is_empty() {
            errors.push("store.settings_path: must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("Store:".to_string());
        lines.push(format!(
            "  settings_path: {}",
            self.store.settings_path.display()
        ));

        lines.push("\nIcons:".to_string());
        lines.push(format!(
            "  font_awesome_version: {}",
            self.icons.font_awesome_version
        ));
        lines.push(format!("  fallback: {}", self.icons.fallback));

        lines.push("\nLabels:".to_string());
        lines.push(format!("  container: {}", self.labels.container));
        lines.push(format!("  list: {}", self.labels.list));
        lines.push(format!("  email: {}", self.labels.email));
        lines.push(format!("  whatsapp: {}", self.labels.whatsapp));

        lines.push("\nMarkup:".to_string());
        lines.push(format!("  list_id: {}", self.markup.list_id));

        lines.join("\n")
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// For nested tables, recursively merges. For arrays and other values,
/// the overlay value completely replaces the base value.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

/// Parse a dotted numeric version (`"6"`, `"5.15"`, `"6.7.2"`).
///
/// Missing minor/patch components count as zero.
pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Ok(0), str::parse).ok()?;
    let patch = parts.next().map_or(Ok(0), str::parse).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

fn is_valid_html_id(id: &str) -> bool {
    id.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Where the raw settings snapshot is read from and saved to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON file holding the settings record.
    pub settings_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("floating-contacts.json"),
        }
    }
}

/// Icon set configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconsConfig {
    /// FontAwesome version loaded on the page. Versions before 5 use the
    /// single `fa` prefix instead of `fab`/`fas`.
    pub font_awesome_version: String,

    /// Icon used for custom links that don't name one.
    pub fallback: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            font_awesome_version: "6.7.2".to_string(),
            fallback: "link".to_string(),
        }
    }
}

/// User-visible strings, overridable for translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// `aria-label` of the widget container.
    pub container: String,
    /// `aria-label` of the contact list.
    pub list: String,
    /// Text of the email entry.
    pub email: String,
    /// Text of the WhatsApp entry.
    pub whatsapp: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            container: "Floating Contact Buttons".to_string(),
            list: "Contact Options".to_string(),
            email: "Email".to_string(),
            whatsapp: "WhatsApp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// `id` of the contact list, referenced by the trigger's `aria-controls`.
    pub list_id: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            list_id: "FloatingContacts-list".to_string(),
        }
    }
}
