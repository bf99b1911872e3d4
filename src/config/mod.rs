/// Configuration system for the inference console.
///
/// Layered hierarchy, later layers win at the key level:
///
/// 1. **Built-in defaults** — [`schema::ConsoleConfig::default()`]
/// 2. **User global config** — `~/.inferencia/config.toml`
/// 3. **Project local config** — `.inferencia.toml` in the working directory
/// 4. **Environment variables** — `INFERENCIA_*` overrides
///
/// Files are merged as TOML tables before deserializing, so a project file
/// that only sets `api.base_url` keeps every other value from the global
/// file.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::ConsoleConfig;

use crate::api::types::Tamanho;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> ConsoleConfig {
    load_from(&[global_config_path(), project_config_path()])
}

/// Merge the given files (in order) over the defaults, then apply env vars.
///
/// Missing or malformed files are skipped: a broken config file must not
/// stop the console from starting.
pub fn load_from(paths: &[Option<PathBuf>]) -> ConsoleConfig {
    let mut merged = toml::Value::try_from(ConsoleConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(Default::default()));

    for path in paths.iter().flatten() {
        if let Some(layer) = load_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    let mut config: ConsoleConfig = merged.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);
    config
}

fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    // Reject files whose values don't fit the schema instead of half-applying them.
    value.clone().try_into::<ConsoleConfig>().ok()?;
    Some(value)
}

/// Recursively overlay `overlay` onto `base`. Tables merge, everything else
/// replaces.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.inferencia/config.toml`
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".inferencia").join("config.toml"))
}

/// `.inferencia.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".inferencia.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Supported variables:
/// - `INFERENCIA_API_URL` — API base URL
/// - `INFERENCIA_TIMEOUT_MS` — request timeout (`0` = none)
/// - `INFERENCIA_WEB_ADDR` — listen address for `inferencia web`
/// - `INFERENCIA_LOG` — activity log on/off (`1`/`true`/`yes`/`on`)
/// - `INFERENCIA_TAMANHO` — default for both size selectors
fn apply_env_overrides(config: &mut ConsoleConfig) {
    if let Ok(val) = std::env::var("INFERENCIA_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("INFERENCIA_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("INFERENCIA_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("INFERENCIA_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("INFERENCIA_TAMANHO")
        && let Some(tamanho) = Tamanho::parse(&val)
    {
        config.form.tamanho_texto = tamanho;
        config.form.tamanho_resumo = tamanho;
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.inferencia/config.toml`.
///
/// Fails if the file exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, ConsoleConfig::default_toml()).context("failed to write config file")
}

/// Set one dotted key (e.g. `api.base_url`) in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)
}

fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(ConsoleConfig::default())
            .context("failed to serialize default config")?
    };

    set_toml_value(&mut root, key, value)?;

    // The result must still be a valid config.
    root.clone()
        .try_into::<ConsoleConfig>()
        .with_context(|| format!("invalid value for '{key}': '{value}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")
}

/// Set a value in a TOML tree by dotted key, typed after the existing value.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("empty config key segment in '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Overwrite the global config with defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
