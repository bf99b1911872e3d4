/// Configuration schema and defaults for the inference console.
///
/// Sections: `[api]`, `[web]`, `[form]` and `[logging]`. Every field has a
/// built-in default, so a config file only needs the values it changes.
use serde::{Deserialize, Serialize};

use crate::api::types::Tamanho;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default listen address for `inferencia web`.
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:8080";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Maps to `~/.inferencia/config.toml` and `.inferencia.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub web: WebConfig,
    pub form: FormConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Request timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub addr: String,
    /// Open the page in the default browser when the server starts.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [form]
// ---------------------------------------------------------------------------

/// Initial values of the size selectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub tamanho_texto: Tamanho,
    pub tamanho_resumo: Tamanho,
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append one line per action to `~/.inferencia/activity-log.jsonl`.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl ConsoleConfig {
    /// Commented TOML written by `inferencia config init`.
    pub fn default_toml() -> &'static str {
        r#"# inferencia configuration
#
# Precedence (highest wins): INFERENCIA_* env vars > .inferencia.toml >
# ~/.inferencia/config.toml > built-in defaults.

[api]
# Base URL of the inference API.
base_url = "http://localhost:5000/api"
# Request timeout in milliseconds. 0 waits indefinitely.
timeout_ms = 0

[web]
# Listen address for `inferencia web`.
addr = "127.0.0.1:8080"
open_browser = true

[form]
# Initial size selectors: curto, medio or longo.
tamanho_texto = "medio"
tamanho_resumo = "medio"

[logging]
# Record each action (never its text) in ~/.inferencia/activity-log.jsonl.
enabled = true
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_matches_defaults() {
        let parsed: ConsoleConfig = toml::from_str(ConsoleConfig::default_toml()).unwrap();
        assert_eq!(parsed, ConsoleConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let parsed: ConsoleConfig = toml::from_str(
            r#"
[api]
base_url = "http://gpu-box:5000/api"

[form]
tamanho_resumo = "curto"
"#,
        )
        .unwrap();
        assert_eq!(parsed.api.base_url, "http://gpu-box:5000/api");
        assert_eq!(parsed.api.timeout_ms, 0);
        assert_eq!(parsed.form.tamanho_resumo, Tamanho::Curto);
        assert_eq!(parsed.form.tamanho_texto, Tamanho::Medio);
        assert_eq!(parsed.web.addr, DEFAULT_WEB_ADDR);
        assert!(parsed.logging.enabled);
    }

    #[test]
    fn unknown_size_is_rejected() {
        let parsed: Result<ConsoleConfig, _> = toml::from_str("[form]\ntamanho_texto = \"gigante\"\n");
        assert!(parsed.is_err());
    }
}
