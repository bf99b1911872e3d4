/// Response shapes for each API endpoint.
///
/// The API does not publish a schema; these structs only name the fields the
/// views read. Every field is optional: a missing or `null` field falls back
/// to an empty value instead of failing the whole response. Only a body that
/// is not JSON at all is an error (handled in [`super::parse_body`]).
use anyhow::{Result, anyhow};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when a failed response carries neither `mensagem` nor `erro`.
pub const UNKNOWN_ERROR: &str = "Erro desconhecido";

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Size selector shared by generation and summarization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tamanho {
    Curto,
    #[default]
    Medio,
    Longo,
}

impl Tamanho {
    pub const ALL: [Tamanho; 3] = [Tamanho::Curto, Tamanho::Medio, Tamanho::Longo];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Curto => "curto",
            Self::Medio => "medio",
            Self::Longo => "longo",
        }
    }

    /// Label shown next to the option in the size selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Curto => "Curto",
            Self::Medio => "Médio",
            Self::Longo => "Longo",
        }
    }

    /// Parse a selector value. Accepts the accented spelling too.
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "curto" => Some(Self::Curto),
            "medio" | "médio" => Some(Self::Medio),
            "longo" => Some(Self::Longo),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tamanho {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for `POST /sentimento`.
#[derive(Debug, Serialize)]
pub struct SentimentRequest<'a> {
    pub texto: &'a str,
}

/// Body for `POST /gerar`.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub tema: &'a str,
    pub tamanho: Tamanho,
}

/// Body for `POST /resumir`.
#[derive(Debug, Serialize)]
pub struct SummaryRequest<'a> {
    pub texto: &'a str,
    pub tamanho_resumo: Tamanho,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `GET /status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    #[serde(deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(deserialize_with = "lenient_text")]
    pub mensagem: String,
    #[serde(deserialize_with = "lenient_text")]
    pub versao: String,
    #[serde(deserialize_with = "lenient_list")]
    pub endpoints_disponiveis: Vec<String>,
}

impl StatusResponse {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// Model names per feature, inside `GET /modelo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelNames {
    #[serde(deserialize_with = "lenient_text")]
    pub sentimento: String,
    #[serde(deserialize_with = "lenient_text")]
    pub geracao: String,
    #[serde(deserialize_with = "lenient_text")]
    pub resumo: String,
}

/// `GET /modelo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub provedor: String,
    #[serde(deserialize_with = "lenient_text")]
    pub dispositivo: String,
    #[serde(deserialize_with = "lenient_text")]
    pub descricao: String,
    #[serde(deserialize_with = "lenient_list")]
    pub capacidades: Vec<String>,
    #[serde(deserialize_with = "lenient_models")]
    pub modelos: Option<ModelNames>,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub tamanho_total: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub vantagens: Vec<String>,
}

/// Successful `POST /sentimento`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SentimentResult {
    #[serde(deserialize_with = "lenient_text")]
    pub texto_original: String,
    #[serde(deserialize_with = "lenient_text")]
    pub sentimento: String,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub tokens_usados: Option<String>,
    /// Confidence in percent, e.g. `97.4`.
    #[serde(deserialize_with = "lenient_opt_text")]
    pub confianca: Option<String>,
}

/// Successful `POST /gerar`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerationResult {
    #[serde(deserialize_with = "lenient_text")]
    pub tema: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tamanho_solicitado: String,
    #[serde(deserialize_with = "lenient_text")]
    pub texto_gerado: String,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub tokens_usados: Option<String>,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub palavras_geradas: Option<String>,
}

/// Successful `POST /resumir`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryResult {
    #[serde(deserialize_with = "lenient_text")]
    pub tamanho_resumo: String,
    #[serde(deserialize_with = "lenient_text")]
    pub resumo: String,
    #[serde(deserialize_with = "lenient_text")]
    pub texto_original: String,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub tokens_usados: Option<String>,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub reducao: Option<String>,
    #[serde(deserialize_with = "lenient_opt_text")]
    pub nota: Option<String>,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of an inference call that completed at the transport level.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// `sucesso` was truthy; the typed result.
    Success(T),
    /// `sucesso` was falsy; the text to show the user.
    Failure(String),
}

/// Split a response on its `sucesso` flag.
///
/// The flag is read with JSON truthiness: `true`, non-zero numbers,
/// non-empty strings, arrays and objects all count as success.
pub fn parse_outcome<T: DeserializeOwned>(value: Value) -> Result<Outcome<T>> {
    if !value.get("sucesso").is_some_and(is_truthy) {
        return Ok(Outcome::Failure(failure_message(&value)));
    }
    let result = serde_json::from_value(value)
        .map_err(|e| anyhow!("{}: {e}", super::REQUEST_ERROR_PREFIX))?;
    Ok(Outcome::Success(result))
}

/// Pick the user-facing text of a failed response: `mensagem`, then `erro`.
pub fn failure_message(value: &Value) -> String {
    ["mensagem", "erro"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find(|v| is_truthy(v))
        .map(value_text)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Token count as displayed; `n/d` when the API did not report one.
pub fn tokens_label(tokens: Option<&str>) -> String {
    tokens.unwrap_or("n/d").to_string()
}

/// Token count as a number, when the reported value is one.
pub fn tokens_count(tokens: Option<&str>) -> Option<u64> {
    tokens.and_then(|t| t.trim().parse().ok())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Accept strings, numbers, booleans or `null` for a text field.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

/// Like [`lenient_text`], but `null` stays `None`.
fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

/// Model names only when the API sent an object; anything else is dropped.
fn lenient_models<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ModelNames>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Accept an array of scalars or `null` for a list field.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(value_text).collect(),
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
