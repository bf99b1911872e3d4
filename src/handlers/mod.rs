/// Feature handlers.
///
/// One function per console feature. Each validates its input, calls the API
/// through a [`Transport`] and leaves its own [`DisplayRegion`] in exactly
/// one of the loading, success or error states. A handler never touches
/// another feature's region, which is what lets the startup routine run the
/// status and model-info fetches side by side.
///
/// Handlers return an [`ActionReport`] so the caller can log the outcome;
/// the user-facing result is the region state.
use std::time::Instant;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::api::types::{
    GenerationRequest, GenerationResult, ModelInfo, Outcome, SentimentRequest, SentimentResult,
    StatusResponse, SummaryRequest, SummaryResult, Tamanho, parse_outcome, tokens_count,
};
use crate::api::{ApiRequest, Transport};
use crate::view::block::Block;
use crate::view::{DisplayRegion, templates};

pub const EMPTY_SENTIMENT_TEXT: &str = "Por favor, digite um texto para análise.";
pub const EMPTY_GENERATION_THEME: &str = "Por favor, digite um tema para gerar o texto.";
pub const EMPTY_SUMMARY_TEXT: &str = "Por favor, digite um texto para resumir.";

// ---------------------------------------------------------------------------
// Actions and reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CheckStatus,
    LoadModelInfo,
    AnalyzeSentiment,
    GenerateText,
    SummarizeText,
}

impl Action {
    /// Short name used in logs and web routes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckStatus => "status",
            Self::LoadModelInfo => "modelo",
            Self::AnalyzeSentiment => "sentimento",
            Self::GenerateText => "gerar",
            Self::SummarizeText => "resumir",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "status" => Some(Self::CheckStatus),
            "modelo" => Some(Self::LoadModelInfo),
            "sentimento" => Some(Self::AnalyzeSentiment),
            "gerar" => Some(Self::GenerateText),
            "resumir" => Some(Self::SummarizeText),
            _ => None,
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::CheckStatus => "/status",
            Self::LoadModelInfo => "/modelo",
            Self::AnalyzeSentiment => "/sentimento",
            Self::GenerateText => "/gerar",
            Self::SummarizeText => "/resumir",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    /// The API answered with `sucesso: false` (or, for status, not online).
    Failure,
    /// Network or JSON failure.
    TransportError,
    /// Rejected before any request was sent.
    ValidationError,
}

impl ActionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::TransportError => "transport_error",
            Self::ValidationError => "validation_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub action: Action,
    pub outcome: ActionOutcome,
    pub latency_ms: u64,
    pub tokens: Option<u64>,
}

impl ActionReport {
    fn new(action: Action, outcome: ActionOutcome, started: Instant) -> Self {
        Self {
            action,
            outcome,
            latency_ms: started.elapsed().as_millis() as u64,
            tokens: None,
        }
    }

    fn validation(action: Action) -> Self {
        Self {
            action,
            outcome: ActionOutcome::ValidationError,
            latency_ms: 0,
            tokens: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Status & model info
// ---------------------------------------------------------------------------

/// `GET /status` into the status region.
pub fn check_status<T: Transport>(transport: &T, region: &mut DisplayRegion) -> ActionReport {
    let action = Action::CheckStatus;
    region.show_loading(templates::LOADING_STATUS);
    let started = Instant::now();

    let status = transport
        .send(&ApiRequest::get(action.endpoint()))
        .and_then(|value| Ok(serde_json::from_value::<StatusResponse>(value)?));

    match status {
        Ok(status) if status.is_online() => {
            let checked_at = chrono::Local::now().format("%H:%M:%S").to_string();
            region.show_success(templates::status_summary(&status, &checked_at));
            ActionReport::new(action, ActionOutcome::Success, started)
        }
        Ok(status) => {
            region.show_error_block(templates::error_titled(
                "⚠️ API indisponível",
                &format!("Status informado: \"{}\"", status.status),
            ));
            ActionReport::new(action, ActionOutcome::Failure, started)
        }
        Err(e) => {
            region.show_error_block(templates::error_titled(
                "❌ Erro ao verificar status",
                &format!("{e:#}"),
            ));
            ActionReport::new(action, ActionOutcome::TransportError, started)
        }
    }
}

/// `GET /modelo` into the model-info region.
pub fn load_model_info<T: Transport>(transport: &T, region: &mut DisplayRegion) -> ActionReport {
    let action = Action::LoadModelInfo;
    region.show_loading(templates::LOADING_MODEL);
    let started = Instant::now();

    let info = transport
        .send(&ApiRequest::get(action.endpoint()))
        .and_then(|value| Ok(serde_json::from_value::<ModelInfo>(value)?));

    match info {
        Ok(info) => {
            region.show_success(templates::model_info(&info));
            ActionReport::new(action, ActionOutcome::Success, started)
        }
        Err(e) => {
            region.show_error_block(templates::error_titled(
                "❌ Erro ao carregar informações",
                &format!("{e:#}"),
            ));
            ActionReport::new(action, ActionOutcome::TransportError, started)
        }
    }
}

// ---------------------------------------------------------------------------
// Inference features
// ---------------------------------------------------------------------------

/// `POST /sentimento {texto}`.
pub fn analyze_sentiment<T: Transport>(
    transport: &T,
    region: &mut DisplayRegion,
    texto: &str,
) -> ActionReport {
    let texto = texto.trim();
    if texto.is_empty() {
        region.show_error(EMPTY_SENTIMENT_TEXT);
        return ActionReport::validation(Action::AnalyzeSentiment);
    }

    run_inference(
        transport,
        region,
        Action::AnalyzeSentiment,
        ApiRequest::post(Action::AnalyzeSentiment.endpoint(), &SentimentRequest { texto }),
        |r: &SentimentResult| (templates::sentiment_success(r), token_count(&r.tokens_usados)),
    )
}

/// `POST /gerar {tema, tamanho}`.
pub fn generate_text<T: Transport>(
    transport: &T,
    region: &mut DisplayRegion,
    tema: &str,
    tamanho: Tamanho,
) -> ActionReport {
    let tema = tema.trim();
    if tema.is_empty() {
        region.show_error(EMPTY_GENERATION_THEME);
        return ActionReport::validation(Action::GenerateText);
    }

    run_inference(
        transport,
        region,
        Action::GenerateText,
        ApiRequest::post(
            Action::GenerateText.endpoint(),
            &GenerationRequest { tema, tamanho },
        ),
        |r: &GenerationResult| (templates::generation_success(r), token_count(&r.tokens_usados)),
    )
}

/// `POST /resumir {texto, tamanho_resumo}`.
pub fn summarize_text<T: Transport>(
    transport: &T,
    region: &mut DisplayRegion,
    texto: &str,
    tamanho_resumo: Tamanho,
) -> ActionReport {
    let texto = texto.trim();
    if texto.is_empty() {
        region.show_error(EMPTY_SUMMARY_TEXT);
        return ActionReport::validation(Action::SummarizeText);
    }

    run_inference(
        transport,
        region,
        Action::SummarizeText,
        ApiRequest::post(
            Action::SummarizeText.endpoint(),
            &SummaryRequest {
                texto,
                tamanho_resumo,
            },
        ),
        |r: &SummaryResult| (templates::summary_success(r), token_count(&r.tokens_usados)),
    )
}

/// Shared loading → request → success/failure/error sequence.
fn run_inference<T, R, F>(
    transport: &T,
    region: &mut DisplayRegion,
    action: Action,
    request: Result<ApiRequest>,
    render: F,
) -> ActionReport
where
    T: Transport,
    R: DeserializeOwned,
    F: FnOnce(&R) -> (Block, Option<u64>),
{
    region.show_loading(templates::LOADING_ACTION);
    let started = Instant::now();

    let outcome = request
        .and_then(|req| transport.send(&req))
        .and_then(parse_outcome::<R>);

    match outcome {
        Ok(Outcome::Success(result)) => {
            let (block, tokens) = render(&result);
            region.show_success(block);
            ActionReport {
                tokens,
                ..ActionReport::new(action, ActionOutcome::Success, started)
            }
        }
        Ok(Outcome::Failure(message)) => {
            region.show_error(&message);
            ActionReport::new(action, ActionOutcome::Failure, started)
        }
        Err(e) => {
            region.show_error(&format!("{e:#}"));
            ActionReport::new(action, ActionOutcome::TransportError, started)
        }
    }
}

fn token_count(tokens: &Option<String>) -> Option<u64> {
    tokens_count(tokens.as_deref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
