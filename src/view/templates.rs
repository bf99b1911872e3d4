/// Content builders for every region state.
///
/// Each function turns an API result (or a message) into a [`Block`]. The
/// wording mirrors what users of the web console already know, so the
/// strings are Portuguese.
use crate::api::types::{
    GenerationResult, ModelInfo, SentimentResult, StatusResponse, SummaryResult, tokens_label,
};

use super::block::{Block, Line, Panel, Tone};

// ---------------------------------------------------------------------------
// Generic states
// ---------------------------------------------------------------------------

pub const LOADING_ACTION: &str = "Processando...";
pub const LOADING_STATUS: &str = "Verificando...";
pub const LOADING_MODEL: &str = "Carregando...";

pub fn loading(label: &str) -> Block {
    Block::new().push(Line::Loading(label.to_string()))
}

/// Standard error block: `❌ Erro` and the message.
pub fn error(message: &str) -> Block {
    error_titled("❌ Erro", message)
}

pub fn error_titled(title: &str, message: &str) -> Block {
    Block::new().heading(title).text(message)
}

fn tokens_line(tokens: Option<&str>) -> Line {
    Line::Muted(format!("Tokens utilizados: {}", tokens_label(tokens)))
}

// ---------------------------------------------------------------------------
// Status & model info
// ---------------------------------------------------------------------------

/// Online summary. `checked_at` is the local time of the check (`HH:MM:SS`).
pub fn status_summary(status: &StatusResponse, checked_at: &str) -> Block {
    Block::new()
        .heading(format!("✅ {}", status.mensagem))
        .field("Versão", &status.versao)
        .field(
            "Endpoints disponíveis",
            status.endpoints_disponiveis.len().to_string(),
        )
        .muted(format!("Última verificação: {checked_at}"))
}

pub fn model_info(info: &ModelInfo) -> Block {
    let mut block = Block::new()
        .heading("🤖 Hugging Face (Modelos Locais)")
        .field("Provedor", &info.provedor)
        .field("Dispositivo", &info.dispositivo)
        .field("Descrição", &info.descricao);

    if let Some(total) = &info.tamanho_total {
        block = block.field("Tamanho total", total);
    }

    if let Some(models) = &info.modelos {
        block = block.push(Line::List {
            label: Some("Modelos".to_string()),
            items: vec![
                format!("Sentimento: {}", models.sentimento),
                format!("Geração: {}", models.geracao),
                format!("Resumo: {}", models.resumo),
            ],
        });
    }

    block = block.push(Line::List {
        label: Some("Capacidades".to_string()),
        items: info.capacidades.iter().map(|c| format!("✓ {c}")).collect(),
    });

    if !info.vantagens.is_empty() {
        block = block.push(Line::List {
            label: Some("Vantagens".to_string()),
            items: info.vantagens.clone(),
        });
    }

    block
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Badge category for a sentiment label.
///
/// The mapping is exhaustive: anything that is not recognisably positive or
/// negative is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBadge {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBadge {
    pub fn from_label(label: &str) -> Self {
        match label {
            "POSITIVO" | "POSITIVE" => Self::Positive,
            "NEGATIVO" | "NEGATIVE" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Positive => "badge-positivo",
            Self::Negative => "badge-negativo",
            Self::Neutral => "badge-neutro",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Negative => "😞",
            Self::Neutral => "😐",
        }
    }

    fn tone(self) -> Tone {
        match self {
            Self::Positive => Tone::Positive,
            Self::Negative => Tone::Negative,
            Self::Neutral => Tone::Neutral,
        }
    }
}

pub fn sentiment_success(result: &SentimentResult) -> Block {
    let badge = SentimentBadge::from_label(&result.sentimento);
    let mut block = Block::new()
        .heading("✅ Análise Concluída")
        .field("Texto analisado", format!("\"{}\"", result.texto_original))
        .push(Line::Text("Sentimento detectado:".to_string()))
        .push(Line::Badge {
            class: badge.class().to_string(),
            tone: badge.tone(),
            text: format!("{} {}", badge.emoji(), result.sentimento),
        });

    if let Some(conf) = &result.confianca {
        block = block.field("Confiança", confidence_label(conf));
    }

    block.push(tokens_line(result.tokens_usados.as_deref()))
}

/// Numeric confidence as a percentage; any other value is shown as sent.
fn confidence_label(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(conf) => format!("{conf:.2}%"),
        Err(_) => raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

pub fn generation_success(result: &GenerationResult) -> Block {
    let mut block = Block::new()
        .heading("✅ Texto Gerado com Sucesso")
        .field("Tema", &result.tema)
        .field("Tamanho", &result.tamanho_solicitado)
        .push(Line::Preformatted {
            label: None,
            text: result.texto_gerado.clone(),
            panel: Panel::Plain,
        });

    if let Some(words) = &result.palavras_geradas {
        block = block.muted(format!("Palavras geradas: {words}"));
    }

    block.push(tokens_line(result.tokens_usados.as_deref()))
}

// ---------------------------------------------------------------------------
// Summarization
// ---------------------------------------------------------------------------

pub fn summary_success(result: &SummaryResult) -> Block {
    let mut block = Block::new()
        .heading("✅ Resumo Gerado com Sucesso")
        .field("Tamanho do resumo", &result.tamanho_resumo)
        .push(Line::Preformatted {
            label: Some("📝 Resumo:".to_string()),
            text: result.resumo.clone(),
            panel: Panel::Highlight,
        })
        .push(Line::Details {
            summary: "Ver texto original".to_string(),
            text: result.texto_original.clone(),
        });

    if let Some(reducao) = &result.reducao {
        block = block.muted(format!("Redução: {reducao}"));
    }
    if let Some(nota) = &result.nota {
        block = block.muted(nota.clone());
    }

    block.push(tokens_line(result.tokens_usados.as_deref()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_mapping_is_exhaustive() {
        assert_eq!(SentimentBadge::from_label("POSITIVO"), SentimentBadge::Positive);
        assert_eq!(SentimentBadge::from_label("POSITIVE"), SentimentBadge::Positive);
        assert_eq!(SentimentBadge::from_label("NEGATIVO"), SentimentBadge::Negative);
        assert_eq!(SentimentBadge::from_label("NEGATIVE"), SentimentBadge::Negative);
        for other in ["NEUTRO", "NEUTRAL", "positivo", "", "MISTO"] {
            assert_eq!(SentimentBadge::from_label(other), SentimentBadge::Neutral);
        }
    }

    #[test]
    fn badge_classes_and_emojis() {
        assert_eq!(SentimentBadge::Positive.class(), "badge-positivo");
        assert_eq!(SentimentBadge::Positive.emoji(), "😊");
        assert_eq!(SentimentBadge::Negative.class(), "badge-negativo");
        assert_eq!(SentimentBadge::Negative.emoji(), "😞");
        assert_eq!(SentimentBadge::Neutral.class(), "badge-neutro");
        assert_eq!(SentimentBadge::Neutral.emoji(), "😐");
    }

    #[test]
    fn sentiment_block_shows_badge_and_tokens() {
        let result = SentimentResult {
            texto_original: "I love this!".to_string(),
            sentimento: "POSITIVO".to_string(),
            tokens_usados: Some("4".to_string()),
            confianca: None,
        };
        let html = sentiment_success(&result).to_html();
        assert!(html.contains("badge-positivo"));
        assert!(html.contains("😊 POSITIVO"));
        assert!(html.contains("&quot;I love this!&quot;"));
        assert!(html.contains("Tokens utilizados: 4"));
        assert!(!html.contains("Confiança"));
    }

    #[test]
    fn sentiment_block_shows_confidence_when_present() {
        let result = SentimentResult {
            sentimento: "NEGATIVO".to_string(),
            confianca: Some("91.5".to_string()),
            ..Default::default()
        };
        let text = sentiment_success(&result).plain_text();
        assert!(text.contains("Confiança: 91.50%"));
        assert!(text.contains("😞 NEGATIVO"));
        assert!(text.contains("Tokens utilizados: n/d"));
    }

    #[test]
    fn non_numeric_confidence_is_shown_verbatim() {
        let result = SentimentResult {
            sentimento: "POSITIVO".to_string(),
            confianca: Some("97%".to_string()),
            tokens_usados: Some("4".to_string()),
            ..Default::default()
        };
        let text = sentiment_success(&result).plain_text();
        assert!(text.contains("Confiança: 97%"));
        assert!(text.contains("Tokens utilizados: 4"));
    }

    #[test]
    fn summary_block_has_collapsible_original() {
        let result = SummaryResult {
            tamanho_resumo: "curto".to_string(),
            resumo: "Frase um.\nFrase dois.".to_string(),
            texto_original: "Texto longo\n\ncom parágrafos.".to_string(),
            tokens_usados: Some("12".to_string()),
            reducao: Some("20/40 caracteres".to_string()),
            nota: None,
        };
        let html = summary_success(&result).to_html();
        assert!(html.contains("<details><summary>Ver texto original</summary>"));
        assert!(html.contains("Texto longo\n\ncom parágrafos."));
        assert!(html.contains("Frase um.\nFrase dois."));
        assert!(html.contains("Redução: 20/40 caracteres"));
        assert!(html.contains("Tokens utilizados: 12"));
    }

    #[test]
    fn model_info_lists_models_only_when_present() {
        let mut info = ModelInfo {
            provedor: "Hugging Face".to_string(),
            capacidades: vec!["Análise de sentimento".to_string()],
            ..Default::default()
        };
        let text = model_info(&info).plain_text();
        assert!(!text.contains("Modelos"));
        assert!(text.contains("✓ Análise de sentimento"));

        info.modelos = Some(crate::api::types::ModelNames {
            sentimento: "distilbert".to_string(),
            geracao: "gpt2".to_string(),
            resumo: "extração".to_string(),
        });
        let text = model_info(&info).plain_text();
        assert!(text.contains("Sentimento: distilbert"));
        assert!(text.contains("Geração: gpt2"));
    }

    #[test]
    fn status_counts_endpoints() {
        let status = StatusResponse {
            status: "online".to_string(),
            mensagem: "API de IA está funcionando corretamente!".to_string(),
            versao: "1.0.0".to_string(),
            endpoints_disponiveis: vec!["/api/status".to_string(), "/api/modelo".to_string()],
        };
        let text = status_summary(&status, "10:00:00").plain_text();
        assert!(text.contains("✅ API de IA está funcionando corretamente!"));
        assert!(text.contains("Endpoints disponíveis: 2"));
        assert!(text.contains("Última verificação: 10:00:00"));
    }
}
