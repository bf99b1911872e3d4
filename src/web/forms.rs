//! `application/x-www-form-urlencoded` bodies posted by the page's forms.

use crate::api::types::Tamanho;
use crate::console::FormState;
use crate::handlers::Action;

/// Decode a form body into key/value pairs, in order.
///
/// `+` is a space; pairs that fail percent-decoding are dropped.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode(k)?, decode(v)?))
        })
        .collect()
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

fn field<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Copy the fields posted for `action` into the form state.
///
/// Fields that are absent leave the current value alone; an unknown size
/// keeps the previous selection.
pub fn apply_to_form(action: Action, pairs: &[(String, String)], form: &mut FormState) {
    match action {
        Action::AnalyzeSentiment => {
            if let Some(texto) = field(pairs, "texto") {
                form.texto_sentimento = texto.to_string();
            }
        }
        Action::GenerateText => {
            if let Some(tema) = field(pairs, "tema") {
                form.tema_texto = tema.to_string();
            }
            if let Some(tamanho) = field(pairs, "tamanho").and_then(Tamanho::parse) {
                form.tamanho_texto = tamanho;
            }
        }
        Action::SummarizeText => {
            if let Some(texto) = field(pairs, "texto") {
                form.texto_resumir = texto.to_string();
            }
            if let Some(tamanho) = field(pairs, "tamanho_resumo").and_then(Tamanho::parse) {
                form.tamanho_resumo = tamanho;
            }
        }
        Action::CheckStatus | Action::LoadModelInfo => {}
    }
}
