/// Web console tests.
///
/// Exercise the router the way a browser would: load the page, post a form,
/// follow the redirect and read the updated page or a single region.
use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use tiny_http::Method;

use inferencia::activity::ActivityLog;
use inferencia::api::{ApiRequest, Transport};
use inferencia::console::{Console, FormState};
use inferencia::web::route;

/// Echoes the request body back inside a successful result.
struct EchoApi;

impl Transport for EchoApi {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        let body = request.body.clone().unwrap_or(Value::Null);
        match request.endpoint.as_str() {
            "/status" => Ok(json!({"status": "online", "mensagem": "ok", "versao": "1"})),
            "/modelo" => Ok(json!({"provedor": "local", "capacidades": ["resumo"]})),
            "/gerar" => Ok(json!({
                "sucesso": true,
                "tema": body["tema"],
                "tamanho_solicitado": body["tamanho"],
                "texto_gerado": "<b>negrito</b>\n  recuado"
            })),
            "/resumir" => Ok(json!({
                "sucesso": false,
                "mensagem": format!("tamanho {} indisponível", body["tamanho_resumo"].as_str().unwrap_or("?"))
            })),
            other => Err(anyhow!("Erro na requisição: {other} fora do ar")),
        }
    }

    fn base_url(&self) -> &str {
        "http://echo/api"
    }
}

fn console() -> Console<EchoApi> {
    Console::new(EchoApi, FormState::default(), ActivityLog::disabled())
}

#[test]
fn page_lists_every_form_and_region() {
    let mut console = console();
    let page = route(&mut console, &Method::Get, "/", None).body;

    for form in ["status", "modelo", "sentimento", "gerar", "resumir"] {
        assert!(page.contains(&format!("id=\"form-{form}\"")), "{form}");
        assert!(page.contains(&format!("action=\"/acao/{form}\"")), "{form}");
    }
    for region in [
        "status-api",
        "info-modelo",
        "resultado-sentimento",
        "resultado-geracao",
        "resultado-resumo",
    ] {
        assert!(page.contains(&format!("id=\"{region}\"")), "{region}");
    }
    for field in ["texto-sentimento", "tema-texto", "texto-resumir"] {
        assert!(page.contains(&format!("id=\"{field}\"")), "{field}");
    }
}

#[test]
fn shortcuts_script_appears_after_startup() {
    let mut console = console();
    let before = route(&mut console, &Method::Get, "/", None).body;
    assert!(!before.contains("addEventListener"));

    console.startup();
    let after = route(&mut console, &Method::Get, "/", None).body;
    assert!(after.contains("getElementById('texto-sentimento')"));
    assert!(after.contains("getElementById('form-gerar').requestSubmit()"));
}

#[test]
fn generation_post_keeps_form_values_and_escapes_output() {
    let mut console = console();
    let reply = route(
        &mut console,
        &Method::Post,
        "/acao/gerar",
        Some("tema=caf%C3%A9+%26+p%C3%A3o&tamanho=curto"),
    );
    assert_eq!(reply.status, 303);

    let page = route(&mut console, &Method::Get, "/", None).body;
    assert!(page.contains("value=\"café &amp; pão\""));
    assert!(page.contains("<option value=\"curto\" selected>"));
    assert!(page.contains("&lt;b&gt;negrito&lt;/b&gt;\n  recuado"));
    assert!(!page.contains("<b>negrito</b>"));
}

#[test]
fn failure_and_transport_error_render_in_their_regions() {
    let mut console = console();
    route(
        &mut console,
        &Method::Post,
        "/acao/resumir",
        Some("texto=abc&tamanho_resumo=longo"),
    );
    route(
        &mut console,
        &Method::Post,
        "/acao/sentimento",
        Some("texto=oi"),
    );

    let summary = route(&mut console, &Method::Get, "/regiao/resultado-resumo", None).body;
    assert!(summary.contains("class=\"resultado visivel erro\""));
    assert!(summary.contains("tamanho longo indisponível"));

    let sentiment = route(&mut console, &Method::Get, "/regiao/resultado-sentimento", None).body;
    assert!(sentiment.contains("Erro na requisição: /sentimento fora do ar"));
}

#[test]
fn blank_post_shows_validation_message() {
    let mut console = console();
    route(&mut console, &Method::Post, "/acao/sentimento", Some("texto=+++"));
    let region = route(&mut console, &Method::Get, "/regiao/resultado-sentimento", None).body;
    assert!(region.contains("Por favor, digite um texto para análise."));
}

#[test]
fn hidden_region_has_no_content() {
    let mut console = console();
    let region = route(&mut console, &Method::Get, "/regiao/resultado-geracao", None).body;
    assert_eq!(
        region,
        "<div id=\"resultado-geracao\" class=\"resultado\"></div>"
    );
}
