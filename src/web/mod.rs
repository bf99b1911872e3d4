//! Embedded web console.
//!
//! A small synchronous HTTP server (`tiny_http`) that serves the console
//! page and runs actions posted from its forms:
//!
//! - `GET /` — refresh status and model info, then render the page
//! - `POST /acao/<acao>` — run an action, then `303` back to
//!   `/?acao=<acao>` (which renders without refreshing)
//! - `GET /regiao/<id>` — one region's element, for scripted refreshes
//!
//! Launched via `inferencia web` (default: `http://127.0.0.1:8080`).

mod forms;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::Transport;
use crate::config::schema::WebConfig;
use crate::console::Console;
use crate::handlers::Action;
use crate::view::RegionId;

pub use forms::{apply_to_form, parse_form};
pub use frontend::render_page;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the console server and block on it.
///
/// Runs the console's startup routine first, so the status and model cards
/// are filled before the first page load. Requests are handled one at a
/// time; a slow API call holds the next request until it returns.
pub fn serve<T: Transport>(console: &mut Console<T>, config: &WebConfig) -> Result<()> {
    let addr = config.addr.as_str();
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("inferencia console running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    console.startup();

    if config.open_browser {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = if matches!(method, Method::Post) {
            let mut buf = Vec::new();
            match request.as_reader().read_to_end(&mut buf) {
                Ok(_) => handle(console, &method, &url, Some(&buf)),
                Err(_) => Reply::bad_request(),
            }
        } else {
            handle(console, &method, &url, None)
        };
        let status = reply.status;
        let _ = request.respond(reply.into_response());

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Transport-independent response, converted to `tiny_http` at the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
        }
    }

    fn redirect(to: &str) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: Some(to.to_string()),
        }
    }

    fn bad_request() -> Self {
        Self::html(400, "<h1>400</h1><p>Requisição inválida</p>".to_string())
    }

    fn not_found() -> Self {
        Self::html(404, "<h1>404</h1><p>Página não encontrada</p>".to_string())
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut resp = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes("Content-Type", self.content_type) {
            resp = resp.with_header(header);
        }
        if let Some(location) = self.location
            && let Ok(header) = Header::from_bytes("Location", location.as_bytes())
        {
            resp = resp.with_header(header);
        }
        resp
    }
}

/// Decode a raw request body, then [`route`] it.
///
/// A body that is not UTF-8 is rejected with `400` before any action runs.
pub fn handle<T: Transport>(
    console: &mut Console<T>,
    method: &Method,
    url: &str,
    body: Option<&[u8]>,
) -> Reply {
    match body.map(std::str::from_utf8).transpose() {
        Ok(body) => route(console, method, url, body),
        Err(_) => Reply::bad_request(),
    }
}

/// Dispatch one request against the console.
pub fn route<T: Transport>(
    console: &mut Console<T>,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            // A fresh load re-checks the API; the redirect after an action
            // only shows its result.
            let after_action = forms::parse_form(query).iter().any(|(k, _)| k == "acao");
            if !after_action {
                console.refresh();
            }
            Reply::html(200, frontend::render_page(console))
        }
        (&Method::Post, p) if p.starts_with("/acao/") => {
            let Some(action) = Action::from_name(&p["/acao/".len()..]) else {
                return Reply::not_found();
            };
            let pairs = forms::parse_form(body.unwrap_or(""));
            forms::apply_to_form(action, &pairs, console.form_mut());
            console.dispatch(action);
            Reply::redirect(&format!("/?acao={}", action.as_str()))
        }
        (&Method::Get, p) if p.starts_with("/regiao/") => {
            match RegionId::from_dom_id(&p["/regiao/".len()..]) {
                Some(id) => Reply::html(200, console.page().region(id).to_html()),
                None => Reply::not_found(),
            }
        }
        _ => Reply::not_found(),
    }
}

/// Best-effort attempt to open a URL in the default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use serde_json::{Value, json};

    use super::*;
    use crate::activity::ActivityLog;
    use crate::api::ApiRequest;
    use crate::console::FormState;

    /// Answers by endpoint; anything unknown is a transport error.
    struct ByEndpoint;

    impl Transport for ByEndpoint {
        fn send(&self, request: &ApiRequest) -> Result<Value> {
            match request.endpoint.as_str() {
                "/status" => Ok(json!({"status": "online", "mensagem": "API ok"})),
                "/sentimento" => Ok(json!({
                    "sucesso": true,
                    "texto_original": request.body.as_ref().map(|b| b["texto"].clone()),
                    "sentimento": "POSITIVO",
                    "tokens_usados": 4
                })),
                other => Err(anyhow!("Erro na requisição: sem rota {other}")),
            }
        }

        fn base_url(&self) -> &str {
            "http://test/api"
        }
    }

    fn console() -> Console<ByEndpoint> {
        Console::new(ByEndpoint, FormState::default(), ActivityLog::disabled())
    }

    #[test]
    fn index_renders_page() {
        let mut console = console();
        let reply = route(&mut console, &Method::Get, "/?x=1", None);
        assert_eq!(reply.status, 200);
        assert!(reply.body.contains("id=\"form-sentimento\""));
        assert!(reply.body.contains("http://test/api"));
    }

    #[test]
    fn post_action_runs_and_redirects() {
        let mut console = console();
        let reply = route(
            &mut console,
            &Method::Post,
            "/acao/sentimento",
            Some("texto=I+love+this%21"),
        );
        assert_eq!(reply.status, 303);
        assert_eq!(reply.location.as_deref(), Some("/?acao=sentimento"));
        assert_eq!(console.form().texto_sentimento, "I love this!");

        let page = route(&mut console, &Method::Get, "/?acao=sentimento", None).body;
        assert!(page.contains("badge-positivo"));
        assert!(page.contains("Tokens utilizados: 4"));
    }

    #[test]
    fn region_fragment_by_dom_id() {
        let mut console = console();
        route(&mut console, &Method::Post, "/acao/status", Some(""));
        let reply = route(&mut console, &Method::Get, "/regiao/status-api", None);
        assert_eq!(reply.status, 200);
        assert!(reply.body.starts_with("<div id=\"status-api\""));
        assert!(reply.body.contains("API ok"));
    }

    #[test]
    fn fresh_load_rechecks_status_but_redirect_does_not() {
        let mut console = console();
        route(&mut console, &Method::Get, "/?acao=gerar", None);
        assert_eq!(
            console.page().region(RegionId::Status).state().kind(),
            crate::view::StateKind::Hidden
        );

        let page = route(&mut console, &Method::Get, "/", None).body;
        assert!(page.contains("API ok"));
        assert!(page.contains("Última verificação:"));
    }

    #[test]
    fn non_utf8_body_is_rejected_before_dispatch() {
        let mut console = console();
        console.form_mut().texto_sentimento = "anterior".to_string();

        let reply = handle(
            &mut console,
            &Method::Post,
            "/acao/sentimento",
            Some(&[b't', b'e', b'x', b't', b'o', b'=', 0xff, 0xfe]),
        );
        assert_eq!(reply.status, 400);
        assert_eq!(console.form().texto_sentimento, "anterior");
        assert_eq!(
            console.page().region(RegionId::Sentiment).state().kind(),
            crate::view::StateKind::Hidden
        );

        let ok = handle(&mut console, &Method::Post, "/acao/sentimento", Some(b"texto=oi"));
        assert_eq!(ok.status, 303);
    }

    #[test]
    fn unknown_routes_are_404() {
        let mut console = console();
        assert_eq!(route(&mut console, &Method::Post, "/acao/apagar", None).status, 404);
        assert_eq!(route(&mut console, &Method::Get, "/regiao/nada", None).status, 404);
        assert_eq!(route(&mut console, &Method::Get, "/acao/status", None).status, 404);
        assert_eq!(route(&mut console, &Method::Delete, "/", None).status, 404);
    }

    #[test]
    fn redirect_response_carries_location() {
        let resp = Reply::redirect("/").into_response();
        assert_eq!(resp.status_code(), StatusCode(303));
        assert!(
            resp.headers()
                .iter()
                .any(|h| h.field.equiv("Location") && h.value.as_str() == "/")
        );
    }
}
