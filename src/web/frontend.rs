//! Embedded HTML for the console page.
//!
//! The page is rendered server-side on every `GET /`: the stylesheet and
//! the page skeleton are constants, the regions and the form values come
//! from the [`Console`]. The only script is the keyboard shortcut table.

use crate::api::Transport;
use crate::api::types::Tamanho;
use crate::console::{Console, InputField};
use crate::view::RegionId;
use crate::view::block::escape_html;

const STYLE: &str = r##"
:root {
  --cor-primaria: #4f46e5;
  --cor-sucesso: #16a34a;
  --cor-erro: #dc2626;
  --cor-fundo: #f8fafc;
  --cor-cartao: #ffffff;
  --cor-borda: #e2e8f0;
  --cor-texto: #0f172a;
  --cor-texto-secundario: #64748b;
  --raio: 8px;
  --fonte: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--cor-fundo); color: var(--cor-texto); font-family: var(--fonte); line-height: 1.6; }
.app { max-width: 960px; margin: 0 auto; padding: 24px; }
header { margin-bottom: 24px; }
header h1 { font-size: 28px; }
header p { color: var(--cor-texto-secundario); }

.grade { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-bottom: 24px; }
.cartao { background: var(--cor-cartao); border: 1px solid var(--cor-borda); border-radius: var(--raio); padding: 20px; margin-bottom: 16px; }
.cartao h2 { font-size: 18px; margin-bottom: 12px; }

textarea, input[type=text], select {
  width: 100%; padding: 10px; border: 1px solid var(--cor-borda); border-radius: 6px;
  font-family: inherit; font-size: 14px; margin-bottom: 10px;
}
textarea { min-height: 110px; resize: vertical; }
button {
  background: var(--cor-primaria); color: #fff; border: none; border-radius: 6px;
  padding: 10px 18px; font-size: 14px; font-weight: 600; cursor: pointer;
}
button.secundario { background: transparent; color: var(--cor-primaria); border: 1px solid var(--cor-primaria); padding: 4px 10px; font-size: 12px; }

.resultado { display: none; margin-top: 16px; padding: 16px; border-radius: var(--raio); border: 1px solid var(--cor-borda); }
.resultado.visivel { display: block; }
.resultado.sucesso { border-color: var(--cor-sucesso); }
.resultado.erro { border-color: var(--cor-erro); background: #fef2f2; }
.resultado h3 { margin-bottom: 8px; }
#status-api, #info-modelo { display: block; }

.loading {
  display: inline-block; width: 16px; height: 16px; vertical-align: middle;
  border: 3px solid var(--cor-borda); border-top-color: var(--cor-primaria);
  border-radius: 50%; animation: girar 0.8s linear infinite;
}
@keyframes girar { to { transform: rotate(360deg); } }

.badge-sentimento { display: inline-block; padding: 6px 14px; border-radius: 16px; font-weight: 700; margin: 6px 0; }
.badge-positivo { background: #dcfce7; color: #166534; }
.badge-negativo { background: #fee2e2; color: #991b1b; }
.badge-neutro { background: #fef9c3; color: #854d0e; }

.painel-texto { background: var(--cor-fundo); padding: 16px; border-radius: var(--raio); margin-top: 12px; border-left: 4px solid var(--cor-primaria); }
.painel-destaque { background: #f0fdf4; border-left-color: var(--cor-sucesso); }
details { margin-top: 12px; }
details summary { cursor: pointer; color: var(--cor-primaria); font-weight: 600; }
.lista { margin-left: 20px; margin-top: 8px; font-size: 0.9rem; }
.nota { font-size: 0.85rem; color: var(--cor-texto-secundario); margin-top: 12px; }
"##;

/// Render the full page for the console's current state.
pub fn render_page<T: Transport>(console: &Console<T>) -> String {
    let page = console.page();
    let form = console.form();

    format!(
        r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Interface da API de IA</title>
<style>{style}</style>
</head>
<body>
<div class="app">
<header>
  <h1>🤖 Interface da API de IA</h1>
  <p>API: {base}</p>
</header>

<div class="grade">
  <section class="cartao">
    <h2>Status da API</h2>
    {status}
    <form id="form-status" method="post" action="/acao/status"><button class="secundario" type="submit">Verificar novamente</button></form>
  </section>
  <section class="cartao">
    <h2>Modelo</h2>
    {model}
    <form id="form-modelo" method="post" action="/acao/modelo"><button class="secundario" type="submit">Recarregar</button></form>
  </section>
</div>

<section class="cartao">
  <h2>😊 Análise de Sentimento</h2>
  <form id="form-sentimento" method="post" action="/acao/sentimento">
    <textarea id="{sentiment_field}" name="texto" placeholder="Digite um texto para analisar...">{texto_sentimento}</textarea>
    <button type="submit">Analisar Sentimento</button>
  </form>
  {sentiment}
</section>

<section class="cartao">
  <h2>✍️ Geração de Texto</h2>
  <form id="form-gerar" method="post" action="/acao/gerar">
    <input type="text" id="{theme_field}" name="tema" placeholder="Digite um tema..." value="{tema_texto}">
    <select id="tamanho-texto" name="tamanho">{tamanho_texto}</select>
    <button type="submit">Gerar Texto</button>
  </form>
  {generation}
</section>

<section class="cartao">
  <h2>📝 Resumo de Texto</h2>
  <form id="form-resumir" method="post" action="/acao/resumir">
    <textarea id="{summary_field}" name="texto" placeholder="Cole um texto longo para resumir...">{texto_resumir}</textarea>
    <select id="tamanho-resumo" name="tamanho_resumo">{tamanho_resumo}</select>
    <button type="submit">Resumir Texto</button>
  </form>
  {summary}
</section>
</div>
<script>
{script}</script>
</body>
</html>
"##,
        style = STYLE,
        base = escape_html(console.transport().base_url()),
        status = page.region(RegionId::Status).to_html(),
        model = page.region(RegionId::ModelInfo).to_html(),
        sentiment_field = InputField::SentimentText.dom_id(),
        texto_sentimento = escape_html(&form.texto_sentimento),
        sentiment = page.region(RegionId::Sentiment).to_html(),
        theme_field = InputField::Theme.dom_id(),
        tema_texto = escape_html(&form.tema_texto),
        tamanho_texto = size_options(form.tamanho_texto),
        generation = page.region(RegionId::Generation).to_html(),
        summary_field = InputField::SummaryText.dom_id(),
        texto_resumir = escape_html(&form.texto_resumir),
        tamanho_resumo = size_options(form.tamanho_resumo),
        summary = page.region(RegionId::Summary).to_html(),
        script = console.keymap().to_script(),
    )
}

fn size_options(selected: Tamanho) -> String {
    Tamanho::ALL
        .iter()
        .map(|t| {
            let attr = if *t == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{attr}>{}</option>"#, t.as_str(), t.label())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_options_mark_selection() {
        let html = size_options(Tamanho::Longo);
        assert!(html.contains(r#"<option value="longo" selected>Longo</option>"#));
        assert!(html.contains(r#"<option value="curto">Curto</option>"#));
        assert_eq!(html.matches("selected").count(), 1);
    }
}
