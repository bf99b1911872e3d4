//! CLI command implementations for the inference console.
//!
//! Provides subcommand handlers for:
//! - `inferencia painel` — status and model info, fetched together
//! - `inferencia status` / `inferencia modelo` — one informational card
//! - `inferencia sentimento|gerar|resumir` — run one inference action
//! - `inferencia web` — serve the console page
//! - `inferencia historico` — activity summary from the local log
//! - `inferencia config show|init|set|reset` — configuration management

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::activity::ActivityLog;
use crate::activity::reporter::{self, ActivitySummary};
use crate::api::ApiClient;
use crate::api::types::Tamanho;
use crate::config::{self, ConsoleConfig};
use crate::console::{Console, FormState, region_for};
use crate::handlers::Action;
use crate::view::{DisplayRegion, RegionWatcher, StateKind};
use crate::web;

/// How a region is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formato {
    /// Coloured terminal block.
    Texto,
    /// The region's HTML element, as the web page would embed it.
    Html,
}

impl Formato {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("html") => Self::Html,
            _ => Self::Texto,
        }
    }
}

/// Output format for `inferencia historico`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Tabela,
    Json,
}

impl HistoryFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Tabela,
        }
    }
}

/// Console wired to the real API client and the configured activity log.
pub fn build_console(config: &ConsoleConfig) -> Console<ApiClient> {
    Console::new(
        ApiClient::from_config(&config.api),
        FormState::from_config(&config.form),
        ActivityLog::from_config(&config.logging),
    )
}

// ---------------------------------------------------------------------------
// inferencia painel / status / modelo
// ---------------------------------------------------------------------------

pub fn run_painel(formato: Formato) -> Result<ExitCode> {
    let mut console = build_console(&config::load());
    console.watch(loading_watcher(formato));
    console.startup();

    let page = console.page();
    let regions = [&page.status, &page.model_info];
    for region in regions {
        print_region(region, formato);
        if formato == Formato::Texto {
            println!();
        }
    }
    Ok(exit_code(&regions))
}

pub fn run_status(formato: Formato) -> Result<ExitCode> {
    run_action(Action::CheckStatus, FormState::default(), formato)
}

pub fn run_modelo(formato: Formato) -> Result<ExitCode> {
    run_action(Action::LoadModelInfo, FormState::default(), formato)
}

// ---------------------------------------------------------------------------
// inferencia sentimento / gerar / resumir
// ---------------------------------------------------------------------------

pub fn run_sentimento(texto: &str, formato: Formato) -> Result<ExitCode> {
    let form = FormState {
        texto_sentimento: texto.to_string(),
        ..FormState::default()
    };
    run_action(Action::AnalyzeSentiment, form, formato)
}

pub fn run_gerar(tema: &str, tamanho: Option<&str>, formato: Formato) -> Result<ExitCode> {
    let config = config::load();
    let form = FormState {
        tema_texto: tema.to_string(),
        tamanho_texto: resolve_size(tamanho, config.form.tamanho_texto)?,
        ..FormState::from_config(&config.form)
    };
    run_action_with(&config, Action::GenerateText, form, formato)
}

/// Summarize `texto`, or the contents of `arquivo` when given.
pub fn run_resumir(
    texto: Option<&str>,
    arquivo: Option<&Path>,
    tamanho: Option<&str>,
    formato: Formato,
) -> Result<ExitCode> {
    let texto = match arquivo {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => texto.unwrap_or_default().to_string(),
    };

    let config = config::load();
    let form = FormState {
        texto_resumir: texto,
        tamanho_resumo: resolve_size(tamanho, config.form.tamanho_resumo)?,
        ..FormState::from_config(&config.form)
    };
    run_action_with(&config, Action::SummarizeText, form, formato)
}

fn resolve_size(raw: Option<&str>, fallback: Tamanho) -> Result<Tamanho> {
    match raw {
        None => Ok(fallback),
        Some(raw) => Tamanho::parse(raw)
            .with_context(|| format!("tamanho inválido: '{raw}' (use curto, medio ou longo)")),
    }
}

fn run_action(action: Action, form: FormState, formato: Formato) -> Result<ExitCode> {
    run_action_with(&config::load(), action, form, formato)
}

fn run_action_with(
    config: &ConsoleConfig,
    action: Action,
    form: FormState,
    formato: Formato,
) -> Result<ExitCode> {
    let mut console = build_console(config);
    *console.form_mut() = form;
    console.watch(loading_watcher(formato));
    console.dispatch(action);

    let region = console.page().region(region_for(action));
    print_region(region, formato);
    Ok(exit_code(&[region]))
}

/// Prints loading states to stderr as they happen, so the indicator is
/// visible while the request runs and stdout only gets the final block.
fn loading_watcher(formato: Formato) -> Option<RegionWatcher> {
    if formato != Formato::Texto {
        return None;
    }
    Some(Arc::new(|region: &DisplayRegion| {
        if region.state().kind() == StateKind::Loading {
            eprintln!("{}", region.to_terminal());
        }
    }))
}

fn print_region(region: &DisplayRegion, formato: Formato) {
    match formato {
        Formato::Texto => println!("{}", region.to_terminal()),
        Formato::Html => println!("{}", region.to_html()),
    }
}

/// `1` when any of the regions ended in an error.
fn exit_code(regions: &[&DisplayRegion]) -> ExitCode {
    if regions
        .iter()
        .any(|r| r.state().kind() == StateKind::Error)
    {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ---------------------------------------------------------------------------
// inferencia web
// ---------------------------------------------------------------------------

pub fn run_web(addr: Option<&str>, no_browser: bool) -> Result<ExitCode> {
    let mut config = config::load();
    if let Some(addr) = addr {
        config.web.addr = addr.to_string();
    }
    if no_browser {
        config.web.open_browser = false;
    }

    let mut console = build_console(&config);
    web::serve(&mut console, &config.web)?;
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// inferencia historico
// ---------------------------------------------------------------------------

pub fn run_historico(dias: Option<u32>, format: HistoryFormat) -> Result<ExitCode> {
    let log = ActivityLog::from_config(&config::load().logging);
    let Some(path) = log.path() else {
        println!("{}", "Registro de atividade desativado.".yellow());
        return Ok(ExitCode::SUCCESS);
    };

    let summary = reporter::summarize(&log.read_since_days(dias));
    if summary.total_actions == 0 {
        println!(
            "{}",
            format!("Nenhuma atividade registrada em {}.", path.display()).yellow()
        );
        return Ok(ExitCode::SUCCESS);
    }

    match format {
        HistoryFormat::Json => print_history_json(&summary)?,
        HistoryFormat::Tabela => print_history_table(&summary, dias),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_history_table(summary: &ActivitySummary, dias: Option<u32>) {
    let title = match dias {
        Some(n) => format!("Atividade (últimos {n} dias)"),
        None => "Atividade".to_string(),
    };
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(64));
    println!();
    println!("  {} {}", "Ações:  ".bold(), summary.total_actions);
    println!("  {} {}", "Tokens: ".bold(), format_number(summary.total_tokens));
    println!();

    println!(
        "  {:<12} {:>6} {:>8} {:>7} {:>7} {:>8} {:>10}",
        "Ação", "Total", "Sucesso", "Falha", "Rede", "Entrada", "Latência"
    );
    println!("  {}", "-".repeat(62));

    for (i, stat) in summary.actions.iter().enumerate() {
        let line = format!(
            "  {:<12} {:>6} {:>7.0}% {:>7} {:>7} {:>8} {:>8.0}ms",
            stat.action,
            stat.count,
            stat.success_pct(),
            stat.failure,
            stat.transport_error,
            stat.validation_error,
            stat.avg_latency_ms,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_history_json(summary: &ActivitySummary) -> Result<()> {
    let value = serde_json::json!({
        "total_actions": summary.total_actions,
        "total_tokens": summary.total_tokens,
        "actions": summary.actions.iter().map(|s| serde_json::json!({
            "action": s.action,
            "count": s.count,
            "success": s.success,
            "failure": s.failure,
            "transport_error": s.transport_error,
            "validation_error": s.validation_error,
            "avg_latency_ms": s.avg_latency_ms,
        })).collect::<Vec<_>>(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&value).context("failed to serialize summary")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// inferencia config
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<ExitCode> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Configuração efetiva".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Fontes (maior prioridade por último):".dimmed());
    println!("  {} padrões embutidos", "·".dimmed());
    print_source("~/.inferencia/config.toml", global_exists);
    print_source(".inferencia.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "variáveis de ambiente INFERENCIA_*".dimmed()
    );

    Ok(ExitCode::SUCCESS)
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            format!("{name} (não encontrado)").dimmed()
        );
    }
}

pub fn run_config_init(force: bool) -> Result<ExitCode> {
    let path = config::init_config(force)?;
    println!(
        "{} Configuração gravada em {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}

pub fn run_config_set(key: &str, value: &str) -> Result<ExitCode> {
    config::set_config_value(key, value)?;
    println!("{} {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(ExitCode::SUCCESS)
}

pub fn run_config_reset() -> Result<ExitCode> {
    let path = config::reset_config()?;
    println!(
        "{} Configuração restaurada em {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
