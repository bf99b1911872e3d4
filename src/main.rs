use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use inferencia::cli::{self, Formato, HistoryFormat};

#[derive(Debug, Parser)]
#[command(name = "inferencia")]
#[command(about = "Console for the sentiment, generation and summarization API")]
struct App {
    /// Output format: texto (default) or html
    #[arg(long, global = true, default_value = "texto")]
    formato: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check API status and load model info at the same time
    Painel,
    /// Check API status
    Status,
    /// Show model information
    Modelo,
    /// Analyze the sentiment of a text
    Sentimento {
        /// Text to analyze
        #[arg(default_value = "")]
        texto: String,
    },
    /// Generate text about a theme
    Gerar {
        /// Theme of the text
        #[arg(default_value = "")]
        tema: String,
        /// curto, medio or longo (default from config)
        #[arg(long)]
        tamanho: Option<String>,
    },
    /// Summarize a text
    Resumir {
        /// Text to summarize
        texto: Option<String>,
        /// Read the text from a file instead
        #[arg(long, conflicts_with = "texto")]
        arquivo: Option<PathBuf>,
        /// curto, medio or longo (default from config)
        #[arg(long)]
        tamanho: Option<String>,
    },
    /// Serve the console page
    Web {
        /// Listen address, e.g. 127.0.0.1:8080
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser
        #[arg(long)]
        sem_navegador: bool,
    },
    /// Summarize the local activity log
    Historico {
        /// Only include the last N days
        #[arg(long)]
        dias: Option<u32>,
        /// Output format: tabela (default) or json
        #[arg(long = "saida", default_value = "tabela")]
        saida: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration and its sources
    Show,
    /// Write the default config to ~/.inferencia/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `api.base_url`
    Set { key: String, value: String },
    /// Restore the default config
    Reset,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();
    let formato = Formato::from_str_opt(Some(&app.formato));

    match app.command {
        Commands::Painel => cli::run_painel(formato),
        Commands::Status => cli::run_status(formato),
        Commands::Modelo => cli::run_modelo(formato),
        Commands::Sentimento { texto } => cli::run_sentimento(&texto, formato),
        Commands::Gerar { tema, tamanho } => cli::run_gerar(&tema, tamanho.as_deref(), formato),
        Commands::Resumir {
            texto,
            arquivo,
            tamanho,
        } => cli::run_resumir(
            texto.as_deref(),
            arquivo.as_deref(),
            tamanho.as_deref(),
            formato,
        ),
        Commands::Web {
            addr,
            sem_navegador,
        } => cli::run_web(addr.as_deref(), sem_navegador),
        Commands::Historico { dias, saida } => {
            cli::run_historico(dias, HistoryFormat::from_str_opt(Some(&saida)))
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
