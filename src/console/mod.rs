//! The console: page regions, form inputs, shortcuts and the startup routine.
//!
//! [`Console`] is the single owner of the page state. Front ends (the CLI
//! and the web server) fill in the form, then ask the console to dispatch an
//! action or a key press; the console runs the matching handler against its
//! region and appends the outcome to the activity log.

pub mod keys;

use crate::activity::ActivityLog;
use crate::api::Transport;
use crate::api::types::Tamanho;
use crate::config::schema::FormConfig;
use crate::handlers::{self, Action, ActionReport};
use crate::view::{Page, RegionId, RegionWatcher};

pub use keys::{InputField, Key, KeyPress, KeyResponse, Keymap};

/// Current values of the page's inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub texto_sentimento: String,
    pub tema_texto: String,
    pub tamanho_texto: Tamanho,
    pub texto_resumir: String,
    pub tamanho_resumo: Tamanho,
}

impl FormState {
    /// Empty inputs with the configured default sizes.
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            tamanho_texto: config.tamanho_texto,
            tamanho_resumo: config.tamanho_resumo,
            ..Self::default()
        }
    }
}

/// Region each action renders into.
pub fn region_for(action: Action) -> RegionId {
    match action {
        Action::CheckStatus => RegionId::Status,
        Action::LoadModelInfo => RegionId::ModelInfo,
        Action::AnalyzeSentiment => RegionId::Sentiment,
        Action::GenerateText => RegionId::Generation,
        Action::SummarizeText => RegionId::Summary,
    }
}

pub struct Console<T: Transport> {
    transport: T,
    page: Page,
    form: FormState,
    keymap: Keymap,
    log: ActivityLog,
}

impl<T: Transport> Console<T> {
    pub fn new(transport: T, form: FormState, log: ActivityLog) -> Self {
        Self {
            transport,
            page: Page::new(),
            form,
            keymap: Keymap::default(),
            log,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Observe every region state change, including the loading state that
    /// is only live while a request is in flight.
    pub fn watch(&mut self, watcher: Option<RegionWatcher>) {
        self.page.watch(watcher);
    }

    /// Page-ready routine.
    ///
    /// Runs [`Console::refresh`], then registers the keyboard shortcuts.
    /// Returns the two reports in `[status, model info]` order.
    pub fn startup(&mut self) -> [ActionReport; 2] {
        eprintln!("[inferencia] 🚀 Interface da API de IA carregada!");
        eprintln!("[inferencia] 📍 URL Base: {}", self.transport.base_url());

        let reports = self.refresh();

        self.keymap = Keymap::standard();
        eprintln!("[inferencia] ✅ Todos os atalhos de teclado configurados!");

        reports
    }

    /// Fetch status and model info at the same time, each into its own
    /// region. Runs on every page load of the web console.
    pub fn refresh(&mut self) -> [ActionReport; 2] {
        let transport = &self.transport;
        let Page {
            status, model_info, ..
        } = &mut self.page;

        let (status_report, model_report) = std::thread::scope(|scope| {
            let status_task = scope.spawn(move || handlers::check_status(transport, status));
            let model_report = handlers::load_model_info(transport, model_info);
            let status_report = status_task
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (status_report, model_report)
        });

        self.log.record(&status_report);
        self.log.record(&model_report);

        [status_report, model_report]
    }

    /// Run one action against its region using the current form values.
    pub fn dispatch(&mut self, action: Action) -> ActionReport {
        let transport = &self.transport;
        let form = &self.form;
        let report = match action {
            Action::CheckStatus => handlers::check_status(transport, &mut self.page.status),
            Action::LoadModelInfo => {
                handlers::load_model_info(transport, &mut self.page.model_info)
            }
            Action::AnalyzeSentiment => handlers::analyze_sentiment(
                transport,
                &mut self.page.sentiment,
                &form.texto_sentimento,
            ),
            Action::GenerateText => handlers::generate_text(
                transport,
                &mut self.page.generation,
                &form.tema_texto,
                form.tamanho_texto,
            ),
            Action::SummarizeText => handlers::summarize_text(
                transport,
                &mut self.page.summary,
                &form.texto_resumir,
                form.tamanho_resumo,
            ),
        };
        self.log.record(&report);
        report
    }

    /// Feed a key press from `field` through the shortcuts.
    ///
    /// Returns the report when the press triggered an action, `None` when the
    /// key should keep its default behaviour. Shortcuts are inactive until
    /// [`Console::startup`] has run.
    pub fn key_press(&mut self, field: InputField, press: KeyPress) -> Option<ActionReport> {
        match self.keymap.resolve(field, press) {
            KeyResponse::Trigger(action) => Some(self.dispatch(action)),
            KeyResponse::Default => None,
        }
    }
}
