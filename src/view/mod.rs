//! Display regions and the page that owns them.
//!
//! Every feature writes into exactly one region. A region is either hidden
//! (before its first use) or in one of three visible states: loading,
//! success or error. Switching state replaces the previous content, so only
//! one state is ever active per region.

pub mod block;
pub mod templates;

use std::fmt;
use std::sync::Arc;

use block::Block;

// ---------------------------------------------------------------------------
// Region identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Status,
    ModelInfo,
    Sentiment,
    Generation,
    Summary,
}

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        RegionId::Status,
        RegionId::ModelInfo,
        RegionId::Sentiment,
        RegionId::Generation,
        RegionId::Summary,
    ];

    /// Element id on the web page.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Status => "status-api",
            Self::ModelInfo => "info-modelo",
            Self::Sentiment => "resultado-sentimento",
            Self::Generation => "resultado-geracao",
            Self::Summary => "resultado-resumo",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.dom_id() == id)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

// ---------------------------------------------------------------------------
// Region state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RegionState {
    #[default]
    Hidden,
    Loading(Block),
    Success(Block),
    Error(Block),
}

/// Discriminant of [`RegionState`], handy for assertions and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Hidden,
    Loading,
    Success,
    Error,
}

impl RegionState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Hidden => StateKind::Hidden,
            Self::Loading(_) => StateKind::Loading,
            Self::Success(_) => StateKind::Success,
            Self::Error(_) => StateKind::Error,
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            Self::Hidden => None,
            Self::Loading(b) | Self::Success(b) | Self::Error(b) => Some(b),
        }
    }

    /// CSS classes toggled on the region element.
    pub fn css_classes(&self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Loading(_) => "visivel",
            Self::Success(_) => "visivel sucesso",
            Self::Error(_) => "visivel erro",
        }
    }
}

// ---------------------------------------------------------------------------
// Display region
// ---------------------------------------------------------------------------

/// Called with the region after every state change.
///
/// Front ends use it to show a state while the handler that set it is still
/// waiting on the API (the CLI prints the loading line this way).
pub type RegionWatcher = Arc<dyn Fn(&DisplayRegion) + Send + Sync>;

#[derive(Clone)]
pub struct DisplayRegion {
    id: RegionId,
    state: RegionState,
    watcher: Option<RegionWatcher>,
}

impl fmt::Debug for DisplayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRegion")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("watched", &self.watcher.is_some())
            .finish()
    }
}

impl DisplayRegion {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            state: RegionState::Hidden,
            watcher: None,
        }
    }

    pub fn set_watcher(&mut self, watcher: Option<RegionWatcher>) {
        self.watcher = watcher;
    }

    fn set_state(&mut self, state: RegionState) {
        self.state = state;
        if let Some(watcher) = &self.watcher {
            watcher(self);
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn state(&self) -> &RegionState {
        &self.state
    }

    pub fn show_loading(&mut self, label: &str) {
        self.set_state(RegionState::Loading(templates::loading(label)));
    }

    pub fn show_success(&mut self, block: Block) {
        self.set_state(RegionState::Success(block));
    }

    /// Standard `❌ Erro` block with `message`.
    pub fn show_error(&mut self, message: &str) {
        self.set_state(RegionState::Error(templates::error(message)));
    }

    pub fn show_error_block(&mut self, block: Block) {
        self.set_state(RegionState::Error(block));
    }

    /// Inner HTML of the region (empty while hidden).
    pub fn inner_html(&self) -> String {
        self.state.block().map(Block::to_html).unwrap_or_default()
    }

    /// Full element, ready to drop into the page.
    pub fn to_html(&self) -> String {
        let classes = match self.state.css_classes() {
            "" => "resultado".to_string(),
            extra => format!("resultado {extra}"),
        };
        format!(
            r#"<div id="{}" class="{}">{}</div>"#,
            self.id.dom_id(),
            classes,
            self.inner_html()
        )
    }

    pub fn to_terminal(&self) -> String {
        self.state.block().map(Block::to_terminal).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The five regions of the console.
///
/// Fields are public so callers can borrow two regions mutably at once (the
/// startup routine fills status and model info in parallel).
#[derive(Debug, Clone)]
pub struct Page {
    pub status: DisplayRegion,
    pub model_info: DisplayRegion,
    pub sentiment: DisplayRegion,
    pub generation: DisplayRegion,
    pub summary: DisplayRegion,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            status: DisplayRegion::new(RegionId::Status),
            model_info: DisplayRegion::new(RegionId::ModelInfo),
            sentiment: DisplayRegion::new(RegionId::Sentiment),
            generation: DisplayRegion::new(RegionId::Generation),
            summary: DisplayRegion::new(RegionId::Summary),
        }
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, id: RegionId) -> &DisplayRegion {
        match id {
            RegionId::Status => &self.status,
            RegionId::ModelInfo => &self.model_info,
            RegionId::Sentiment => &self.sentiment,
            RegionId::Generation => &self.generation,
            RegionId::Summary => &self.summary,
        }
    }

    /// Install `watcher` on every region (or remove it with `None`).
    pub fn watch(&mut self, watcher: Option<RegionWatcher>) {
        for id in RegionId::ALL {
            self.region_mut(id).set_watcher(watcher.clone());
        }
    }

    pub fn region_mut(&mut self, id: RegionId) -> &mut DisplayRegion {
        match id {
            RegionId::Status => &mut self.status,
            RegionId::ModelInfo => &mut self.model_info,
            RegionId::Sentiment => &mut self.sentiment,
            RegionId::Generation => &mut self.generation,
            RegionId::Summary => &mut self.summary,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
