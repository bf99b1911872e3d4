//! Structured content of a display region.
//!
//! A [`Block`] is an ordered list of [`Line`]s built by the templates. It
//! renders two ways: as an HTML fragment for the web page and as coloured
//! text for the terminal. Text taken from the API or the user is escaped for
//! HTML but never reflowed, so line breaks and runs of spaces survive.

use colored::Colorize;

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// Background of a preserved-whitespace panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Neutral background, primary accent border.
    Plain,
    /// Light green background, success accent border.
    Highlight,
}

impl Panel {
    fn class(self) -> &'static str {
        match self {
            Self::Plain => "painel-texto",
            Self::Highlight => "painel-texto painel-destaque",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Spinner plus a short label.
    Loading(String),
    Heading(String),
    /// `label: value` on one line.
    Field { label: String, value: String },
    Text(String),
    /// Optional caption followed by a bullet list.
    List {
        label: Option<String>,
        items: Vec<String>,
    },
    Badge {
        class: String,
        tone: Tone,
        text: String,
    },
    /// Multi-line text shown verbatim.
    Preformatted {
        label: Option<String>,
        text: String,
        panel: Panel,
    },
    /// Collapsed panel revealing verbatim text.
    Details { summary: String, text: String },
    /// Small secondary text (token counts, timestamps).
    Muted(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub lines: Vec<Line>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn heading(self, text: impl Into<String>) -> Self {
        self.push(Line::Heading(text.into()))
    }

    pub fn field(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Line::Field {
            label: label.into(),
            value: value.into(),
        })
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(Line::Text(text.into()))
    }

    pub fn muted(self, text: impl Into<String>) -> Self {
        self.push(Line::Muted(text.into()))
    }

    /// First heading, used as a one-line summary in logs.
    pub fn title(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Heading(h) => Some(h.as_str()),
            _ => None,
        })
    }

    /// Concatenated plain text of every line, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = Vec::new();
        for line in &self.lines {
            match line {
                Line::Loading(s) | Line::Heading(s) | Line::Text(s) | Line::Muted(s) => {
                    out.push(s.clone())
                }
                Line::Field { label, value } => out.push(format!("{label}: {value}")),
                Line::List { label, items } => {
                    out.extend(label.iter().cloned());
                    out.extend(items.iter().cloned());
                }
                Line::Badge { text, .. } => out.push(text.clone()),
                Line::Preformatted { label, text, .. } => {
                    out.extend(label.iter().cloned());
                    out.push(text.clone());
                }
                Line::Details { summary, text } => {
                    out.push(summary.clone());
                    out.push(text.clone());
                }
            }
        }
        out.join("\n")
    }

    // -----------------------------------------------------------------------
    // HTML
    // -----------------------------------------------------------------------

    pub fn to_html(&self) -> String {
        self.lines.iter().map(line_html).collect::<Vec<_>>().join("\n")
    }

    // -----------------------------------------------------------------------
    // Terminal
    // -----------------------------------------------------------------------

    pub fn to_terminal(&self) -> String {
        let mut out = Vec::new();
        for line in &self.lines {
            match line {
                Line::Loading(label) => out.push(format!("⏳ {}", label.yellow())),
                Line::Heading(h) => out.push(h.bold().to_string()),
                Line::Field { label, value } => {
                    out.push(format!("  {} {}", format!("{label}:").bold(), value))
                }
                Line::Text(t) => out.push(format!("  {t}")),
                Line::List { label, items } => {
                    if let Some(label) = label {
                        out.push(format!("  {}", format!("{label}:").bold()));
                    }
                    for item in items {
                        out.push(format!("    • {item}"));
                    }
                }
                Line::Badge { tone, text, .. } => {
                    let badge = format!(" {text} ");
                    let badge = match tone {
                        Tone::Positive => badge.black().on_green(),
                        Tone::Negative => badge.white().on_red(),
                        Tone::Neutral => badge.black().on_yellow(),
                    };
                    out.push(format!("  {badge}"));
                }
                Line::Preformatted { label, text, .. } => {
                    if let Some(label) = label {
                        out.push(format!("  {}", label.bold()));
                    }
                    out.extend(indent_verbatim(text, "  │ "));
                }
                Line::Details { summary, text } => {
                    out.push(format!("  ▸ {}", summary.cyan()));
                    out.extend(
                        indent_verbatim(text, "  │ ")
                            .into_iter()
                            .map(|l| l.dimmed().to_string()),
                    );
                }
                Line::Muted(t) => out.push(format!("  {}", t.dimmed())),
            }
        }
        out.join("\n")
    }
}

fn line_html(line: &Line) -> String {
    match line {
        Line::Loading(label) => format!(
            r#"<div class="loading"></div> <span>{}</span>"#,
            escape_html(label)
        ),
        Line::Heading(h) => format!("<h3>{}</h3>", escape_html(h)),
        Line::Field { label, value } => format!(
            "<p><strong>{}:</strong> {}</p>",
            escape_html(label),
            escape_html(value)
        ),
        Line::Text(t) => format!("<p>{}</p>", escape_html(t)),
        Line::List { label, items } => {
            let mut html = String::new();
            if let Some(label) = label {
                html.push_str(&format!("<p><strong>{}:</strong></p>\n", escape_html(label)));
            }
            html.push_str(r#"<ul class="lista">"#);
            for item in items {
                html.push_str(&format!("<li>{}</li>", escape_html(item)));
            }
            html.push_str("</ul>");
            html
        }
        Line::Badge { class, text, .. } => format!(
            r#"<div class="badge-sentimento {}">{}</div>"#,
            escape_html(class),
            escape_html(text)
        ),
        Line::Preformatted { label, text, panel } => {
            let label = label
                .as_ref()
                .map(|l| format!("<strong>{}</strong><br>", escape_html(l)))
                .unwrap_or_default();
            format!(
                r#"<div class="{}"><p style="white-space: pre-wrap; line-height: 1.8;">{}{}</p></div>"#,
                panel.class(),
                label,
                escape_html(text)
            )
        }
        Line::Details { summary, text } => format!(
            r#"<details><summary>{}</summary><div class="painel-texto"><p style="white-space: pre-wrap; line-height: 1.8;">{}</p></div></details>"#,
            escape_html(summary),
            escape_html(text)
        ),
        Line::Muted(t) => format!(r#"<p class="nota">{}</p>"#, escape_html(t)),
    }
}

/// Prefix every line of `text`, keeping blank lines and inner spacing.
fn indent_verbatim(text: &str, prefix: &str) -> Vec<String> {
    text.split('\n').map(|l| format!("{prefix}{l}")).collect()
}

/// Escape HTML special characters. Whitespace is left untouched.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
