//! Keyboard shortcuts on the console's text inputs.
//!
//! Two bindings exist: Enter in the sentiment text box analyses it (Shift+Enter
//! still inserts a newline) and Enter in the theme box generates text. The
//! same table drives both the in-process [`Keymap::resolve`] and the script
//! embedded in the web page.

use crate::handlers::Action;

/// Text inputs on the console page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    SentimentText,
    Theme,
    SummaryText,
}

impl InputField {
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::SentimentText => "texto-sentimento",
            Self::Theme => "tema-texto",
            Self::SummaryText => "texto-resumir",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

impl Key {
    /// Name as reported by `KeyboardEvent.key`.
    fn event_name(self) -> Option<&'static str> {
        match self {
            Self::Enter => Some("Enter"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What the input should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Suppress the default behaviour and run the action.
    Trigger(Action),
    /// Let the input handle the key normally.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub field: InputField,
    pub key: Key,
    /// When false, the binding ignores presses with Shift held.
    pub with_shift: bool,
    pub action: Action,
}

impl KeyBinding {
    fn matches(&self, field: InputField, press: KeyPress) -> bool {
        self.field == field && self.key == press.key && (self.with_shift || !press.shift)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    /// The console's shortcuts.
    pub fn standard() -> Self {
        Self {
            bindings: vec![
                KeyBinding {
                    field: InputField::SentimentText,
                    key: Key::Enter,
                    with_shift: false,
                    action: Action::AnalyzeSentiment,
                },
                KeyBinding {
                    field: InputField::Theme,
                    key: Key::Enter,
                    with_shift: true,
                    action: Action::GenerateText,
                },
            ],
        }
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn resolve(&self, field: InputField, press: KeyPress) -> KeyResponse {
        self.bindings
            .iter()
            .find(|b| b.matches(field, press))
            .map_or(KeyResponse::Default, |b| KeyResponse::Trigger(b.action))
    }

    /// Browser-side listeners for every binding.
    ///
    /// Each listener prevents the default key behaviour and submits the form
    /// `form-<action>`.
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for binding in &self.bindings {
            let Some(key) = binding.key.event_name() else {
                continue;
            };
            let shift_guard = if binding.with_shift {
                ""
            } else {
                " && !e.shiftKey"
            };
            script.push_str(&format!(
                "document.getElementById('{field}').addEventListener('keypress', function (e) {{\n  \
                 if (e.key === '{key}'{shift_guard}) {{\n    \
                 e.preventDefault();\n    \
                 document.getElementById('form-{action}').requestSubmit();\n  \
                 }}\n}});\n",
                field = binding.field.dom_id(),
                action = binding.action.as_str(),
            ));
        }
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_on_sentiment_triggers_but_shift_enter_does_not() {
        let keymap = Keymap::standard();
        assert_eq!(
            keymap.resolve(InputField::SentimentText, KeyPress::plain(Key::Enter)),
            KeyResponse::Trigger(Action::AnalyzeSentiment)
        );
        assert_eq!(
            keymap.resolve(InputField::SentimentText, KeyPress::shifted(Key::Enter)),
            KeyResponse::Default
        );
    }

    #[test]
    fn enter_on_theme_triggers_with_or_without_shift() {
        let keymap = Keymap::standard();
        for press in [KeyPress::plain(Key::Enter), KeyPress::shifted(Key::Enter)] {
            assert_eq!(
                keymap.resolve(InputField::Theme, press),
                KeyResponse::Trigger(Action::GenerateText)
            );
        }
    }

    #[test]
    fn other_keys_and_fields_fall_through() {
        let keymap = Keymap::standard();
        assert_eq!(
            keymap.resolve(InputField::Theme, KeyPress::plain(Key::Char('a'))),
            KeyResponse::Default
        );
        assert_eq!(
            keymap.resolve(InputField::SummaryText, KeyPress::plain(Key::Enter)),
            KeyResponse::Default
        );
        assert_eq!(
            keymap.resolve(InputField::SentimentText, KeyPress::plain(Key::Other)),
            KeyResponse::Default
        );
    }

    #[test]
    fn script_registers_both_listeners() {
        let script = Keymap::standard().to_script();
        assert!(script.contains("getElementById('texto-sentimento')"));
        assert!(script.contains("e.key === 'Enter' && !e.shiftKey"));
        assert!(script.contains("getElementById('form-sentimento')"));
        assert!(script.contains("getElementById('tema-texto')"));
        assert!(script.contains("getElementById('form-gerar')"));
        assert_eq!(script.matches("preventDefault").count(), 2);
    }
}
