use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::io::KeyValueStore;

use super::{commands::BuilderCommand, controller::FormBuilder};

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// Where keyboard focus is when a key arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// The form canvas or a non-editing control.
    Canvas,
    /// An input, textarea or select has focus; editing keys belong to it.
    TextInput,
}

impl ShortcutContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "canvas" => Some(ShortcutContext::Canvas),
            "textInput" => Some(ShortcutContext::TextInput),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Undo,
    Redo,
    DeleteSelection,
    DuplicateSelection,
}

impl RawAction {
    fn into_command(self) -> BuilderCommand {
        match self {
            RawAction::Undo => BuilderCommand::Undo,
            RawAction::Redo => BuilderCommand::Redo,
            RawAction::DeleteSelection => BuilderCommand::DeleteSelection,
            RawAction::DuplicateSelection => BuilderCommand::DuplicateSelection,
        }
    }
}

struct KeyBinding {
    command: BuilderCommand,
    contexts: Vec<ShortcutContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Self {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| ShortcutContext::from_str(ctx))
            .collect::<Vec<_>>();
        assert!(
            !contexts.is_empty(),
            "keymap entry {} must declare at least one context",
            raw.id
        );
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo).unwrap_or_else(|err| {
                    panic!("failed to parse combo '{combo}' for {}: {err}", raw.id)
                })
            })
            .collect::<Vec<_>>();
        assert!(
            !combos.is_empty(),
            "keymap entry {} must declare combos",
            raw.id
        );
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        let snippet = format!("{combos_display} -> {}", raw.description);
        Self {
            command: raw.action.into_command(),
            contexts,
            combos,
            snippet,
        }
    }

    fn matches(&self, key: &KeyEvent, context: ShortcutContext) -> Option<BuilderCommand> {
        if !self.contexts.contains(&context) {
            return None;
        }
        self.combos
            .iter()
            .find(|pattern| pattern.matches(key))
            .map(|_| self.command.clone())
    }
}

struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    display: String,
}

impl KeyPattern {
    fn parse(combo: &str) -> Result<Self, String> {
        let display = combo.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                "cmd" | "super" | "meta" => required |= KeyModifiers::SUPER,
                other => {
                    return Err(format!("unsupported modifier '{other}'"));
                }
            }
        }
        Ok(Self {
            matcher,
            required,
            display,
        })
    }

    /// Modifiers must match exactly, so `Ctrl+Z` and `Ctrl+Shift+Z` differ.
    fn matches(&self, key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release
            && self.matcher.matches(&key.code)
            && key.modifiers == self.required
    }
}

#[derive(Clone)]
enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "delete" | "del" => CodeMatcher::Literal(KeyCode::Delete),
            "backspace" => CodeMatcher::Literal(KeyCode::Backspace),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }
}

static KEYMAP: LazyLock<Vec<KeyBinding>> = LazyLock::new(|| {
    let raw_entries: Vec<RawEntry> =
        serde_json::from_str(keymap_source!()).expect("invalid keymap/default.keymap.json");
    raw_entries.into_iter().map(KeyBinding::from_raw).collect()
});

pub fn classify_key(key: &KeyEvent, context: ShortcutContext) -> Option<BuilderCommand> {
    KEYMAP
        .iter()
        .find_map(|binding| binding.matches(key, context))
}

pub fn help_text(context: ShortcutContext) -> Option<String> {
    let snippets = KEYMAP
        .iter()
        .filter(|binding| binding.contexts.contains(&context))
        .map(|binding| binding.snippet.clone())
        .collect::<Vec<_>>();
    if snippets.is_empty() {
        None
    } else {
        Some(snippets.join(" • "))
    }
}

impl<S: KeyValueStore> FormBuilder<S> {
    /// Run the shortcut bound to `key`, if any. Returns whether anything changed.
    pub fn handle_key(&mut self, key: &KeyEvent, context: ShortcutContext) -> bool {
        match classify_key(key, context) {
            Some(command) => self.dispatch(command),
            None => false,
        }
    }
}
