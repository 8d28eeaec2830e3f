//! Per-chat conversation state.
//!
//! A [`Session`] exists for the lifetime of the process only; settings never
//! survive a restart. All mutation goes through the transition methods, which
//! keep the invariant: `pending_field` is set exactly while the state is
//! [`SessionState::TypingReply`].

use serde::{Deserialize, Serialize};

/// Position within the settings dialogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Not in the settings flow.
    #[default]
    Idle,
    /// Waiting for a field selection.
    Choosing,
    /// Waiting for a value for the selected field.
    TypingReply,
}

impl SessionState {
    /// Get the state as a string, for logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Choosing => "choosing",
            Self::TypingReply => "typing_reply",
        }
    }
}

/// The closed set of user-editable settings.
///
/// The variants replace the stringly-typed keys of the settings dialogue;
/// the external Russian labels are preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsField {
    Name,
    City,
}

impl SettingsField {
    /// The keyboard caption for this field.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Имя",
            Self::City => "Город",
        }
    }

    /// Resolve a keyboard caption back to a field.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Имя" => Some(Self::Name),
            "Город" => Some(Self::City),
            _ => None,
        }
    }

    /// The prompt asking the user to type this field's value.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Name => "Введите ваше имя:",
            Self::City => "Введите ваш город:",
        }
    }
}

/// Ordered field/value record.
///
/// Keys are unique; rewriting a field keeps its original position so the
/// final summary lists fields in first-save order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    entries: Vec<(SettingsField, String)>,
}

impl SessionSettings {
    /// Store a value, replacing any previous value for the same field.
    pub fn set(&mut self, field: SettingsField, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    /// Get the stored value for a field.
    pub fn get(&self, field: SettingsField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Whether nothing has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of saved fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over saved entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SettingsField, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Per-chat session.
///
/// Created on first interaction, owned by the bot service's chat map,
/// dropped with the process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    pending_field: Option<SettingsField>,
    settings: SessionSettings,
}

impl Session {
    /// Create a fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current conversation state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The field awaiting a value, if any.
    pub const fn pending_field(&self) -> Option<SettingsField> {
        self.pending_field
    }

    /// Saved settings.
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Enter the field-selection state.
    pub fn begin_settings(&mut self) {
        self.state = SessionState::Choosing;
        self.pending_field = None;
    }

    /// A field was chosen: wait for its value.
    pub fn choose_field(&mut self, field: SettingsField) {
        self.pending_field = Some(field);
        self.state = SessionState::TypingReply;
    }

    /// Store the typed value for the pending field and return to choosing.
    ///
    /// Returns the field that was saved, or `None` when no field was pending
    /// (which the transition methods never allow while typing).
    pub fn save_pending(&mut self, value: &str) -> Option<SettingsField> {
        let field = self.pending_field.take()?;
        self.settings.set(field, value.to_string());
        self.state = SessionState::Choosing;
        Some(field)
    }

    /// Leave the settings flow. Saved settings are retained.
    pub fn finish(&mut self) {
        self.state = SessionState::Idle;
        self.pending_field = None;
    }
}
