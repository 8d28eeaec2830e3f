//! The router: one inbound text in, at most one reply out.
//!
//! Handles the complete message flow:
//! 1. Slash commands (/start, /help, /cancel) win over everything
//! 2. An active settings flow consumes the input
//! 3. Otherwise the message is classified and dispatched
//!
//! Unrecognized free text outside the settings flow is silently ignored.

use crate::intent::{classify, parse_command, Command, Intent};
use crate::reply::{Keyboard, Reply};
use crate::session::{Session, SessionState, SettingsField};
use sputnik_providers::Providers;

/// Keyboard caption that ends the settings flow.
const DONE_LABEL: &str = "Готово";

/// Prompt shown when entering (or re-prompting within) the settings flow.
const SETTINGS_PROMPT: &str = "Что изменить?";

/// Help text listing the user-facing commands.
const HELP_TEXT: &str = "Доступные команды:\n\n\
    Факт - случайный интересный факт\n\
    Погода <город> - узнать погоду\n\
    Курс - курс валют\n\
    Настройки - изменить настройки\n\
    /cancel - отмена";

/// Routes inbound messages through the dispatcher and the settings flow.
pub struct Router {
    providers: Providers,
}

impl Router {
    /// Create a router over the given providers.
    pub fn new(providers: Providers) -> Self {
        Self { providers }
    }

    /// Handle one inbound message against the chat's session.
    ///
    /// Returns `None` when the message should be ignored (unknown free text,
    /// unknown slash command).
    pub async fn handle(
        &self,
        text: &str,
        first_name: Option<&str>,
        session: &mut Session,
    ) -> Option<Reply> {
        match parse_command(text) {
            Some(Command::Start) => return Some(greeting(first_name)),
            Some(Command::Help) => return Some(Reply::text(HELP_TEXT)),
            Some(Command::Cancel) => return Some(cancel(session)),
            None => {}
        }
        if text.trim_start().starts_with('/') {
            // Unknown commands never reach the conversation handlers
            tracing::debug!(text = %text, "Ignoring unknown command");
            return None;
        }

        match session.state() {
            SessionState::Choosing => Some(self.settings_choice(text, session)),
            SessionState::TypingReply => Some(save_setting(text, session)),
            SessionState::Idle => self.dispatch(text, session).await,
        }
    }

    /// Classify idle-state input and answer it.
    async fn dispatch(&self, text: &str, session: &mut Session) -> Option<Reply> {
        let intent = classify(text);
        tracing::debug!(intent = intent.as_str(), "Message classified");

        match intent {
            Intent::Fact => {
                let fact = self.providers.random_fact().await;
                Some(Reply::text(format!("📚 Факт:\n{fact}")))
            }
            Intent::Weather => Some(self.weather_reply(text).await),
            Intent::Exchange => Some(Reply::text(self.providers.exchange_rates().await)),
            Intent::Settings => {
                session.begin_settings();
                tracing::info!("Entering settings flow");
                Some(Reply::with_keyboard(SETTINGS_PROMPT, Keyboard::settings_menu()))
            }
            Intent::Help => Some(Reply::text(HELP_TEXT)),
            Intent::Unknown => None,
        }
    }

    /// Weather needs a city argument: everything after the trigger word,
    /// original case, joined with single spaces.
    async fn weather_reply(&self, text: &str) -> Reply {
        let mut tokens = text.split_whitespace();
        let _trigger = tokens.next();
        let city = tokens.collect::<Vec<_>>().join(" ");

        if city.is_empty() {
            Reply::text("Укажите город, например: Погода Москва")
        } else {
            Reply::text(self.providers.weather(&city).await)
        }
    }

    /// CHOOSING state: field labels and the Done caption are recognized;
    /// anything else re-prompts with the same keyboard.
    fn settings_choice(&self, text: &str, session: &mut Session) -> Reply {
        if text == DONE_LABEL {
            return done(session);
        }

        match SettingsField::from_label(text) {
            Some(field) => {
                session.choose_field(field);
                Reply::text(field.prompt())
            }
            None => {
                tracing::debug!(text = %text, "Unrecognized settings choice, re-prompting");
                Reply::with_keyboard(SETTINGS_PROMPT, Keyboard::settings_menu())
            }
        }
    }
}

/// TYPING_REPLY state: the Done caption ends the flow, any other text is the
/// value, stored verbatim.
fn save_setting(text: &str, session: &mut Session) -> Reply {
    if text == DONE_LABEL {
        return done(session);
    }

    match session.save_pending(text) {
        Some(field) => {
            tracing::info!(field = field.label(), "Setting saved");
            Reply::with_keyboard(
                format!("Сохранено: {} = {}\nИзменить что-то еще?", field.label(), text),
                Keyboard::settings_menu(),
            )
        }
        None => done(session),
    }
}

/// DONE transition: summarize saved settings in insertion order and go idle.
fn done(session: &mut Session) -> Reply {
    let text = if session.settings().is_empty() {
        "Настройки не изменены".to_string()
    } else {
        let mut out = String::from("Настройки сохранены:\n");
        for (field, value) in session.settings().iter() {
            out.push_str(&format!("{}: {}\n", field.label(), value));
        }
        out
    };

    session.finish();
    Reply::with_keyboard(text, Keyboard::main_menu())
}

/// CANCEL transition: leave the flow from any state, settings untouched.
fn cancel(session: &mut Session) -> Reply {
    session.finish();
    Reply::with_keyboard("Отменено", Keyboard::main_menu())
}

/// /start greeting with the main menu.
fn greeting(first_name: Option<&str>) -> Reply {
    let name = first_name.unwrap_or("друг");
    Reply::with_keyboard(
        format!("Привет, {name}!\nВыберите действие:"),
        Keyboard::main_menu(),
    )
}
