//! Transport-neutral outbound reply types.
//!
//! A [`Keyboard`] is just a grid of selectable labels; each channel adapter
//! renders it in its own markup (Telegram: `ReplyKeyboardMarkup`, CLI:
//! bracketed rows).

/// A grid of selectable labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// Build a keyboard from label rows.
    pub fn new<R, L>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// The main menu offered after /start and at the end of the settings flow.
    pub fn main_menu() -> Self {
        Self::new([
            vec!["Факт", "Погода"],
            vec!["Курс", "Настройки"],
            vec!["Помощь"],
        ])
    }

    /// The field-selection menu of the settings flow.
    pub fn settings_menu() -> Self {
        Self::new([vec!["Имя", "Город"], vec!["Готово"]])
    }
}

/// One outbound reply: text plus an optional keyboard.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    /// A plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    /// A text reply with an attached keyboard.
    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_menu_labels() {
        let kb = Keyboard::main_menu();
        assert_eq!(kb.rows.len(), 3);
        assert_eq!(kb.rows[0], vec!["Факт", "Погода"]);
        assert_eq!(kb.rows[1], vec!["Курс", "Настройки"]);
        assert_eq!(kb.rows[2], vec!["Помощь"]);
    }

    #[test]
    fn settings_menu_labels() {
        let kb = Keyboard::settings_menu();
        assert_eq!(kb.rows, vec![vec!["Имя", "Город"], vec!["Готово"]]);
    }

    #[test]
    fn reply_constructors() {
        let plain = Reply::text("hi");
        assert_eq!(plain.text, "hi");
        assert!(plain.keyboard.is_none());

        let with_kb = Reply::with_keyboard("pick", Keyboard::settings_menu());
        assert!(with_kb.keyboard.is_some());
    }
}
