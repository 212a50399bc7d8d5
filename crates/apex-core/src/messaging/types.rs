use crate::domain::{ChatId, ChatKind, MessageRef, UserId};

/// Cross-messenger incoming update model.
///
/// Telegram-specific fields stay in the Telegram adapter; only what the bot
/// logic reads is carried here.
#[derive(Clone, Debug)]
pub enum IncomingUpdate {
    Command(Command),
    GroupText(TextMessage),
    Callback(CallbackQuery),
    MemberJoined(MemberJoined),
}

#[derive(Clone, Debug)]
pub struct Command {
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    pub user_id: UserId,
    pub username: Option<String>,
    /// Lowercased command name without the leading `/` or `@botname` suffix.
    pub name: String,
    pub args: String,
    pub message: MessageRef,
}

impl Command {
    /// First whitespace-separated argument, if any (`/start pamm` → `pamm`).
    pub fn first_arg(&self) -> Option<&str> {
        self.args.split_whitespace().next()
    }
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub chat_kind: ChatKind,
    pub user_id: UserId,
    pub from_bot: bool,
    pub text: String,
    pub message: MessageRef,
}

#[derive(Clone, Debug)]
pub struct CallbackQuery {
    pub callback_id: String,
    pub user_id: UserId,
    pub data: String,
    /// The message carrying the pressed button, when Telegram still has it.
    pub message: Option<MessageRef>,
}

#[derive(Clone, Debug)]
pub struct MemberJoined {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub first_name: String,
    pub is_bot: bool,
}

/// What pressing an inline button does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub action: ButtonAction,
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Inline keyboard laid out as rows of buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    /// All buttons side by side.
    pub fn single_row(buttons: Vec<InlineButton>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}

/// A fully rendered outbound message: Telegram HTML plus optional buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub html: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl OutgoingMessage {
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(html: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self {
            html: html.into(),
            keyboard: Some(keyboard),
        }
    }
}
