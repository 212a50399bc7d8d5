use apex_core::{
    domain::{ChatId, ChatKind, MessageId, MessageRef, UserId},
    messaging::types::Command,
};
use teloxide::types::Message;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedCommand {
    /// Lowercased, without `/` and `@botname`.
    pub name: String,
    /// The `@botname` suffix, if any.
    pub mention: Option<String>,
    pub args: String,
}

impl ParsedCommand {
    /// `/cmd@other_bot` in a group is meant for another bot.
    pub fn is_for(&self, bot_username: &str) -> bool {
        self.mention
            .as_deref()
            .map_or(true, |m| m.eq_ignore_ascii_case(bot_username))
    }
}

pub(crate) fn parse_command(text: &str) -> ParsedCommand {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let args = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let mention = head
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    ParsedCommand {
        name,
        mention,
        args,
    }
}

pub(crate) fn chat_kind(msg: &Message) -> ChatKind {
    if msg.chat.is_private() {
        ChatKind::Private
    } else {
        ChatKind::Group
    }
}

pub(crate) fn message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    }
}

/// `None` when the text is not a command for this bot or has no sender.
pub(crate) fn to_command(msg: &Message, text: &str, bot_username: &str) -> Option<Command> {
    if !text.starts_with('/') {
        return None;
    }
    let parsed = parse_command(text);
    if parsed.name.is_empty() || !parsed.is_for(bot_username) {
        return None;
    }
    let user = msg.from()?;

    Some(Command {
        chat_id: ChatId(msg.chat.id.0),
        chat_kind: chat_kind(msg),
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        name: parsed.name,
        args: parsed.args,
        message: message_ref(msg),
    })
}
