//! Telegram adapter (teloxide).
//!
//! Implements the `apex-core` MessagingPort over the Telegram Bot API and
//! turns teloxide updates into core `IncomingUpdate`s.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    ApiError, RequestError,
};

use tokio::time::sleep;
use tracing::warn;

pub mod handlers;
pub mod router;

use apex_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ButtonAction, InlineKeyboard, OutgoingMessage},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: RequestError) -> Error {
        Error::Delivery(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, RequestError>>,
        Fut::IntoFuture: Send,
    {
        self.retrying(op).await.map_err(Self::map_err)
    }

    async fn retrying<T, Fut>(
        &self,
        mut op: impl FnMut() -> Fut,
    ) -> std::result::Result<T, RequestError>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Err(RequestError::RetryAfter(d)) if attempts < MAX_RETRIES => {
                    attempts += 1;
                    warn!(retry_in = ?d, "telegram rate limit hit, retrying once");
                    sleep(d).await;
                }
                other => return other,
            }
        }
    }

    async fn send_inner(
        &self,
        chat_id: ChatId,
        msg: &OutgoingMessage,
        reply_to: Option<MessageId>,
    ) -> Result<MessageRef> {
        let markup = msg.keyboard.as_ref().and_then(to_markup);
        let sent = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_message(Self::tg_chat(chat_id), msg.html.clone())
                    .parse_mode(ParseMode::Html);
                if let Some(id) = reply_to {
                    req = req.reply_to_message_id(Self::tg_msg_id(id));
                }
                if let Some(m) = &markup {
                    req = req.reply_markup(m.clone());
                }
                req
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(sent.id.0),
        })
    }
}

/// Convert a core keyboard. Buttons whose URL does not parse are dropped.
fn to_markup(keyboard: &InlineKeyboard) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|b| to_button(&b.label, &b.action))
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        return None;
    }
    Some(InlineKeyboardMarkup::new(rows))
}

fn to_button(label: &str, action: &ButtonAction) -> Option<InlineKeyboardButton> {
    match action {
        ButtonAction::Callback(data) => Some(InlineKeyboardButton::callback(label, data.clone())),
        ButtonAction::Url(raw) => match reqwest::Url::parse(raw) {
            Ok(url) => Some(InlineKeyboardButton::url(label, url)),
            Err(e) => {
                warn!(url = %raw, "dropping button with invalid url: {e}");
                None
            }
        },
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send(&self, chat_id: ChatId, msg: &OutgoingMessage) -> Result<MessageRef> {
        self.send_inner(chat_id, msg, None).await
    }

    async fn reply(&self, to: MessageRef, msg: &OutgoingMessage) -> Result<MessageRef> {
        self.send_inner(to.chat_id, msg, Some(to.message_id)).await
    }

    async fn edit(&self, target: MessageRef, msg: &OutgoingMessage) -> Result<()> {
        let markup = msg.keyboard.as_ref().and_then(to_markup);
        let res = self
            .retrying(|| {
                let mut req = self
                    .bot
                    .edit_message_text(
                        Self::tg_chat(target.chat_id),
                        Self::tg_msg_id(target.message_id),
                        msg.html.clone(),
                    )
                    .parse_mode(ParseMode::Html);
                if let Some(m) = &markup {
                    req = req.reply_markup(m.clone());
                }
                req
            })
            .await;

        match res {
            // Same screen pressed twice; Telegram rejects the no-op edit.
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => Err(Self::map_err(e)),
        }
    }

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.with_retry(|| {
            let mut req = self.bot.answer_callback_query(callback_id.to_string());
            if let Some(t) = text {
                req = req.text(t.to_string());
            }
            req
        })
        .await?;
        Ok(())
    }
}
