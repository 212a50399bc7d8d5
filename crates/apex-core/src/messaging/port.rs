use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::OutgoingMessage,
    Result,
};

/// Outbound messaging port.
///
/// Telegram is the only implementation; the core never sees teloxide types.
/// Every method may fail with [`crate::Error::Delivery`] and callers decide
/// whether that is fatal (it never is for broadcasts or news items).
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send(&self, chat_id: ChatId, msg: &OutgoingMessage) -> Result<MessageRef>;

    /// Send into the chat of `to`, quoting it.
    async fn reply(&self, to: MessageRef, msg: &OutgoingMessage) -> Result<MessageRef>;

    /// Replace text and keyboard of an existing bot message.
    async fn edit(&self, target: MessageRef, msg: &OutgoingMessage) -> Result<()>;

    async fn answer_callback_query(&self, callback_id: &str, text: Option<&str>) -> Result<()>;

    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        self.send(chat_id, &OutgoingMessage::html(html)).await
    }

    async fn reply_html(&self, to: MessageRef, html: &str) -> Result<MessageRef> {
        self.reply(to, &OutgoingMessage::html(html)).await
    }
}
