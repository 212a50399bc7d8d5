use apex_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    messaging::types::CallbackQuery,
};

pub(crate) fn to_callback(q: &teloxide::types::CallbackQuery) -> CallbackQuery {
    CallbackQuery {
        callback_id: q.id.clone(),
        user_id: UserId(q.from.id.0 as i64),
        data: q.data.clone().unwrap_or_default(),
        message: q.message.as_ref().map(|m| MessageRef {
            chat_id: ChatId(m.chat.id.0),
            message_id: MessageId(m.id.0),
        }),
    }
}
