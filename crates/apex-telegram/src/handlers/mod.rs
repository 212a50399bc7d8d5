//! Telegram update handlers.
//!
//! Each handler converts a teloxide update into a core `IncomingUpdate` and
//! hands it to `BotApp`. Updates the bot does not act on are dropped here.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, ChatMemberUpdated, Message},
};
use tracing::{debug, warn};

use apex_core::{
    domain::{ChatId, UserId},
    messaging::types::{IncomingUpdate, TextMessage},
};

use crate::router::AppState;

mod callback;
mod commands;
mod member;

async fn dispatch(state: &AppState, update: IncomingUpdate) {
    if let Err(e) = state.app.handle(update).await {
        warn!("update handling failed: {e}");
    }
}

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    dispatch(&state, IncomingUpdate::Callback(callback::to_callback(&q))).await;
    Ok(())
}

pub async fn handle_chat_member(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    if let Some(joined) = member::to_member_joined(&upd) {
        dispatch(&state, IncomingUpdate::MemberJoined(joined)).await;
    }
    Ok(())
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.starts_with('/') {
        match commands::to_command(&msg, text, &state.cfg.bot_username) {
            Some(cmd) => dispatch(&state, IncomingUpdate::Command(cmd)).await,
            None => debug!(chat = msg.chat.id.0, "ignoring command for another bot"),
        }
        return Ok(());
    }

    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }
    let Some(user) = msg.from() else {
        return Ok(());
    };

    let update = IncomingUpdate::GroupText(TextMessage {
        chat_id: ChatId(msg.chat.id.0),
        chat_kind: commands::chat_kind(&msg),
        user_id: UserId(user.id.0 as i64),
        from_bot: user.is_bot,
        text: text.to_string(),
        message: commands::message_ref(&msg),
    });
    dispatch(&state, update).await;
    Ok(())
}
