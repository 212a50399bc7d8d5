//! Periodic marketing broadcast to the registered community groups.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    audience::AudienceRegistry,
    config::Config,
    domain::ChatId,
    messaging::{
        port::MessagingPort,
        types::{InlineButton, InlineKeyboard, OutgoingMessage},
    },
    templates,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<ChatId>,
    pub pruned: Vec<ChatId>,
    /// The news group was registered and skipped.
    pub excluded: bool,
}

#[derive(Clone)]
pub struct Broadcaster {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    audience: Arc<Mutex<AudienceRegistry>>,
}

impl Broadcaster {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        audience: Arc<Mutex<AudienceRegistry>>,
    ) -> Self {
        Self {
            cfg,
            messenger,
            audience,
        }
    }

    pub fn message(&self) -> OutgoingMessage {
        OutgoingMessage::with_keyboard(
            templates::broadcast(&self.cfg),
            InlineKeyboard::single_row(vec![InlineButton::url(
                templates::BROADCAST_BUTTON_LABEL,
                self.cfg.start_link("pamm"),
            )]),
        )
    }

    /// Send the broadcast to every registered chat except the news group.
    ///
    /// Works on a snapshot of the registry; the lock is not held while
    /// sending. Chats that fail delivery are unregistered.
    pub async fn run(&self) -> BroadcastReport {
        let targets = { self.audience.lock().await.all() };
        let msg = self.message();
        let mut report = BroadcastReport::default();

        for chat in targets {
            if chat == self.cfg.news_chat_id {
                debug!(%chat, "skipping news group in broadcast");
                report.excluded = true;
                continue;
            }

            match self.messenger.send(chat, &msg).await {
                Ok(_) => report.delivered.push(chat),
                Err(e) => {
                    warn!(%chat, "broadcast delivery failed, dropping chat: {e}");
                    self.audience.lock().await.unregister(chat);
                    report.pruned.push(chat);
                }
            }
        }

        info!(
            delivered = report.delivered.len(),
            pruned = report.pruned.len(),
            "broadcast finished"
        );
        report
    }
}
