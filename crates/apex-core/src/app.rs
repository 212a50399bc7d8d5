//! Update routing: commands, group chatter, button presses and new members.
//!
//! `BotApp` owns all mutable bot state. Adapters turn platform updates into
//! [`IncomingUpdate`] values and feed them to [`BotApp::handle`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    audience::AudienceRegistry,
    broadcast::Broadcaster,
    config::Config,
    domain::{ChatId, ChatKind, Lang},
    formatting::{format_duration, mention_html},
    funnel::{self, CallbackAction, Funnel},
    messaging::{
        port::MessagingPort,
        types::{
            CallbackQuery, Command, IncomingUpdate, InlineButton, InlineKeyboard, MemberJoined,
            OutgoingMessage, TextMessage,
        },
    },
    news::NewsPoller,
    ports::FeedSource,
    seen::SeenSet,
    templates,
    translation::TranslationGateway,
    Result,
};

pub struct BotApp {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    translator: TranslationGateway,
    audience: Arc<Mutex<AudienceRegistry>>,
    funnel: Mutex<Funnel>,
    broadcaster: Broadcaster,
    news: Arc<NewsPoller>,
    started_at: DateTime<Utc>,
}

impl BotApp {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        translator: TranslationGateway,
        feed: Arc<dyn FeedSource>,
        seen: SeenSet,
    ) -> Self {
        let audience = Arc::new(Mutex::new(AudienceRegistry::new()));
        let broadcaster = Broadcaster::new(cfg.clone(), messenger.clone(), audience.clone());
        let news = Arc::new(NewsPoller::new(
            cfg.clone(),
            feed,
            translator.clone(),
            messenger.clone(),
            seen,
        ));
        Self {
            cfg,
            messenger,
            translator,
            audience,
            funnel: Mutex::new(Funnel::new()),
            broadcaster,
            news,
            started_at: Utc::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn broadcaster(&self) -> Broadcaster {
        self.broadcaster.clone()
    }

    pub fn news(&self) -> Arc<NewsPoller> {
        self.news.clone()
    }

    pub async fn active_groups(&self) -> Vec<ChatId> {
        self.audience.lock().await.all()
    }

    pub async fn handle(&self, update: IncomingUpdate) -> Result<()> {
        match update {
            IncomingUpdate::Command(cmd) => self.on_command(cmd).await,
            IncomingUpdate::GroupText(msg) => self.on_group_text(msg).await,
            IncomingUpdate::Callback(q) => self.on_callback(q).await,
            IncomingUpdate::MemberJoined(m) => self.on_member_joined(m).await,
        }
    }

    async fn register(&self, chat: ChatId) {
        if self.audience.lock().await.register(chat) {
            info!(%chat, "group registered");
        }
    }

    async fn reply(&self, cmd: &Command, msg: OutgoingMessage) -> Result<()> {
        self.messenger.reply(cmd.message, &msg).await?;
        Ok(())
    }

    async fn reply_html(&self, cmd: &Command, html: &str) -> Result<()> {
        self.messenger.reply_html(cmd.message, html).await?;
        Ok(())
    }

    async fn on_command(&self, cmd: Command) -> Result<()> {
        debug!(
            command = %cmd.name,
            chat = %cmd.chat_id,
            user = cmd.user_id.0,
            username = cmd.username.as_deref().unwrap_or("-"),
            "command"
        );
        match cmd.name.as_str() {
            "start" => self.cmd_start(&cmd).await,
            "status" => self.cmd_status(&cmd).await,
            "broadcast" => self.cmd_broadcast(&cmd).await,
            "news" => self.cmd_news(&cmd).await,
            other => {
                debug!(command = other, "ignoring unknown command");
                Ok(())
            }
        }
    }

    async fn cmd_start(&self, cmd: &Command) -> Result<()> {
        if cmd.chat_kind == ChatKind::Group {
            self.register(cmd.chat_id).await;
            return self.reply_html(cmd, templates::GROUP_ACTIVATED).await;
        }

        let screen = if cmd.first_arg() == Some("pamm") {
            match self.funnel.lock().await.open_pamm(cmd.user_id) {
                Some(state) => funnel::render(state, &self.cfg),
                None => funnel::language_picker(true),
            }
        } else {
            funnel::language_picker(false)
        };
        self.reply(cmd, screen).await
    }

    async fn cmd_status(&self, cmd: &Command) -> Result<()> {
        let groups = self.audience.lock().await.len();
        let news_sent = self.news.seen_count().await;
        let uptime = format_duration((Utc::now() - self.started_at).num_seconds());
        self.reply_html(cmd, &templates::status(groups, news_sent, &uptime))
            .await
    }

    async fn cmd_broadcast(&self, cmd: &Command) -> Result<()> {
        if cmd.chat_kind == ChatKind::Private {
            return self.reply_html(cmd, templates::BROADCAST_PRIVATE_REJECTED).await;
        }
        if cmd.chat_id == self.cfg.news_chat_id {
            return self.reply_html(cmd, templates::BROADCAST_NEWS_GROUP_REJECTED).await;
        }
        if !self.cfg.is_operator(cmd.user_id.0) {
            return self.reply_html(cmd, templates::NOT_AN_OPERATOR).await;
        }

        self.register(cmd.chat_id).await;
        self.broadcaster.run().await;
        Ok(())
    }

    async fn cmd_news(&self, cmd: &Command) -> Result<()> {
        if cmd.chat_id != self.cfg.news_chat_id {
            return self.reply_html(cmd, templates::NEWS_WRONG_GROUP).await;
        }
        if !self.cfg.is_operator(cmd.user_id.0) {
            return self.reply_html(cmd, templates::NOT_AN_OPERATOR).await;
        }

        self.reply_html(cmd, templates::NEWS_CHECKING).await?;
        match self.news.poll_once().await {
            Ok(report) => info!(
                dispatched = report.dispatched.len(),
                "manual news check finished"
            ),
            Err(e) => error!("manual news check failed: {e}"),
        }
        Ok(())
    }

    async fn on_group_text(&self, msg: TextMessage) -> Result<()> {
        if msg.chat_kind != ChatKind::Group || msg.from_bot {
            return Ok(());
        }
        self.register(msg.chat_id).await;

        let text = msg.text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let pt = self.translator.translate(text, Lang::Pt).await;
        let es = self.translator.translate(text, Lang::Es).await;
        self.messenger
            .reply_html(msg.message, &templates::translation_reply(&pt, &es))
            .await?;
        Ok(())
    }

    async fn on_callback(&self, q: CallbackQuery) -> Result<()> {
        if let Err(e) = self
            .messenger
            .answer_callback_query(&q.callback_id, None)
            .await
        {
            warn!(user = q.user_id.0, "failed to answer callback query: {e}");
        }

        let Some(action) = CallbackAction::parse(&q.data) else {
            debug!(data = %q.data, "ignoring unknown callback data");
            return Ok(());
        };

        let state = self.funnel.lock().await.apply(q.user_id, action);
        debug!(user = q.user_id.0, ?state, "funnel advanced");
        let screen = funnel::render(state, &self.cfg);

        match q.message {
            Some(target) => self.messenger.edit(target, &screen).await,
            None => self
                .messenger
                .send(ChatId(q.user_id.0), &screen)
                .await
                .map(|_| ()),
        }
    }

    async fn on_member_joined(&self, m: MemberJoined) -> Result<()> {
        if m.is_bot {
            return Ok(());
        }
        let mention = mention_html(m.user_id, &m.first_name);

        if m.chat_id == self.cfg.news_chat_id {
            self.messenger
                .send_html(m.chat_id, &templates::news_group_member_welcome(&mention))
                .await?;
            return Ok(());
        }

        let msg = OutgoingMessage::with_keyboard(
            templates::community_member_welcome(&mention),
            InlineKeyboard::single_row(vec![InlineButton::url(
                templates::START_PRIVATE_LABEL,
                self.cfg.start_link("welcome"),
            )]),
        );
        self.messenger.send(m.chat_id, &msg).await?;
        Ok(())
    }
}
