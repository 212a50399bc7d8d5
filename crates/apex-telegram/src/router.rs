use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{debug, info, warn};

use apex_core::{
    app::BotApp,
    config::Config,
    messaging::port::MessagingPort,
    ports::{FeedSource, Translator},
    scheduler::{JobScheduler, JobSpec},
    seen::SeenSet,
    translation::TranslationGateway,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub app: Arc<BotApp>,
}

pub async fn run_polling(
    cfg: Arc<Config>,
    translator: Arc<dyn Translator>,
    feed: Arc<dyn FeedSource>,
    seen: SeenSet,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    match bot.get_me().await {
        Ok(me) => {
            info!(username = me.username(), "apex assistant started");
            if !me.username().eq_ignore_ascii_case(&cfg.bot_username) {
                warn!(
                    configured = %cfg.bot_username,
                    actual = me.username(),
                    "BOT_USERNAME does not match the bot; deep links will point elsewhere"
                );
            }
        }
        Err(e) => warn!("get_me failed: {e}"),
    }
    info!(
        news_chat = %cfg.news_chat_id,
        feed = %cfg.news_feed_url,
        seen = seen.len(),
        "configuration loaded"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let app = Arc::new(BotApp::new(
        cfg.clone(),
        messenger,
        TranslationGateway::new(translator),
        feed,
        seen,
    ));

    let scheduler = start_jobs(&cfg, &app);
    let state = Arc::new(AppState { cfg, app });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_chat_member().endpoint(handlers::handle_chat_member))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    scheduler.stop().await;
    info!("apex assistant stopped");
    Ok(())
}

/// Schedule the periodic broadcast and the news poll.
pub fn start_jobs(cfg: &Config, app: &Arc<BotApp>) -> JobScheduler {
    let scheduler = JobScheduler::new();

    let broadcaster = app.broadcaster();
    scheduler.spawn(
        JobSpec {
            name: "broadcast",
            first_delay: cfg.broadcast_interval,
            period: cfg.broadcast_interval,
        },
        move || {
            let broadcaster = broadcaster.clone();
            async move {
                broadcaster.run().await;
                Ok::<_, apex_core::Error>(())
            }
        },
    );

    let news = app.news();
    scheduler.spawn(
        JobSpec {
            name: "news",
            first_delay: cfg.news_initial_delay,
            period: cfg.news_poll_interval,
        },
        move || {
            let news = news.clone();
            async move {
                let report = news.poll_once().await?;
                debug!(
                    fetched = report.fetched,
                    dispatched = report.dispatched.len(),
                    unrecorded = report.unrecorded,
                    "news poll finished"
                );
                Ok::<_, apex_core::Error>(())
            }
        },
    );

    scheduler
}
