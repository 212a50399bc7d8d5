use std::sync::Arc;

use apex_core::{
    config::Config,
    seen::{FileSeenLog, SeenSet},
};
use apex_google::GoogleTranslateClient;
use apex_rss::RssFeedClient;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), apex_core::Error> {
    apex_core::logging::init("apex")?;

    let cfg = Arc::new(Config::load()?);

    let log = FileSeenLog::new(cfg.sent_news_file.clone());
    info!(path = %log.path().display(), "opening seen news log");
    let seen = SeenSet::open(Box::new(log))?;

    let translator = Arc::new(GoogleTranslateClient::new()?);
    let feed = Arc::new(RssFeedClient::new(cfg.news_feed_url.clone())?);

    apex_telegram::router::run_polling(cfg, translator, feed, seen)
        .await
        .map_err(|e| apex_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
