//! RSS feed adapter for the market-news relay.

use std::time::Duration;

use apex_core::{
    errors::Error,
    ports::{FeedEntry, FeedSource},
    Result,
};
use async_trait::async_trait;
use tracing::debug;

const USER_AGENT: &str = concat!("apex-assistant/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct RssFeedClient {
    url: String,
    http: reqwest::Client,
}

impl RssFeedClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::External(format!("feed http client: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for RssFeedClient {
    async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Feed(format!("request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Feed(format!(
                "fetching {} failed: {}",
                self.url,
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Feed(format!("read error: {e}")))?;

        let entries = parse_feed(&body)?;
        debug!(url = %self.url, entries = entries.len(), "feed fetched");
        Ok(entries)
    }
}

/// Parse an RSS 2.0 document into entries, in document order.
///
/// Items missing a title or link are kept as-is; the poller decides what to skip.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let channel =
        rss::Channel::read_from(bytes).map_err(|e| Error::Feed(format!("parse error: {e}")))?;

    Ok(channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            id: item.guid().map(|g| g.value().to_string()),
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
        })
        .collect())
}
