//! Market-news relay: RSS headlines → three-language posts in the news group.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    domain::Lang,
    messaging::{
        port::MessagingPort,
        types::{InlineButton, InlineKeyboard, OutgoingMessage},
    },
    ports::{FeedEntry, FeedSource},
    seen::SeenSet,
    templates,
    translation::TranslationGateway,
    Result,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollReport {
    pub fetched: usize,
    /// Entries inside the batch window.
    pub considered: usize,
    pub already_seen: usize,
    pub malformed: usize,
    pub failed: usize,
    /// Posted, but the seen log refused the id; it may be posted again.
    pub unrecorded: usize,
    /// News ids dispatched and committed this cycle, in feed order.
    pub dispatched: Vec<String>,
}

/// A feed entry that passed validation.
struct Headline<'a> {
    news_id: &'a str,
    title: &'a str,
    link: &'a str,
}

impl<'a> Headline<'a> {
    fn from_entry(entry: &'a FeedEntry) -> Option<Self> {
        let news_id = entry.news_id()?;
        let title = entry.title.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let link = entry.link.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            news_id,
            title,
            link,
        })
    }
}

pub struct NewsPoller {
    cfg: Arc<Config>,
    feed: Arc<dyn FeedSource>,
    translator: TranslationGateway,
    messenger: Arc<dyn MessagingPort>,
    seen: Mutex<SeenSet>,
    /// Serializes cycles so `/news` and the scheduled tick never overlap.
    cycle: Mutex<()>,
}

impl NewsPoller {
    pub fn new(
        cfg: Arc<Config>,
        feed: Arc<dyn FeedSource>,
        translator: TranslationGateway,
        messenger: Arc<dyn MessagingPort>,
        seen: SeenSet,
    ) -> Self {
        Self {
            cfg,
            feed,
            translator,
            messenger,
            seen: Mutex::new(seen),
            cycle: Mutex::new(()),
        }
    }

    pub async fn seen_count(&self) -> usize {
        self.seen.lock().await.len()
    }

    /// Run one poll cycle.
    ///
    /// Fetch errors abort the cycle. Delivery errors skip the entry (it stays
    /// unseen and is retried next cycle). A seen-log write error is logged and
    /// the cycle moves on; that entry stays unseen and may be posted again.
    pub async fn poll_once(&self) -> Result<PollReport> {
        let _cycle = self.cycle.lock().await;

        let entries = self.feed.fetch().await?;
        let mut report = PollReport {
            fetched: entries.len(),
            ..Default::default()
        };

        for entry in entries.iter().take(self.cfg.news_batch_size) {
            report.considered += 1;
            let Some(headline) = Headline::from_entry(entry) else {
                debug!(?entry, "skipping malformed feed entry");
                report.malformed += 1;
                continue;
            };

            if self.seen.lock().await.is_seen(headline.news_id) {
                report.already_seen += 1;
                continue;
            }

            let msg = self.announcement(&headline).await;
            if let Err(e) = self.messenger.send(self.cfg.news_chat_id, &msg).await {
                warn!(news_id = headline.news_id, "failed to post news: {e}");
                report.failed += 1;
                continue;
            }

            if let Err(e) = self.seen.lock().await.mark_seen(headline.news_id) {
                error!(news_id = headline.news_id, "news posted but not recorded: {e}");
                report.unrecorded += 1;
                continue;
            }
            info!(news_id = headline.news_id, "news posted: {}", headline.title);
            report.dispatched.push(headline.news_id.to_string());
        }

        Ok(report)
    }

    async fn announcement(&self, headline: &Headline<'_>) -> OutgoingMessage {
        let title_pt = self.translator.translate(headline.title, Lang::Pt).await;
        let title_es = self.translator.translate(headline.title, Lang::Es).await;
        OutgoingMessage::with_keyboard(
            templates::news_announcement(headline.title, &title_pt, &title_es),
            InlineKeyboard::single_row(vec![InlineButton::url(
                templates::NEWS_BUTTON_LABEL,
                headline.link,
            )]),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::{
        config::test_config,
        domain::ChatId,
        errors::Error,
        messaging::types::ButtonAction,
        seen::tests::MemoryLog,
        testing::{FakeFeed, FakeMessenger},
        translation::tests::FakeTranslator,
    };

    fn entry(id: Option<&str>, title: Option<&str>, link: Option<&str>) -> FeedEntry {
        FeedEntry {
            id: id.map(String::from),
            title: title.map(String::from),
            link: link.map(String::from),
        }
    }

    struct Harness {
        poller: NewsPoller,
        translator: Arc<FakeTranslator>,
        messenger: Arc<FakeMessenger>,
        log: MemoryLog,
    }

    fn harness(seen: &[&str], entries: Vec<FeedEntry>) -> Harness {
        let log = MemoryLog::default();
        log.lines
            .lock()
            .unwrap()
            .extend(seen.iter().map(|s| s.to_string()));
        let feed = Arc::new(FakeFeed {
            entries: StdMutex::new(entries),
            fail: false,
        });
        harness_with(log, feed)
    }

    fn harness_with(log: MemoryLog, feed: Arc<FakeFeed>) -> Harness {
        let translator = Arc::new(FakeTranslator::default());
        let messenger = Arc::new(FakeMessenger::default());
        let poller = NewsPoller::new(
            Arc::new(test_config()),
            feed,
            TranslationGateway::new(translator.clone()),
            messenger.clone(),
            SeenSet::open(Box::new(log.clone())).unwrap(),
        );
        Harness {
            poller,
            translator,
            messenger,
            log,
        }
    }

    #[tokio::test]
    async fn only_unseen_entries_are_translated_and_posted() {
        let h = harness(
            &["a"],
            vec![
                entry(Some("a"), Some("Gold rises"), Some("http://x/a")),
                entry(Some("b"), Some("Gold falls"), Some("http://x/b")),
            ],
        );

        let report = h.poller.poll_once().await.unwrap();

        assert_eq!(report.dispatched, vec!["b".to_string()]);
        assert_eq!(report.already_seen, 1);
        assert_eq!(h.messenger.sent_to(), vec![ChatId(-999)]);
        let calls = h.translator.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                ("Gold falls".to_string(), Lang::Pt),
                ("Gold falls".to_string(), Lang::Es)
            ]
        );
        assert_eq!(*h.log.lines.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(h.poller.seen_count().await, 2);

        let sent = h.messenger.sent_messages();
        let msg = &sent[0];
        assert!(msg.html.contains("🇬🇧 Gold falls"));
        assert!(msg.html.contains("🇧🇷 pt:Gold falls"));
        assert!(msg.html.contains("🇪🇸 es:Gold falls"));
        let button = &msg.keyboard.as_ref().unwrap().rows[0][0];
        assert_eq!(button.action, ButtonAction::Url("http://x/b".to_string()));
    }

    #[tokio::test]
    async fn second_cycle_does_not_repost() {
        let h = harness(
            &[],
            vec![entry(Some("a"), Some("Gold rises"), Some("http://x/a"))],
        );
        assert_eq!(h.poller.poll_once().await.unwrap().dispatched.len(), 1);
        let second = h.poller.poll_once().await.unwrap();
        assert!(second.dispatched.is_empty());
        assert_eq!(second.already_seen, 1);
        assert_eq!(h.messenger.sent_to().len(), 1);
    }

    #[tokio::test]
    async fn link_is_the_id_when_feed_has_none() {
        let h = harness(&[], vec![entry(None, Some("Gold"), Some("http://x/1"))]);
        let report = h.poller.poll_once().await.unwrap();
        assert_eq!(report.dispatched, vec!["http://x/1".to_string()]);
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped() {
        let h = harness(
            &[],
            vec![
                entry(Some("a"), None, Some("http://x/a")),
                entry(Some("b"), Some("Gold"), None),
                entry(None, Some("Gold"), None),
                entry(Some("c"), Some("  "), Some("http://x/c")),
                entry(Some("d"), Some("Gold"), Some("http://x/d")),
            ],
        );
        let report = h.poller.poll_once().await.unwrap();
        assert_eq!(report.malformed, 4);
        assert_eq!(report.dispatched, vec!["d".to_string()]);
    }

    #[tokio::test]
    async fn only_the_first_batch_is_considered() {
        let entries = (0..8)
            .map(|i| {
                let id = format!("n{i}");
                let link = format!("http://x/{i}");
                entry(Some(&id), Some("Gold"), Some(&link))
            })
            .collect();
        let h = harness(&[], entries);
        let report = h.poller.poll_once().await.unwrap();
        assert_eq!(report.fetched, 8);
        assert_eq!(report.considered, 5);
        assert_eq!(report.dispatched, vec!["n0", "n1", "n2", "n3", "n4"]);
    }

    #[tokio::test]
    async fn delivery_failure_skips_entry_but_continues() {
        let h = harness(
            &[],
            vec![
                entry(Some("a"), Some("Gold"), Some("http://x/a")),
                entry(Some("b"), Some("Gold"), Some("http://x/b")),
            ],
        );
        h.messenger.fail_chat(ChatId(-999));
        let report = h.poller.poll_once().await.unwrap();
        assert_eq!(report.failed, 2);
        assert!(report.dispatched.is_empty());
        assert!(h.log.lines.lock().unwrap().is_empty());
        assert_eq!(h.poller.seen_count().await, 0);
    }

    #[tokio::test]
    async fn fetch_error_aborts_cycle() {
        let feed = Arc::new(FakeFeed {
            fail: true,
            ..Default::default()
        });
        let h = harness_with(MemoryLog::default(), feed);
        assert!(matches!(h.poller.poll_once().await, Err(Error::Feed(_))));
        assert!(h.messenger.log().is_empty());
    }

    #[tokio::test]
    async fn seen_log_failure_does_not_stop_the_batch() {
        let h = harness(
            &[],
            vec![
                entry(Some("a"), Some("Gold"), Some("http://x/a")),
                entry(Some("b"), Some("Silver"), Some("http://x/b")),
                entry(Some("c"), Some("Copper"), Some("http://x/c")),
            ],
        );
        *h.log.fail_appends.lock().unwrap() = true;

        let report = h.poller.poll_once().await.unwrap();

        assert_eq!(h.messenger.sent_to(), vec![ChatId(-999); 3]);
        assert_eq!(report.unrecorded, 3);
        assert!(report.dispatched.is_empty());
        assert_eq!(h.poller.seen_count().await, 0);

        *h.log.fail_appends.lock().unwrap() = false;
        let retry = h.poller.poll_once().await.unwrap();
        assert_eq!(retry.dispatched, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn translation_failure_falls_back_to_english() {
        let log = MemoryLog::default();
        let feed = Arc::new(FakeFeed {
            entries: StdMutex::new(vec![entry(Some("a"), Some("Gold"), Some("http://x/a"))]),
            fail: false,
        });
        let messenger = Arc::new(FakeMessenger::default());
        let poller = NewsPoller::new(
            Arc::new(test_config()),
            feed,
            TranslationGateway::new(Arc::new(FakeTranslator {
                fail: true,
                ..Default::default()
            })),
            messenger.clone(),
            SeenSet::open(Box::new(log)).unwrap(),
        );
        poller.poll_once().await.unwrap();
        let sent = messenger.sent_messages();
        let html = &sent[0].html;
        assert!(html.contains("🇧🇷 Gold"));
        assert!(html.contains("🇪🇸 Gold"));
    }
}
