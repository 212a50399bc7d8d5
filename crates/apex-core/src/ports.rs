use async_trait::async_trait;

use crate::{domain::Lang, Result};

/// Machine translation backend. Source language is always English.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Lang) -> Result<String>;
}

/// One syndication feed item as delivered by the source, unvalidated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
}

impl FeedEntry {
    /// Dedup key: the feed-provided id, else the link.
    pub fn news_id(&self) -> Option<&str> {
        non_blank(self.id.as_deref()).or_else(|| non_blank(self.link.as_deref()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Syndication feed source. Entries come back in feed order (newest first).
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>>;
}

/// Durable append-only log of seen news ids.
///
/// `append` must not return `Ok` before the id is on durable storage.
pub trait SeenLog: Send {
    fn load(&mut self) -> Result<Vec<String>>;
    fn append(&mut self, id: &str) -> Result<()>;
}
