use std::sync::Arc;

use tracing::error;

use crate::{domain::Lang, ports::Translator};

/// Fail-soft wrapper around a [`Translator`].
///
/// Any backend error is logged and the original text is returned, so callers
/// always have something to show.
#[derive(Clone)]
pub struct TranslationGateway {
    inner: Arc<dyn Translator>,
}

impl TranslationGateway {
    pub fn new(inner: Arc<dyn Translator>) -> Self {
        Self { inner }
    }

    pub async fn translate(&self, text: &str, target: Lang) -> String {
        if target == Lang::En || text.trim().is_empty() {
            return text.to_string();
        }
        match self.inner.translate(text, target).await {
            Ok(out) if !out.trim().is_empty() => out,
            Ok(_) => {
                error!(target = target.code(), "translation returned empty text");
                text.to_string()
            }
            Err(e) => {
                error!(target = target.code(), "translation failed: {e}");
                text.to_string()
            }
        }
    }
}
