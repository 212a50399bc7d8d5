//! Google Translate adapter.
//!
//! Talks to the public `translate_a/single` endpoint with the `gtx` client,
//! which needs no API key. Source language is always English.

use std::time::Duration;

use apex_core::{domain::Lang, errors::Error, ports::Translator, Result};
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Clone, Debug)]
pub struct GoogleTranslateClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GoogleTranslateClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::External(format!("translate http client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: Lang) -> Result<String> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", Lang::En.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| Error::Translation(format!("request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Translation(format!(
                "translate failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Translation(format!("json error: {e}")))?;

        let out = parse_translation(&v)?;
        debug!(target = target.code(), chars = out.chars().count(), "translated");
        Ok(out)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array: `[[["<translated>", "<source>", ...], ...], ...]`.
pub fn parse_translation(v: &serde_json::Value) -> Result<String> {
    let segments = v
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| Error::Translation("unexpected response shape".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(Error::Translation(
            "translation returned empty text".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn joins_all_segments() {
        let v = json!([
            [
                ["O ouro sobe. ", "Gold rises. ", null, null, 10],
                ["A prata cai.", "Silver falls.", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&v).unwrap(), "O ouro sobe. A prata cai.");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(matches!(
            parse_translation(&json!({"error": "quota"})),
            Err(Error::Translation(_))
        ));
        assert!(parse_translation(&json!([null])).is_err());
    }

    #[test]
    fn rejects_empty_translation() {
        assert!(parse_translation(&json!([[["  ", "x"]]])).is_err());
    }

    #[test]
    fn client_builds_with_custom_endpoint() {
        let c = GoogleTranslateClient::with_endpoint("http://127.0.0.1:9/t").unwrap();
        assert_eq!(c.endpoint, "http://127.0.0.1:9/t");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_translation_error() {
        let c = GoogleTranslateClient::with_endpoint("http://127.0.0.1:9/t").unwrap();
        let err = c.translate("gold", Lang::Pt).await.unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }
}
