//! Translator backed by the MyMemory translation HTTP API.

use super::Translator;
use crate::config::Settings;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// Prefix MyMemory puts in place of a translation when a quota is hit.
const WARNING_PREFIX: &str = "MYMEMORY WARNING";

/// Translator that sends one GET request per string.
pub struct MyMemoryTranslator {
    client: Client,
    endpoint: String,
    source_lang: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(rename = "responseData")]
    data: Option<ReplyData>,
    #[serde(rename = "responseStatus", default)]
    status: Value,
    #[serde(rename = "responseDetails", default)]
    details: Value,
}

#[derive(Debug, Deserialize)]
struct ReplyData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryTranslator {
    /// Create a translator using the endpoint and languages from `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            endpoint: settings.translate_url.clone(),
            source_lang: settings.source_lang.clone(),
            email: settings.translate_email.clone(),
        }
    }

    fn lang_pair(&self, target_lang: &str) -> String {
        format!("{}|{}", self.source_lang, target_lang)
    }
}

/// `responseStatus` comes back either as a number or as a string.
fn status_ok(status: &Value) -> bool {
    match status {
        Value::Number(n) => n.as_u64() == Some(200),
        Value::String(s) => s.trim() == "200",
        _ => false,
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        trace!("translate(target_lang={}, len={})", target_lang, text.len());
        let mut query = vec![
            ("q", text.to_string()),
            ("langpair", self.lang_pair(target_lang)),
        ];
        if let Some(email) = &self.email {
            query.push(("de", email.clone()));
        }
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .context("translation request failed")?;
        let resp = resp.error_for_status()?;
        let reply: Reply = resp.json().await.context("unexpected translation reply")?;
        if !status_ok(&reply.status) {
            return Err(anyhow!(
                "translation service returned status {}: {}",
                reply.status,
                reply.details
            ));
        }
        let translated = reply
            .data
            .and_then(|d| d.translated_text)
            .ok_or_else(|| anyhow!("translation reply has no text"))?;
        if translated.starts_with(WARNING_PREFIX) {
            return Err(anyhow!("translation service refused: {translated}"));
        }
        Ok(translated)
    }
}
