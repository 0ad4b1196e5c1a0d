//! Google Custom Search 客户端

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{LookupService, NO_RESULTS};
use crate::config::LookupConfig;
use crate::error::LookupError;

/// 基于 Custom Search JSON API 的检索客户端
#[derive(Clone)]
pub struct GoogleSearchClient {
    http: reqwest::Client,
    config: LookupConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

impl GoogleSearchClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(LookupError::network)?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }
}

/// 将检索条目拼接为带排名的文本
pub(crate) fn render_items(items: &[SearchItem]) -> String {
    let ranked: Vec<String> = items
        .iter()
        .filter(|item| !item.snippet.trim().is_empty() || !item.title.trim().is_empty())
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {}\n{}\n{}",
                i + 1,
                item.title.trim(),
                item.snippet.split_whitespace().collect::<Vec<_>>().join(" "),
                item.link
            )
        })
        .collect();

    if ranked.is_empty() {
        NO_RESULTS.to_string()
    } else {
        ranked.join("\n\n")
    }
}

#[async_trait]
impl LookupService for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<String, LookupError> {
        tracing::debug!("   🔎 检索: {}", query);

        let num = self.config.result_count.to_string();
        let response = self
            .http
            .get(&self.config.api_base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(LookupError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.without_url().to_string()))?;

        Ok(render_items(&payload.items))
    }
}
