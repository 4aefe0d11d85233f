//! Google Custom Search lookup used to enrich answers with web results.

use common::model::chat::SearchSource;
use reqwest::Client;
use serde::Deserialize;

use crate::config::GoogleConfig;
use crate::services::ServiceError;

/// Number of results requested per question.
const RESULT_COUNT: &str = "5";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(rename = "displayLink", default)]
    display_link: String,
}

impl From<SearchItem> for SearchSource {
    fn from(item: SearchItem) -> Self {
        SearchSource {
            title: item.title,
            link: item.link,
            source: item.display_link,
            snippet: item.snippet.replace('\n', " "),
        }
    }
}

/// Runs `query` against the configured search engine. Returns `Ok(None)` when
/// search credentials are not configured.
pub async fn web_search(
    client: &Client,
    config: &GoogleConfig,
    query: &str,
) -> Result<Option<Vec<SearchSource>>, ServiceError> {
    let Some((key, cx)) = config.search_credentials() else {
        return Ok(None);
    };

    let url = format!("{}/customsearch/v1", config.search_base_url.trim_end_matches('/'));
    let response = client
        .get(url)
        .query(&[("key", key), ("cx", cx), ("q", query), ("num", RESULT_COUNT)])
        .send()
        .await
        .map_err(|e| ServiceError::Upstream(format!("웹 검색에 실패했습니다: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Upstream(format!(
            "웹 검색에 실패했습니다 (HTTP {})",
            status.as_u16()
        )));
    }

    let parsed: SearchResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::Upstream(format!("웹 검색 응답을 해석할 수 없습니다: {}", e)))?;
    Ok(Some(parsed.items.into_iter().map(SearchSource::from).collect()))
}
