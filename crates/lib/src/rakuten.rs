//! Rakuten Ichiba item search client (https://app.rakuten.co.jp by default).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://app.rakuten.co.jp";
const ITEM_SEARCH_PATH: &str = "/services/api/IchibaItem/Search/20170706";

#[derive(Debug, thiserror::Error)]
pub enum RakutenError {
    #[error("rakuten request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("rakuten api error: {0}")]
    Api(String),
}

/// One item from a search result, reduced to what the reply needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub item_name: String,
    /// Price in yen.
    pub item_price: u64,
    pub item_url: String,
    /// 128x128 thumbnails; the first one is used as the card image.
    #[serde(default)]
    pub medium_image_urls: Vec<String>,
}

/// Keyword search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// Page size.
    pub hits: u32,
    /// Only return items that have an image.
    pub image_flag: bool,
}

impl SearchQuery {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            hits: 30,
            image_flag: false,
        }
    }

    pub fn hits(mut self, hits: u32) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_images_only(mut self) -> Self {
        self.image_flag = true;
        self
    }
}

/// Product catalog search. Results come back in the provider's order.
#[async_trait]
pub trait ItemSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, RakutenError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Items", default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Client for the Ichiba item search API, holding the application/affiliate ids.
#[derive(Clone)]
pub struct RakutenClient {
    base_url: String,
    application_id: String,
    affiliate_id: Option<String>,
    client: reqwest::Client,
}

impl RakutenClient {
    pub fn new(
        application_id: impl Into<String>,
        affiliate_id: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            base_url,
            application_id: application_id.into(),
            affiliate_id,
            client: reqwest::Client::new(),
        }
    }

    fn query_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("formatVersion", "2".to_string()),
            ("applicationId", self.application_id.clone()),
            ("keyword", query.keyword.clone()),
            ("hits", query.hits.to_string()),
            ("imageFlag", if query.image_flag { "1" } else { "0" }.to_string()),
        ];
        if let Some(ref aff) = self.affiliate_id {
            params.push(("affiliateId", aff.clone()));
        }
        params
    }

    /// GET IchibaItem/Search — keyword search with the default sort order.
    pub async fn search_items(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, RakutenError> {
        let url = format!("{}{}", self.base_url, ITEM_SEARCH_PATH);
        let res = self
            .client
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(e) => format!("{}: {}", e.error, e.error_description),
                Err(_) => body,
            };
            return Err(RakutenError::Api(format!("{} {}", status, detail)));
        }
        let data: SearchResponse = res.json().await?;
        log::debug!("rakuten search {:?}: {} item(s)", query.keyword, data.items.len());
        Ok(data.items)
    }
}

#[async_trait]
impl ItemSearch for RakutenClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchItem>, RakutenError> {
        self.search_items(query).await
    }
}
