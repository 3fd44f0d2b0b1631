//! Messaging API client: reply to an event with a message.

use crate::flex::FlexMessage;
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "https://api.line.me";

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("line api error: {0}")]
    Api(String),
}

/// Delivers a reply payload addressed by a one-time reply token.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn reply(&self, reply_token: &str, message: &FlexMessage) -> Result<(), LineError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [&'a FlexMessage; 1],
}

/// Client for the LINE Messaging API, authorized with the channel access token.
#[derive(Clone)]
pub struct LineClient {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            base_url,
            access_token: access_token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// POST /v2/bot/message/reply — reply with a single message.
    pub async fn reply_message(&self, reply_token: &str, message: &FlexMessage) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let body = ReplyRequest {
            reply_token,
            messages: [message],
        };
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api(format!("{} {}", status, body)));
        }
        Ok(())
    }
}

#[async_trait]
impl Sender for LineClient {
    async fn reply(&self, reply_token: &str, message: &FlexMessage) -> Result<(), LineError> {
        self.reply_message(reply_token, message).await
    }
}
