//! Webhook handler: verify, parse, and answer each text message with a product carousel.

use crate::flex::FlexMessage;
use crate::line::{Event, LineError, ParseError, Parser, Sender, Verifier};
use crate::rakuten::{ItemSearch, RakutenError, SearchQuery};
use crate::reply::{self, ReplyError, CAROUSEL_SLOTS};
use axum::http::StatusCode;
use std::sync::Arc;

/// Failures after the signature check. None of these are retried; the request fails.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Search(#[from] RakutenError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
    #[error(transparent)]
    Send(#[from] LineError),
}

/// Search the catalog for `input` and build the reply carousel from the top results.
pub async fn search_and_create_message(
    search: &dyn ItemSearch,
    input: &str,
) -> Result<FlexMessage, WebhookError> {
    let query = SearchQuery::keyword(input)
        .hits(CAROUSEL_SLOTS as u32)
        .with_images_only();
    let items = search.search(&query).await?;
    Ok(reply::make_reply_content(&items)?)
}

/// Collaborators for one webhook delivery.
#[derive(Clone)]
pub struct WebhookHandler {
    verifier: Arc<dyn Verifier>,
    parser: Arc<dyn Parser>,
    search: Arc<dyn ItemSearch>,
    sender: Arc<dyn Sender>,
}

impl WebhookHandler {
    pub fn new(
        verifier: Arc<dyn Verifier>,
        parser: Arc<dyn Parser>,
        search: Arc<dyn ItemSearch>,
        sender: Arc<dyn Sender>,
    ) -> Self {
        Self {
            verifier,
            parser,
            search,
            sender,
        }
    }

    /// Handle one webhook POST. Returns 400 when the signature does not match and 200 once
    /// every event has been handled. Text message events are answered in order, one at a time;
    /// the first failure stops processing and is returned.
    pub async fn handle_callback(&self, body: &[u8], signature: &str) -> Result<StatusCode, WebhookError> {
        if !self.verifier.validate(body, signature) {
            log::warn!("webhook signature verification failed ({} byte body)", body.len());
            return Ok(StatusCode::BAD_REQUEST);
        }
        let events = self.parser.parse(body)?;
        log::debug!("webhook delivered {} event(s)", events.len());
        for event in &events {
            self.dispatch(event).await?;
        }
        Ok(StatusCode::OK)
    }

    async fn dispatch(&self, event: &Event) -> Result<(), WebhookError> {
        let Some((reply_token, text)) = event.as_text_message() else {
            log::debug!("ignoring {} event", event.kind());
            return Ok(());
        };
        let message = search_and_create_message(self.search.as_ref(), text).await?;
        self.sender.reply(reply_token, &message).await?;
        log::info!("replied to text message with product carousel");
        Ok(())
    }
}
