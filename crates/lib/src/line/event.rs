//! Webhook event payloads and parsing.

use serde::Deserialize;

/// Webhook POST body: destination bot user id and a batch of events.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single webhook event. Only the variants the bot cares about carry fields;
/// unknown event types deserialize to `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: String,
        message: MessageContent,
    },
    Follow {
        #[serde(rename = "replyToken", default)]
        reply_token: String,
    },
    Unfollow,
    Postback {
        #[serde(rename = "replyToken", default)]
        reply_token: String,
    },
    #[serde(other)]
    Other,
}

/// Message object inside a message event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[serde(default)]
        id: String,
        text: String,
    },
    #[serde(other)]
    Other,
}

impl Event {
    /// Reply token and text when this is a text message event.
    pub fn as_text_message(&self) -> Option<(&str, &str)> {
        match self {
            Event::Message {
                reply_token,
                message: MessageContent::Text { text, .. },
            } => Some((reply_token.as_str(), text.as_str())),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message { message: MessageContent::Text { .. }, .. } => "message/text",
            Event::Message { .. } => "message/other",
            Event::Follow { .. } => "follow",
            Event::Unfollow => "unfollow",
            Event::Postback { .. } => "postback",
            Event::Other => "other",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid webhook body: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Turns a verified raw body into an ordered list of events.
pub trait Parser: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<Vec<Event>, ParseError>;
}

/// Parser for the JSON body LINE posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEventParser;

impl Parser for JsonEventParser {
    fn parse(&self, body: &[u8]) -> Result<Vec<Event>, ParseError> {
        let body: WebhookBody = serde_json::from_slice(body)?;
        Ok(body.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_message_event() {
        let body = r#"{
            "destination": "Uxxxxxxxx",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1462629479859,
                "source": { "type": "user", "userId": "U4af4980629" },
                "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
                "deliveryContext": { "isRedelivery": false },
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "message": { "id": "444573844083572737", "type": "text", "text": "コーヒー豆" }
            }]
        }"#;
        let events = JsonEventParser.parse(body.as_bytes()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].as_text_message(),
            Some(("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA", "コーヒー豆"))
        );
        assert_eq!(events[0].kind(), "message/text");
    }

    #[test]
    fn non_text_and_unknown_events_are_not_text_messages() {
        let body = br#"{"events": [
            {"type": "message", "replyToken": "t1", "message": {"id": "1", "type": "sticker", "packageId": "1", "stickerId": "1"}},
            {"type": "follow", "replyToken": "t2"},
            {"type": "unfollow"},
            {"type": "postback", "replyToken": "t3", "postback": {"data": "a=1"}},
            {"type": "beacon", "replyToken": "t4", "beacon": {"hwid": "d41d8cd98f", "type": "enter"}}
        ]}"#;
        let events = JsonEventParser.parse(body).unwrap();
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.as_text_message().is_none()));
        assert_eq!(
            events.iter().map(Event::kind).collect::<Vec<_>>(),
            vec!["message/other", "follow", "unfollow", "postback", "other"]
        );
    }

    #[test]
    fn missing_events_is_empty_batch() {
        assert!(JsonEventParser.parse(br#"{"destination":"U0"}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = JsonEventParser.parse(b"not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid webhook body"));
    }
}
