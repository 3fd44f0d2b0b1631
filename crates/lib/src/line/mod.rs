//! LINE Messaging API plumbing.
//!
//! Signature verification, webhook event parsing, and reply delivery. Each concern sits
//! behind a narrow trait so the webhook handler can run against fakes in tests.

mod client;
mod event;
mod signature;

pub use client::{LineClient, LineError, Sender, DEFAULT_API_BASE};
pub use event::{Event, JsonEventParser, MessageContent, ParseError, Parser, WebhookBody};
pub use signature::{sign, HmacVerifier, Verifier, SIGNATURE_HEADER};
