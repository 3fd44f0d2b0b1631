//! Gateway: HTTP server for the LINE webhook.
//!
//! Single port serves the webhook callback and a health check.

mod server;

pub use server::{build_webhook_handler, router, run_gateway, GatewayState};
