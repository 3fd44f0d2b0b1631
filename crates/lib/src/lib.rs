//! linebot core library: LINE webhook gateway, Rakuten item search, and Flex reply building
//! used by the `linebot` CLI.

pub mod config;
pub mod flex;
pub mod gateway;
pub mod init;
pub mod line;
pub mod rakuten;
pub mod reply;
pub mod webhook;
