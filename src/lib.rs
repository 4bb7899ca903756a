//! Coach Cards — keyword trigger detection for sales conversation transcripts.

pub mod config;
pub mod error;
pub mod server;
pub mod triggers;
