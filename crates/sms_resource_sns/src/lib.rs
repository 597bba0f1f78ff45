//! AWS SNS adapter, protocol handlers and binaries for the SMS resource.
//!
//! This crate owns runtime integration details (SNS client, stdin/stdout
//! handling, logging bootstrap) on top of the contracts and orchestration in
//! `sms_resource_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;
