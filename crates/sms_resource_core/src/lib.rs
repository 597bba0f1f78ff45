//! Shared SMS resource domain primitives.
//!
//! This crate owns the resource protocol contracts, input validation,
//! subscriber reconciliation and the notification orchestration. It
//! intentionally excludes AWS SDK and async runtime concerns; the messaging
//! provider is reached only through [`messaging::MessagingClient`].

pub mod application;
pub mod contract;
pub mod error;
pub mod messaging;
pub mod reconcile;
