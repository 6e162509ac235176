//! Domain rules for DailyDigest subscriptions.
//!
//! This crate has zero internal deps so the same validation can be shared by
//! the HTTP API, the repository layer, and any CLI tooling that reads the
//! subscriber list.

pub mod error;
pub mod subscription;
pub mod types;
