//! Data models for configuration and extraction records.

pub mod config;
pub mod record;
