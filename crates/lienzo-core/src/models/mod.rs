//! Data models: the extracted record, the value catalog and configuration.

pub mod catalog;
pub mod config;
pub mod record;
