//! Data models for receipt scanning.

pub mod config;
pub mod receipt;
