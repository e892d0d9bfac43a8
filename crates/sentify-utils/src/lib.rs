//! Shared utilities for sentify
//!
//! This crate provides common functionality used across the sentify workspace,
//! including logging setup and environment-backed configuration helpers.

pub mod config;
pub mod logging;

pub use config::{env_flag, env_parse, env_var};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
