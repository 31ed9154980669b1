//! Shared types, errors, and configuration for Reckon.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency primitives with decimal precision
//! - Typed IDs for type-safe entity references
//! - Engine-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{AppError, AppResult};
