//! Audit context attached to postings and administrative events.
//!
//! The required who/when/why fields are strongly typed; arbitrary extra
//! context is a schema-validated key/value map (snake_case keys, scalar
//! values only) rather than an untyped blob.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use reckon_shared::types::ActorId;

/// Errors raised by audit metadata validation.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Extra keys must be non-empty.
    #[error("Audit metadata key must not be empty")]
    EmptyKey,

    /// Extra keys must be snake_case identifiers.
    #[error("Audit metadata key is not snake_case: {0}")]
    InvalidKey(String),

    /// Extra values must be JSON scalars.
    #[error("Audit metadata value for {0} must be a scalar")]
    NonScalarValue(String),
}

/// Who performed an action, when, and why, plus validated extra context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditContext {
    /// The acting user or system.
    pub actor: ActorId,
    /// When the action happened.
    pub at: DateTime<Utc>,
    /// Why the action happened (required for exceptional events such as
    /// period reopens and reversals).
    pub reason: Option<String>,
    /// Validated extra key/value context.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AuditContext {
    /// Creates an audit context stamped with the current time.
    #[must_use]
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            at: Utc::now(),
            reason: None,
            extra: BTreeMap::new(),
        }
    }

    /// Creates an audit context with a reason.
    #[must_use]
    pub fn with_reason(actor: ActorId, reason: impl Into<String>) -> Self {
        Self {
            actor,
            at: Utc::now(),
            reason: Some(reason.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Adds an extra key/value pair after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or not snake_case, or the
    /// value is not a JSON scalar.
    pub fn insert_extra(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), AuditError> {
        let key = key.into();
        validate_extra_pair(&key, &value)?;
        self.extra.insert(key, value);
        Ok(())
    }

    /// Validates every extra pair currently attached.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), AuditError> {
        for (key, value) in &self.extra {
            validate_extra_pair(key, value)?;
        }
        Ok(())
    }
}

fn validate_extra_pair(key: &str, value: &serde_json::Value) -> Result<(), AuditError> {
    if key.is_empty() {
        return Err(AuditError::EmptyKey);
    }
    let valid_key = key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && key.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if !valid_key {
        return Err(AuditError::InvalidKey(key.to_string()));
    }
    if value.is_object() || value.is_array() {
        return Err(AuditError::NonScalarValue(key.to_string()));
    }
    Ok(())
}
