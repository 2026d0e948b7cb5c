//! Work area model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named work location with its own rate structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// The area's display name (unique, non-empty, trimmed).
    pub name: String,
    /// When the area was created.
    pub created_at: DateTime<Utc>,
}

/// A candidate area, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDraft {
    /// The requested name, as entered.
    pub name: String,
}

impl AreaDraft {
    /// Creates a draft with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
