//! Domain model for the authenticated identity.
use serde::{Deserialize, Serialize};

/// The external, authenticated actor on whose behalf payment records
/// are created, read and mutated.
///
/// An `Identity` is always passed into the domain explicitly by the
/// caller; the core never reads ambient session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            display_name: None,
        }
    }

    /// Human-readable label for reports: display name, falling back to
    /// email, falling back to the raw user id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or(&self.user_id)
    }

    /// Whether this identity can act on the store at all.
    pub fn is_present(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}
