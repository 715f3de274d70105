//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{EMAIL_REQUIRED, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};
use crate::error::{DomainError, DomainResult};

/// User domain entity
///
/// `first_name`, `last_name` and `email` are never empty for a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier (server-assigned)
    pub id: Uuid,
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe@example.com"))]
    pub email: String,
    pub is_active: Option<bool>,
}

impl User {
    /// Apply a partial update.
    ///
    /// Non-empty strings in `draft` replace the stored value, empty or absent
    /// ones keep it. `is_active` is replaced only when supplied. The id is
    /// never touched.
    pub fn merge(&mut self, draft: UserDraft) {
        if let Some(first_name) = non_empty(draft.first_name) {
            self.first_name = first_name;
        }
        if let Some(last_name) = non_empty(draft.last_name) {
            self.last_name = last_name;
        }
        if let Some(email) = non_empty(draft.email) {
            self.email = email;
        }
        self.is_active = draft.is_active.or(self.is_active);
    }
}

/// Partial user as received from a client.
///
/// Used both for creation (where `id` is ignored) and for merge updates
/// (where `id` selects the record).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub id: Option<Uuid>,
    #[cfg_attr(feature = "openapi", schema(example = "Jane"))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe@example.com"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UserDraft {
    /// Check required fields in order: first name, last name, email.
    /// The first failure wins.
    pub fn validate(&self) -> DomainResult<()> {
        if is_blank(&self.first_name) {
            return Err(DomainError::validation(FIRST_NAME_REQUIRED));
        }
        if is_blank(&self.last_name) {
            return Err(DomainError::validation(LAST_NAME_REQUIRED));
        }
        if is_blank(&self.email) {
            return Err(DomainError::validation(EMAIL_REQUIRED));
        }
        Ok(())
    }

    /// Build a new user under `id`, discarding any client-supplied id.
    /// An absent `is_active` defaults to `false`.
    ///
    /// Call [`UserDraft::validate`] first; missing fields become empty strings.
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            is_active: Some(self.is_active.unwrap_or(false)),
        }
    }
}

/// Case-insensitive email comparison used for uniqueness checks.
pub fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
