//! User service - Handles user-related business logic.
//!
//! Validation, email uniqueness and merge updates live here; the repository
//! only persists.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{same_email, DomainError, User, UserDraft, EMAIL_ALREADY_EXISTS, USER_REQUIRED};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users; empty when there are none
    async fn get_all_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Validate and store a new user under a freshly generated id
    async fn add_user(&self, user: Option<UserDraft>) -> AppResult<User>;

    /// Merge the draft into the stored user with the same id.
    /// `false` when there is no such user.
    async fn update_user(&self, user: UserDraft) -> AppResult<bool>;

    /// Hard delete. `false` when there is no such user.
    async fn delete_user(&self, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Fail with a conflict if any user other than `except` owns `email`.
    ///
    /// Best-effort pre-check; the unique index on the table is what holds
    /// under concurrent writes.
    async fn ensure_email_free(&self, email: &str, except: Option<Uuid>) -> AppResult<()> {
        let users = self.repo.fetch_all().await?;
        let taken = users
            .iter()
            .any(|u| Some(u.id) != except && same_email(&u.email, email));

        if taken {
            warn!("Rejected duplicate email");
            return Err(DomainError::conflict(EMAIL_ALREADY_EXISTS).into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        let users = self.repo.fetch_all().await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        debug!(%id, "Fetching user");
        self.repo.fetch_by_id(id).await
    }

    async fn add_user(&self, user: Option<UserDraft>) -> AppResult<User> {
        let draft = user.ok_or_else(|| AppError::invalid_argument(USER_REQUIRED))?;

        if let Err(e) = draft.validate() {
            warn!(reason = %e, "Rejected new user");
            return Err(e.into());
        }

        let email = draft.email.as_deref().unwrap_or_default();
        self.ensure_email_free(email, None).await?;

        let new_user = draft.into_user(Uuid::new_v4());
        let stored = self.repo.add(new_user).await?;
        info!(id = %stored.id, "User added");

        Ok(stored)
    }

    async fn update_user(&self, user: UserDraft) -> AppResult<bool> {
        let Some(id) = user.id else {
            return Ok(false);
        };
        let Some(mut existing) = self.repo.fetch_by_id(id).await? else {
            debug!(%id, "No user to update");
            return Ok(false);
        };

        let previous_email = existing.email.clone();
        existing.merge(user);

        if !same_email(&previous_email, &existing.email) {
            self.ensure_email_free(&existing.email, Some(id)).await?;
        }

        let updated = self.repo.update(existing).await?;
        info!(%id, updated, "User update processed");

        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        let Some(existing) = self.repo.fetch_by_id(id).await? else {
            debug!(%id, "No user to delete");
            return Ok(false);
        };

        let deleted = self.repo.delete(existing).await?;
        info!(%id, deleted, "User delete processed");

        Ok(deleted)
    }
}
