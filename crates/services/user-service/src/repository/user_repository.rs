//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{DomainError, User, EMAIL_ALREADY_EXISTS};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Plain CRUD over the `users` table. A write rejected by the email index
/// surfaces as a conflict; other store errors pass through as
/// `AppError::Database` without retry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user
    async fn fetch_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert the user as given and return the stored record
    async fn add(&self, user: User) -> AppResult<User>;

    /// Overwrite the stored record with the same id. `false` if none matched.
    async fn update(&self, user: User) -> AppResult<bool>;

    /// Remove the stored record with the same id. `false` if none matched.
    async fn delete(&self, user: User) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn fetch_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn add(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(write_error)?;

        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<bool> {
        let id = user.id;
        let mut active = ActiveModel::from(user);
        active.id = ActiveValue::NotSet;

        let result = UserEntity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, user: User) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(user.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Map a failed insert or update. Ids are server-generated, so a unique
/// violation can only come from the email indexes.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::warn!("Store rejected duplicate email");
            DomainError::conflict(EMAIL_ALREADY_EXISTS).into()
        }
        _ => AppError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;
    use common::DatabaseConfig;

    async fn store() -> UserStore {
        let db = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();
        UserStore::new(db.get_connection())
    }

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "sandy".to_string(),
            last_name: "rocks".to_string(),
            email: email.to_string(),
            is_active: Some(true),
        }
    }

    #[tokio::test]
    async fn fetch_all_on_empty_store_is_empty() {
        let repo = store().await;
        assert!(repo.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_then_fetch_by_id_round_trips() {
        let repo = store().await;
        let input = user("sandeep@test.com");

        let stored = repo.add(input.clone()).await.unwrap();
        assert_eq!(stored, input);

        let fetched = repo.fetch_by_id(input.id).await.unwrap();
        assert_eq!(fetched, Some(input));
    }

    #[tokio::test]
    async fn fetch_by_id_returns_none_for_unknown_id() {
        let repo = store().await;
        assert!(repo.fetch_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites_fields_of_matching_row() {
        let repo = store().await;
        let mut stored = repo.add(user("sandeep@test.com")).await.unwrap();

        stored.last_name = "updated".to_string();
        stored.is_active = None;
        assert!(repo.update(stored.clone()).await.unwrap());

        let fetched = repo.fetch_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.last_name, "updated");
        assert_eq!(fetched.is_active, None);
    }

    #[tokio::test]
    async fn update_reports_false_when_no_row_matches() {
        let repo = store().await;
        assert!(!repo.update(user("ghost@test.com")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = store().await;
        let stored = repo.add(user("sandeep@test.com")).await.unwrap();

        assert!(repo.delete(stored.clone()).await.unwrap());
        assert!(repo.fetch_by_id(stored.id).await.unwrap().is_none());
        assert!(!repo.delete(stored).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_the_store() {
        let repo = store().await;
        repo.add(user("sandeep@test.com")).await.unwrap();

        let err = repo.add(user("sandeep@test.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), EMAIL_ALREADY_EXISTS);
    }

    #[tokio::test]
    async fn email_in_other_case_is_rejected_by_the_store() {
        let repo = store().await;
        repo.add(user("c@x.com")).await.unwrap();

        let err = repo.add(user("C@X.COM")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.fetch_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_to_email_in_other_case_is_rejected_by_the_store() {
        let repo = store().await;
        repo.add(user("c@x.com")).await.unwrap();
        let mut other = repo.add(user("d@x.com")).await.unwrap();

        other.email = "C@x.com".to_string();
        let err = repo.update(other).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
