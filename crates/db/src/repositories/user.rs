//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, info};
use xpensify_shared::types::UserId;

use crate::entities::users;

/// User repository for lookups and first-login provisioning.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails, including when the
    /// email is already taken.
    pub async fn create(
        &self,
        email: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(email.to_string()),
            name: Set(name.map(str::to_string)),
            image: Set(image.map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Returns the user with `email`, creating it on first sight.
    ///
    /// Profile fields are only written on creation. If a concurrent request
    /// wins the insert race, the row it created is returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_or_create(
        &self,
        email: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<users::Model, DbErr> {
        if let Some(user) = self.find_by_email(email).await? {
            debug!(user_id = %user.id, "Resolved existing user");
            return Ok(user);
        }

        match self.create(email, name, image).await {
            Ok(user) => {
                info!(user_id = %user.id, "Provisioned new user");
                Ok(user)
            }
            Err(err) => self.find_by_email(email).await?.ok_or(err),
        }
    }
}
