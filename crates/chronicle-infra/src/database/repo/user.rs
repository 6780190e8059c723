use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

use chronicle_core::domain::{ProfileUpdate, User, normalize_email};
use chronicle_core::error::RepoError;
use chronicle_core::ports::UserRepository;

use super::map_db_err;
use crate::database::entity::user::{self, Entity as UserEntity};

/// Postgres user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn model_by_email(&self, email: &str) -> Result<Option<user::Model>, RepoError> {
        let email = normalize_email(email);
        tracing::debug!(user_email = %mask_email(&email), "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.model_by_email(email).await?.map(Into::into))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), RepoError> {
        let model = self
            .model_by_email(email)
            .await?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await.map_err(map_db_err)?;

        Ok(())
    }

    async fn update_profile(&self, email: &str, changes: ProfileUpdate) -> Result<User, RepoError> {
        let model = self
            .model_by_email(email)
            .await?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(new_email) = changes.email {
            active.email = Set(normalize_email(&new_email));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

/// Keep PII out of logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 1 => {
            let first = local.chars().next().unwrap();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}
