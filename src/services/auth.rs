use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
    utils::{encode_token, hash_password, verify_password},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new student account.
    /// Returns (user_model, token).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        block: Option<&str>,
        room: Option<&str>,
    ) -> AppResult<(UserModel, String)> {
        if self.email_exists(email).await? {
            return Err(AppError::Conflict(
                "A user with this email already exists.".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            email: sea_orm::ActiveValue::Set(email.to_string()),
            password_hash: sea_orm::ActiveValue::Set(password_hash),
            role: sea_orm::ActiveValue::Set("student".to_string()),
            block: sea_orm::ActiveValue::Set(block.map(|s| s.to_string())),
            room: sea_orm::ActiveValue::Set(room.map(|s| s.to_string())),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let saved = new_user.insert(&self.db).await?;
        let token = encode_token(saved.id, &saved.role)?;

        Ok((saved, token))
    }

    /// Login by email + password.
    /// The same message covers unknown email and wrong password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserModel, String)> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password.".to_string()))?;

        let is_valid = verify_password(password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password.".to_string(),
            ));
        }

        let token = encode_token(user.id, &user.role)?;

        Ok((user, token))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = User::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
