use crate::error::AppResult;
use crate::models::User;
use crate::utils::hash_password;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::env;

#[derive(Debug, Clone)]
pub struct SeedAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SeedAdminConfig {
    pub fn from_env() -> Option<Self> {
        let enabled = env::var("SEED_ADMIN_ENABLED")
            .ok()
            .map(|v| v.trim().to_ascii_lowercase())
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on"))
            .unwrap_or(false);

        if !enabled {
            return None;
        }

        Some(Self {
            name: env::var("SEED_ADMIN_NAME").ok()?,
            email: env::var("SEED_ADMIN_EMAIL").ok()?,
            password: env::var("SEED_ADMIN_PASSWORD").ok()?,
        })
    }
}

/// One-time admin seeding at startup:
/// - if any admin already exists: do nothing
/// - else if the configured email exists: promote that account
/// - else create a new admin account
pub async fn ensure_seed_admin(db: &DatabaseConnection) -> AppResult<()> {
    let Some(cfg) = SeedAdminConfig::from_env() else {
        return Ok(());
    };

    let admin_exists = User::find()
        .filter(crate::models::user::Column::Role.eq("admin"))
        .one(db)
        .await?
        .is_some();
    if admin_exists {
        return Ok(());
    }

    let existing = User::find()
        .filter(crate::models::user::Column::Email.eq(cfg.email.clone()))
        .one(db)
        .await?;

    if let Some(user) = existing {
        let mut active: crate::models::user::ActiveModel = user.into();
        active.role = sea_orm::ActiveValue::Set("admin".to_string());
        active.update(db).await?;
        tracing::info!("Promoted existing account to admin");
        return Ok(());
    }

    let password_hash = hash_password(&cfg.password)?;
    let now = chrono::Utc::now().naive_utc();

    let new_user = crate::models::user::ActiveModel {
        name: sea_orm::ActiveValue::Set(cfg.name),
        email: sea_orm::ActiveValue::Set(cfg.email),
        password_hash: sea_orm::ActiveValue::Set(password_hash),
        role: sea_orm::ActiveValue::Set("admin".to_string()),
        block: sea_orm::ActiveValue::Set(None),
        room: sea_orm::ActiveValue::Set(None),
        created_at: sea_orm::ActiveValue::Set(now),
        ..Default::default()
    };

    new_user.insert(db).await?;
    tracing::info!("Seed admin account created");
    Ok(())
}
