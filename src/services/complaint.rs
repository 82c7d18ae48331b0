use crate::{
    error::{AppError, AppResult},
    models::{
        complaint::{self, CATEGORIES, PRIORITIES},
        Complaint, ComplaintModel,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

pub struct ComplaintService {
    db: DatabaseConnection,
}

impl ComplaintService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submit a complaint. Priority defaults to Medium, status starts Pending.
    pub async fn create(
        &self,
        user_id: i32,
        category: &str,
        description: &str,
        priority: Option<&str>,
    ) -> AppResult<ComplaintModel> {
        if !CATEGORIES.contains(&category) {
            return Err(AppError::Validation(format!(
                "Invalid category. Must be one of: {}",
                CATEGORIES.join(", ")
            )));
        }

        if let Some(p) = priority {
            if !PRIORITIES.contains(&p) {
                return Err(AppError::Validation(format!(
                    "Invalid priority. Must be one of: {}",
                    PRIORITIES.join(", ")
                )));
            }
        }

        let now = chrono::Utc::now().naive_utc();
        let model = complaint::ActiveModel {
            user_id: sea_orm::ActiveValue::Set(user_id),
            category: sea_orm::ActiveValue::Set(category.to_string()),
            description: sea_orm::ActiveValue::Set(description.to_string()),
            priority: sea_orm::ActiveValue::Set(
                priority.unwrap_or("Medium").to_string(),
            ),
            status: sea_orm::ActiveValue::Set("Pending".to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let saved = model.insert(&self.db).await?;
        Ok(saved)
    }

    /// All complaints owned by the caller, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ComplaintModel>> {
        let complaints = Complaint::find()
            .filter(complaint::Column::UserId.eq(user_id))
            .order_by_desc(complaint::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(complaints)
    }

    /// Delete a complaint on behalf of its owner.
    /// Checks run in order: existence, ownership, then Pending status.
    pub async fn delete_owned(&self, user_id: i32, complaint_id: i32) -> AppResult<()> {
        let existing = Complaint::find_by_id(complaint_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found.".to_string()))?;

        if existing.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only delete your own complaints.".to_string(),
            ));
        }

        if existing.status != "Pending" {
            return Err(AppError::Validation(
                "Only pending complaints can be deleted.".to_string(),
            ));
        }

        Complaint::delete_by_id(complaint_id).exec(&self.db).await?;
        Ok(())
    }
}
