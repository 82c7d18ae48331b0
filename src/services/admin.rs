use crate::{
    error::{AppError, AppResult},
    models::{
        complaint::{self, STATUSES},
        Complaint, ComplaintModel, User, UserModel,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub struct AdminService {
    db: DatabaseConnection,
}

impl AdminService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All complaints matching the supplied equality filters (AND-combined),
    /// each joined with its owner, newest first.
    pub async fn list_complaints(
        &self,
        category: Option<&str>,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> AppResult<Vec<(ComplaintModel, Option<UserModel>)>> {
        let mut query = Complaint::find().find_also_related(User);

        if let Some(c) = category {
            query = query.filter(complaint::Column::Category.eq(c));
        }
        if let Some(s) = status {
            query = query.filter(complaint::Column::Status.eq(s));
        }
        if let Some(p) = priority {
            query = query.filter(complaint::Column::Priority.eq(p));
        }

        let rows = query
            .order_by_desc(complaint::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Set a complaint's status. Any status is reachable from any status.
    pub async fn update_status(
        &self,
        complaint_id: i32,
        status: &str,
    ) -> AppResult<ComplaintModel> {
        if !STATUSES.contains(&status) {
            return Err(AppError::Validation(format!(
                "Invalid status. Must be one of: {}",
                STATUSES.join(", ")
            )));
        }

        let existing = Complaint::find_by_id(complaint_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Complaint not found.".to_string()))?;

        let now = chrono::Utc::now().naive_utc();
        let mut active: complaint::ActiveModel = existing.into();
        active.status = sea_orm::ActiveValue::Set(status.to_string());
        active.updated_at = sea_orm::ActiveValue::Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    pub async fn dashboard_stats(&self) -> AppResult<ComplaintStats> {
        let total = Complaint::find().count(&self.db).await?;
        let pending = self.count_by_status("Pending").await?;
        let in_progress = self.count_by_status("In Progress").await?;
        let resolved = self.count_by_status("Resolved").await?;

        Ok(ComplaintStats {
            total,
            pending,
            in_progress,
            resolved,
        })
    }

    async fn count_by_status(&self, status: &str) -> AppResult<u64> {
        let count = Complaint::find()
            .filter(complaint::Column::Status.eq(status))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}

pub struct ComplaintStats {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}
