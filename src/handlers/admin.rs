use crate::error::{AppError, AppResult};
use crate::handlers::complaint::ComplaintResponse;
use crate::models::{ComplaintModel, UserModel};
use crate::services::admin::AdminService;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListComplaintsQuery {
    /// Filter by category
    pub category: Option<String>,
    /// Filter by status
    pub status: Option<String>,
    /// Filter by priority
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status (Pending, In Progress, Resolved)
    pub status: Option<String>,
}

/// Owner fields exposed to administrators.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintOwner {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub block: Option<String>,
    pub room: Option<String>,
}

impl From<UserModel> for ComplaintOwner {
    fn from(u: UserModel) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            block: u.block,
            room: u.room,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminComplaintResponse {
    #[serde(flatten)]
    pub complaint: ComplaintResponse,
    /// The submitting user's public fields
    pub user: Option<ComplaintOwner>,
}

impl From<(ComplaintModel, Option<UserModel>)> for AdminComplaintResponse {
    fn from((complaint, user): (ComplaintModel, Option<UserModel>)) -> Self {
        Self {
            complaint: ComplaintResponse::from(complaint),
            user: user.map(ComplaintOwner::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminComplaintListResponse {
    /// Matching complaints, newest first
    pub complaints: Vec<AdminComplaintResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStatusResponse {
    /// Outcome message
    pub message: String,
    /// The updated complaint
    pub complaint: ComplaintResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub stats: DashboardStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total: u64,
    pub pending: u64,
    #[serde(rename = "inProgress")]
    pub in_progress: u64,
    pub resolved: u64,
}

#[utoipa::path(
    get,
    path = "/api/admin/complaints",
    security(("jwt_token" = [])),
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("priority" = Option<String>, Query, description = "Filter by priority"),
    ),
    responses(
        (status = 200, description = "All matching complaints with owners", body = AdminComplaintListResponse),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_all_complaints(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<ListComplaintsQuery>,
) -> AppResult<impl IntoResponse> {
    let service = AdminService::new(db);
    let rows = service
        .list_complaints(
            params.category.as_deref(),
            params.status.as_deref(),
            params.priority.as_deref(),
        )
        .await?;

    Ok(Json(AdminComplaintListResponse {
        complaints: rows.into_iter().map(AdminComplaintResponse::from).collect(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/admin/complaints/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Complaint ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 400, description = "Invalid status", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Complaint not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_complaint_status(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let service = AdminService::new(db);
    // A missing status falls through to the same rejection as an unknown one.
    let complaint = service
        .update_status(id, payload.status.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(UpdateStatusResponse {
        message: "Complaint status updated successfully.".to_string(),
        complaint: ComplaintResponse::from(complaint),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Aggregate complaint counts", body = DashboardStatsResponse),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "admin"
)]
pub async fn dashboard_stats(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = AdminService::new(db);
    let stats = service.dashboard_stats().await?;

    Ok(Json(DashboardStatsResponse {
        stats: DashboardStats {
            total: stats.total,
            pending: stats.pending,
            in_progress: stats.in_progress,
            resolved: stats.resolved,
        },
    }))
}
