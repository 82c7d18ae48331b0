use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::ComplaintModel;
use crate::response::MessageResponse;
use crate::services::complaint::ComplaintService;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintRequest {
    /// Complaint category (Electrical, Plumbing, Internet, Cleaning, Other)
    pub category: Option<String>,
    /// Issue description (10-2000 characters)
    #[validate(length(min = 10, max = 2000))]
    pub description: Option<String>,
    /// Priority (Low, Medium, High); defaults to Medium
    pub priority: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintResponse {
    /// Complaint ID
    pub id: i32,
    /// Owning user ID
    pub user_id: i32,
    /// Category
    pub category: String,
    /// Description
    pub description: String,
    /// Priority
    pub priority: String,
    /// Status
    pub status: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl From<ComplaintModel> for ComplaintResponse {
    fn from(c: ComplaintModel) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            category: c.category,
            description: c.description,
            priority: c.priority,
            status: c.status,
            created_at: c.created_at.to_string(),
            updated_at: c.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateComplaintResponse {
    /// Outcome message
    pub message: String,
    /// The created complaint
    pub complaint: ComplaintResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintListResponse {
    /// Caller's complaints, newest first
    pub complaints: Vec<ComplaintResponse>,
}

#[utoipa::path(
    post,
    path = "/api/complaints",
    security(("jwt_token" = [])),
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint submitted", body = CreateComplaintResponse),
        (status = 400, description = "Missing or invalid field", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "complaints"
)]
pub async fn create_complaint(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateComplaintRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(category), Some(description)) = (
        payload.category.as_deref(),
        payload.description.as_deref(),
    ) else {
        return Err(AppError::Validation(
            "Category and description are required.".to_string(),
        ));
    };
    if category.is_empty() || description.is_empty() {
        return Err(AppError::Validation(
            "Category and description are required.".to_string(),
        ));
    }

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ComplaintService::new(db);
    let complaint = service
        .create(auth_user.user_id, category, description, payload.priority.as_deref())
        .await?;

    let response = CreateComplaintResponse {
        message: "Complaint submitted successfully.".to_string(),
        complaint: ComplaintResponse::from(complaint),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/complaints",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Caller's complaints", body = ComplaintListResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "complaints"
)]
pub async fn list_my_complaints(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let service = ComplaintService::new(db);
    let complaints = service.list_for_user(auth_user.user_id).await?;

    Ok(Json(ComplaintListResponse {
        complaints: complaints.into_iter().map(ComplaintResponse::from).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint deleted", body = MessageResponse),
        (status = 400, description = "Complaint is not pending", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 403, description = "Not the owner", body = AppError),
        (status = 404, description = "Complaint not found", body = AppError),
    ),
    tag = "complaints"
)]
pub async fn delete_complaint(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = ComplaintService::new(db);
    service.delete_owned(auth_user.user_id, id).await?;

    Ok(Json(MessageResponse::new("Complaint deleted successfully.")))
}
