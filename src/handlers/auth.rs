use crate::error::{AppError, AppResult};
use crate::models::UserModel;
use crate::services::auth::AuthService;
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Full name (2-100 characters)
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    /// Email address
    #[validate(email)]
    pub email: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Hostel block
    pub block: Option<String>,
    /// Room number
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,
    /// Password
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID
    pub id: i32,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role (student or admin)
    pub role: String,
    /// Hostel block
    pub block: Option<String>,
    /// Room number
    pub room: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            block: user.block,
            room: user.room,
            created_at: user.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Outcome message
    pub message: String,
    /// Signed bearer token carrying user id and role
    pub token: String,
    /// The account, password hash excluded
    pub user: UserResponse,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Missing or invalid field", body = AppError),
        (status = 409, description = "Email already registered", body = AppError),
    ),
    tag = "auth"
)]
pub async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(name), Some(email), Some(password)) = (
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.password.as_deref(),
    ) else {
        return Err(AppError::Validation(
            "Name, email, and password are required.".to_string(),
        ));
    };
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Name, email, and password are required.".to_string(),
        ));
    }

    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = AuthService::new(db);
    let (user, token) = service
        .register(
            name,
            email,
            password,
            payload.block.as_deref(),
            payload.room.as_deref(),
        )
        .await?;

    let response = AuthResponse {
        message: "Registration successful.".to_string(),
        token,
        user: UserResponse::from(user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing field", body = AppError),
        (status = 401, description = "Invalid credentials", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (payload.email.as_deref(), payload.password.as_deref())
    else {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    };
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    }

    let service = AuthService::new(db);
    let (user, token) = service.login(email, password).await?;

    let response = AuthResponse {
        message: "Login successful.".to_string(),
        token,
        user: UserResponse::from(user),
    };

    Ok(Json(response))
}
