use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use crate::middleware::auth::{admin_middleware, auth_middleware};
use crate::response::MessageResponse;
use axum::{http::StatusCode, middleware, routing, Json, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes() -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(route_not_found)
}

fn api_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let auth = auth_routes(&rate_limit_config);
    let student =
        complaint_routes(&rate_limit_config).layer(middleware::from_fn(auth_middleware));
    // Layers run outermost first: authenticate, then gate on role.
    let admin = admin_routes(&rate_limit_config)
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn(auth_middleware));

    auth.merge(student).merge(admin)
}

/// Public auth routes: register, login.
fn auth_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/auth/register", routing::post(handlers::register))
        .route("/auth/login", routing::post(handlers::login));

    with_optional_rate_limit(router, config.enabled, config.auth)
}

/// Student routes: submit, list own, delete own pending.
fn complaint_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/complaints",
            routing::post(handlers::complaint::create_complaint)
                .get(handlers::complaint::list_my_complaints),
        )
        .route(
            "/complaints/{id}",
            routing::delete(handlers::complaint::delete_complaint),
        );

    with_optional_rate_limit(router, config.enabled, config.api)
}

/// Admin routes: filtered listing, status updates, dashboard counts.
fn admin_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/admin/complaints",
            routing::get(handlers::admin::list_all_complaints),
        )
        .route(
            "/admin/complaints/{id}",
            routing::patch(handlers::admin::update_complaint_status),
        )
        .route(
            "/admin/stats",
            routing::get(handlers::admin::dashboard_stats),
        );

    with_optional_rate_limit(router, config.enabled, config.api)
}

async fn route_not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Route not found.")),
    )
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
        .expect("Invalid rate limit configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
