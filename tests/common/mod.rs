#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
static USER_COUNTER: AtomicUsize = AtomicUsize::new(0);

// Tests share one database and truncate it per app, so they must not overlap.
static TEST_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        // Deterministic tests: no throttling
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
        let config = dormdesk::config::jwt::JwtConfig::from_env().unwrap();
        let _ = dormdesk::utils::jwt::init_jwt_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    _guard: tokio::sync::MutexGuard<'static, ()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let guard = TEST_LOCK.lock().await;

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        dormdesk::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    // Clean data tables (reverse dependency order)
    cleanup_tables(&db).await;

    let app = dormdesk::routes::create_routes().layer(axum::extract::Extension(db.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let addr_str = format!("http://{}", addr);
    let client = Client::new();

    TestApp {
        addr: addr_str,
        db,
        client,
        _guard: guard,
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    let tables = ["complaints", "users"];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} CASCADE", table);
        let _ = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await;
    }
}

/// Register a student and return (user_id, token).
pub async fn register_user(app: &TestApp, name_prefix: &str) -> (i32, String) {
    let counter = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    let unique_name = format!("{}_{}", name_prefix, counter);

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": unique_name,
            "email": format!("{}@test.com", unique_name),
            "password": "test_password_123",
            "block": "B",
            "room": "204"
        }))
        .send()
        .await
        .expect("Failed to register user");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.unwrap_or_else(|e| {
        panic!(
            "Failed to parse register response for user '{}': status={}, error={}",
            unique_name, status, e
        );
    });

    if status != 201 {
        panic!(
            "Failed to register user '{}': status={}, body={}",
            unique_name, status, body
        );
    }

    let user_id = body["user"]["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("Response missing user id for '{}': {:?}", unique_name, body))
        as i32;
    let token = body["token"]
        .as_str()
        .unwrap_or_else(|| panic!("Response missing token for '{}': {:?}", unique_name, body))
        .to_string();
    (user_id, token)
}

/// Submit a complaint and return its id.
pub async fn create_complaint(
    app: &TestApp,
    token: &str,
    category: &str,
    description: &str,
    priority: Option<&str>,
) -> i32 {
    let mut payload = serde_json::json!({
        "category": category,
        "description": description,
    });
    if let Some(p) = priority {
        payload["priority"] = serde_json::json!(p);
    }

    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to submit complaint");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");

    if status != 201 {
        panic!("Failed to submit complaint: status={}, body={}", status, body);
    }

    body["complaint"]["id"]
        .as_i64()
        .expect("Response missing complaint id") as i32
}

/// Make a user admin by directly updating the database.
pub async fn make_admin(db: &DatabaseConnection, user_id: i32) {
    db.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        "UPDATE users SET role = 'admin' WHERE id = $1",
        vec![user_id.into()],
    ))
    .await
    .expect("Failed to make user admin");
}

/// Register a user and promote it to admin. The token stays valid because the
/// role check reads the users table, not the claim.
pub async fn register_admin(app: &TestApp, name_prefix: &str) -> (i32, String) {
    let (user_id, token) = register_user(app, name_prefix).await;
    make_admin(&app.db, user_id).await;
    (user_id, token)
}

/// Set a complaint's status through the admin endpoint.
pub async fn set_status(app: &TestApp, admin_token: &str, complaint_id: i32, status: &str) {
    let resp = app
        .client
        .patch(app.url(&format!("/admin/complaints/{}", complaint_id)))
        .bearer_auth(admin_token)
        .json(&serde_json::json!({ "status": status }))
        .send()
        .await
        .expect("Failed to update status");

    assert_eq!(resp.status(), 200, "status update failed");
}
