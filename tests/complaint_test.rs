mod common;

use serde_json::Value;
use std::time::Duration;

#[tokio::test]
async fn submit_complaint_applies_defaults() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "category": "Electrical",
            "description": "Light not working in room"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Complaint submitted successfully.");
    assert_eq!(body["complaint"]["category"], "Electrical");
    assert_eq!(body["complaint"]["priority"], "Medium");
    assert_eq!(body["complaint"]["status"], "Pending");
}

#[tokio::test]
async fn submit_complaint_requires_auth() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/complaints"))
        .json(&serde_json::json!({
            "category": "Electrical",
            "description": "Light not working in room"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn description_length_boundaries() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    // 9 characters: rejected
    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "category": "Plumbing",
            "description": "drip drip"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // 10 characters: accepted
    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "category": "Plumbing",
            "description": "drip drips"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
}

#[tokio::test]
async fn invalid_category_rejected() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "category": "Heating",
            "description": "Radiator is stone cold"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid category"));
}

#[tokio::test]
async fn invalid_priority_rejected() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "category": "Internet",
            "description": "WiFi drops every few minutes",
            "priority": "Urgent"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid priority"));
}

#[tokio::test]
async fn missing_category_or_description_rejected() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let resp = app
        .client
        .post(app.url("/complaints"))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "description": "The corridor bin has not been emptied"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Category and description are required.");
}

#[tokio::test]
async fn list_returns_only_own_complaints_newest_first() {
    let app = common::spawn_app().await;
    let (_a_id, a_token) = common::register_user(&app, "owner").await;
    let (_b_id, b_token) = common::register_user(&app, "other").await;

    let first =
        common::create_complaint(&app, &a_token, "Electrical", "Socket sparks when used", None)
            .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second =
        common::create_complaint(&app, &a_token, "Cleaning", "Common room needs cleaning", None)
            .await;
    common::create_complaint(&app, &b_token, "Internet", "No signal on third floor", None).await;

    let resp = app
        .client
        .get(app.url("/complaints"))
        .bearer_auth(&a_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let complaints = body["complaints"].as_array().unwrap();
    assert_eq!(complaints.len(), 2);
    assert_eq!(complaints[0]["id"].as_i64().unwrap() as i32, second);
    assert_eq!(complaints[1]["id"].as_i64().unwrap() as i32, first);
}

#[tokio::test]
async fn delete_own_pending_complaint() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let id =
        common::create_complaint(&app, &token, "Other", "Door handle came off entirely", None)
            .await;

    let resp = app
        .client
        .delete(app.url(&format!("/complaints/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Complaint deleted successfully.");

    let resp = app
        .client
        .get(app.url("/complaints"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["complaints"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn delete_rejected_for_non_owner() {
    let app = common::spawn_app().await;
    let (_a_id, a_token) = common::register_user(&app, "owner").await;
    let (_b_id, b_token) = common::register_user(&app, "other").await;

    let id = common::create_complaint(&app, &a_token, "Plumbing", "Shower drain is blocked", None)
        .await;

    let resp = app
        .client
        .delete(app.url(&format!("/complaints/{}", id)))
        .bearer_auth(&b_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "You can only delete your own complaints.");
}

#[tokio::test]
async fn delete_missing_complaint_returns_404() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;

    let resp = app
        .client
        .delete(app.url("/complaints/999999"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Complaint not found.");
}

#[tokio::test]
async fn delete_rejected_once_in_progress() {
    let app = common::spawn_app().await;
    let (_user_id, token) = common::register_user(&app, "student").await;
    let (_admin_id, admin_token) = common::register_admin(&app, "warden").await;

    let id = common::create_complaint(&app, &token, "Internet", "Router reboots constantly", None)
        .await;
    common::set_status(&app, &admin_token, id, "In Progress").await;

    let resp = app
        .client
        .delete(app.url(&format!("/complaints/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Only pending complaints can be deleted.");
}
