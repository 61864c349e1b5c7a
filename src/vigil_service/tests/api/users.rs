use serde_json::{Value, json};
use vigil_core::{CheckId, UserStore};

use crate::helpers::{TestApp, signup_body};

#[tokio::test]
async fn should_create_user_and_store_only_a_hash() {
    let app = TestApp::new().await;

    let response = app.post_user(&signup_body("+15551234567")).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["phoneNumber"], json!("15551234567"));
    assert!(body.get("password").is_none());

    let stored = app.stored_user("15551234567").await.unwrap();
    assert_ne!(stored.password_hash().as_ref(), "Passw0rd!");
    assert!(stored.password_hash().as_ref().starts_with("$argon2id$"));
}

#[tokio::test]
async fn should_return_409_for_existing_user() {
    let app = TestApp::new().await;

    app.post_user(&signup_body("+15551234567")).await;
    let response = app.post_user(&signup_body("15551234567")).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("User already exists"));
}

#[tokio::test]
async fn should_return_400_for_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        json!({}),
        json!({ "phoneNumber": "+15551234567" }),
        json!({ "phoneNumber": "+15551234567", "email": "jane@example.com",
                "firstName": "Jane", "lastName": "Doe", "password": "password",
                "tosAgreement": true }),
        json!({ "phoneNumber": "+15551234567", "email": "jane@example.com",
                "firstName": "Jane", "lastName": "Doe", "password": "Passw0rd!",
                "tosAgreement": false }),
    ];

    for test_case in test_cases {
        let response = app.post_user(&test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
    assert!(app.stored_user("15551234567").await.is_none());
}

#[tokio::test]
async fn should_read_user_without_password() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;
    let before = app.stored_user("15551234567").await;

    let token = app.token_for("15551234567");
    let response = app.get_user("15551234567", Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["firstName"], json!("Jane"));
    assert!(body.get("password").is_none());
    assert_eq!(app.stored_user("15551234567").await, before);
}

#[tokio::test]
async fn should_return_401_without_valid_token() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;

    let missing = app.get_user("15551234567", None).await;
    assert_eq!(missing.status().as_u16(), 401);

    let expired = app.expired_token_for("15551234567");
    let response = app.get_user("15551234567", Some(&expired)).await;
    assert_eq!(response.status().as_u16(), 401);

    let someone_else = app.token_for("15559999999");
    let response = app.delete_user("15551234567", &someone_else).await;
    assert_eq!(response.status().as_u16(), 401);
    assert!(app.stored_user("15551234567").await.is_some());
}

#[tokio::test]
async fn should_update_user() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;
    let token = app.token_for("15551234567");

    let response = app
        .put_user(
            &json!({ "phoneNumber": "15551234567", "email": "new@example.com" }),
            &token,
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], json!("new@example.com"));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn should_return_400_when_nothing_to_update() {
    let app = TestApp::new().await;
    let token = app.token_for("15551234567");

    let response = app
        .put_user(&json!({ "phoneNumber": "15551234567" }), &token)
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Nothing to update"));
}

#[tokio::test]
async fn should_delete_user_and_checks() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;
    app.give_checks("15551234567", &["c1", "c2", "c3"]).await;
    let token = app.token_for("15551234567");

    let response = app.delete_user("15551234567", &token).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("User deleted"));
    assert!(app.stored_user("15551234567").await.is_none());

    let again = app.delete_user("15551234567", &token).await;
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn should_delete_user_identified_in_body() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;
    let token = app.token_for("15551234567");

    let response = app
        .delete_user_with_body(&json!({ "phoneNumber": "+15551234567" }), &token)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(app.stored_user("15551234567").await.is_none());
}

#[tokio::test]
async fn should_return_500_when_a_check_cannot_be_deleted() {
    let app = TestApp::new().await;
    app.post_user(&signup_body("+15551234567")).await;
    app.give_checks("15551234567", &["c1"]).await;
    let user = app.stored_user("15551234567").await.unwrap();
    let mut checks = user.checks().to_vec();
    checks.push(CheckId::new("never-existed"));
    app.user_store
        .update_user(user.with_checks(checks))
        .await
        .unwrap();
    let token = app.token_for("15551234567");

    let response = app.delete_user("15551234567", &token).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Error deleting checks" }));
}

#[tokio::test]
async fn should_return_405_for_unsupported_method() {
    let app = TestApp::new().await;

    let response = app.patch_users().await;

    assert_eq!(response.status().as_u16(), 405);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], json!("Method not allowed"));
}
