use crate::common::{self, TestClient};
use axum::http::StatusCode;
use pt_api::router;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_login_me_flow() {
    let Some(state) = common::try_state().await else {
        return;
    };
    let app = router::router().with_state(state.clone());
    let client = TestClient::new(app);

    let email = common::test_data::unique_email("register");

    // Register
    let response = client
        .post_json(
            "/auth/register",
            &json!({
                "email": email,
                "username": "tester",
                "password": "password123"
            }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    assert!(
        response.get_cookie("auth_token").is_some(),
        "Register should set the auth cookie"
    );

    let body: serde_json::Value = response.json();
    assert_eq!(body["email"].as_str().unwrap(), email);
    assert_eq!(body["username"].as_str().unwrap(), "tester");
    assert!(
        body.get("password_hash").is_none(),
        "Password hash must never be serialized"
    );
    let user_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    // Login with the wrong password
    let response = client
        .post_json(
            "/auth/login",
            &json!({ "email": email, "password": "wrong-password" }),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Login with the right password
    let response = client
        .post_json(
            "/auth/login",
            &json!({ "email": email, "password": "password123" }),
        )
        .await;
    response.assert_status(StatusCode::OK);
    assert!(response.get_cookie("auth_token").is_some());

    // Current user
    let token = common::jwt::create_test_token(user_id, &email, &state.jwt_secret);
    let response = client
        .get_with_auth("/auth/me", &token, &state.cookie_key)
        .await;
    response.assert_status(StatusCode::OK);
    let me: serde_json::Value = response.json();
    assert_eq!(me["email"].as_str().unwrap(), email);
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let Some(state) = common::try_state().await else {
        return;
    };
    let app = router::router().with_state(state.clone());
    let client = TestClient::new(app);

    let email = common::test_data::unique_email("duplicate");
    let payload = json!({
        "email": email,
        "username": "first",
        "password": "password123"
    });

    let response = client.post_json("/auth/register", &payload).await;
    response.assert_status(StatusCode::CREATED);

    let response = client.post_json("/auth/register", &payload).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let Some(state) = common::try_state().await else {
        return;
    };
    let app = router::router().with_state(state.clone());
    let client = TestClient::new(app);

    // Password too short
    let response = client
        .post_json(
            "/auth/register",
            &json!({
                "email": common::test_data::unique_email("shortpw"),
                "username": "tester",
                "password": "short"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Not an email address
    let response = client
        .post_json(
            "/auth/register",
            &json!({
                "email": "not-an-email",
                "username": "tester",
                "password": "password123"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let Some(state) = common::try_state().await else {
        return;
    };
    let app = router::router().with_state(state.clone());
    let client = TestClient::new(app);

    for uri in [
        "/progress",
        "/progress/stats",
        "/progress/recent",
        "/auth/me",
    ] {
        let response = client.get(uri).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
