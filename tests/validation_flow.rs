mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{client::TestClient, test_data, TestContext};
use portal_auth::types::code::CodePurpose;
use portal_auth::types::error::AppError;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

async fn stored_code(ctx: &TestContext, user_id: Uuid, purpose: CodePurpose) -> String {
    entity::verification_code::Entity::find_by_id((user_id, purpose.as_str().to_string()))
        .one(ctx.db.conn())
        .await
        .expect("Failed to query code")
        .expect("No code stored")
        .code
}

#[tokio::test]
async fn test_reissue_replaces_previous_code() {
    println!("\n\n[+] Running test: test_reissue_replaces_previous_code");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let (user, _) = client.create_test_user(None).await;

    let first = ctx
        .db
        .issue_code(user.id, CodePurpose::EmailValidate)
        .await
        .expect("Failed to issue first code");
    let second = ctx
        .db
        .issue_code(user.id, CodePurpose::EmailValidate)
        .await
        .expect("Failed to issue second code");
    assert_ne!(first, second);

    println!("[>] The replaced code no longer consumes.");
    assert!(matches!(
        ctx.db
            .consume_code(user.id, CodePurpose::EmailValidate, &first)
            .await,
        Err(AppError::InvalidCode)
    ));

    println!("[>] The current code still does.");
    ctx.db
        .consume_code(user.id, CodePurpose::EmailValidate, &second)
        .await
        .expect("Current code should consume");
    println!("[/] Test passed: reissue invalidates the prior code.");
}

#[tokio::test]
async fn test_code_is_single_use_and_survives_wrong_guesses() {
    println!("\n\n[+] Running test: test_code_is_single_use_and_survives_wrong_guesses");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let (user, _) = client.create_test_user(None).await;
    let code = ctx
        .db
        .issue_code(user.id, CodePurpose::EmailValidate)
        .await
        .expect("Failed to issue code");

    println!("[>] A wrong guess fails and leaves the code intact.");
    assert!(matches!(
        ctx.db
            .consume_code(user.id, CodePurpose::EmailValidate, "00000000000000000000000000000000")
            .await,
        Err(AppError::InvalidCode)
    ));

    println!("[>] The right code then consumes exactly once.");
    ctx.db
        .consume_code(user.id, CodePurpose::EmailValidate, &code)
        .await
        .expect("Right code should consume");
    assert!(matches!(
        ctx.db
            .consume_code(user.id, CodePurpose::EmailValidate, &code)
            .await,
        Err(AppError::InvalidCode)
    ));
    println!("[/] Test passed: one-time use holds.");
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    println!("\n\n[+] Running test: test_expired_code_is_rejected");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let (user, _) = client.create_test_user(None).await;
    let code = ctx
        .db
        .issue_code(user.id, CodePurpose::EmailValidate)
        .await
        .expect("Failed to issue code");

    println!("[>] Backdating the stored expiry.");
    let row = entity::verification_code::Entity::find_by_id((
        user.id,
        CodePurpose::EmailValidate.as_str().to_string(),
    ))
    .one(ctx.db.conn())
    .await
    .expect("Failed to query code")
    .expect("No code stored");
    let mut am: entity::verification_code::ActiveModel = row.into();
    am.expires_at = Set(Utc::now() - Duration::seconds(1));
    am.update(ctx.db.conn()).await.expect("Failed to backdate");

    assert!(matches!(
        ctx.db
            .consume_code(user.id, CodePurpose::EmailValidate, &code)
            .await,
        Err(AppError::InvalidCode)
    ));
    println!("[/] Test passed: codes expire.");
}

#[tokio::test]
async fn test_code_purposes_are_independent_namespaces() {
    println!("\n\n[+] Running test: test_code_purposes_are_independent_namespaces");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let (user, _) = client.create_test_user(None).await;
    let email_code = ctx
        .db
        .issue_code(user.id, CodePurpose::EmailValidate)
        .await
        .expect("Failed to issue email code");
    let reset_code = ctx
        .db
        .issue_code(user.id, CodePurpose::PasswordReset)
        .await
        .expect("Failed to issue reset code");

    println!("[>] A code never crosses into the other purpose.");
    assert!(matches!(
        ctx.db
            .consume_code(user.id, CodePurpose::PasswordReset, &email_code)
            .await,
        Err(AppError::InvalidCode)
    ));

    ctx.db
        .consume_code(user.id, CodePurpose::EmailValidate, &email_code)
        .await
        .expect("Email code consumes under its purpose");
    ctx.db
        .consume_code(user.id, CodePurpose::PasswordReset, &reset_code)
        .await
        .expect("Reset code consumes under its purpose");
    println!("[/] Test passed: purposes are isolated.");
}

#[tokio::test]
async fn test_email_validation_end_to_end() {
    println!("\n\n[+] Running test: test_email_validation_end_to_end");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    println!("[>] Registering Ana.");
    let mut payload = test_data::register_with_email("ana@x.com");
    payload.name = "Ana".to_string();
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    println!("[>] Logging in with the uppercased email.");
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "ANA@X.COM",
            "password": "password1",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: serde_json::Value = test::read_body_json(resp).await;
    let access = login["token"].as_str().unwrap().to_string();
    let user_id: Uuid = login["user"]["id"].as_str().unwrap().parse().unwrap();

    println!("[>] Checking /auth/me.");
    let req = test::TestRequest::post()
        .uri("/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["user"]["name"], "Ana");
    assert!(me["user"]["email_verified_at"].is_null());

    println!("[>] Requesting a validation code.");
    let req = test::TestRequest::post()
        .uri("/auth/email/validate")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] Submitting a wrong code.");
    let req = test::TestRequest::patch()
        .uri("/auth/email/validate")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(serde_json::json!({ "code": "ffffffffffffffffffffffffffffffff" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    println!("[>] Submitting the right code.");
    let code = stored_code(&ctx, user_id, CodePurpose::EmailValidate).await;
    let req = test::TestRequest::patch()
        .uri("/auth/email/validate")
        .insert_header(("Authorization", format!("Bearer {}", access)))
        .set_json(serde_json::json!({ "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user = ctx.db.get_user_by_id(&user_id).await.expect("user exists");
    assert!(user.email_verified_at.is_some());
    println!("[/] Test passed: full email validation flow.");
}

#[tokio::test]
async fn test_password_reset_flow() {
    println!("\n\n[+] Running test: test_password_reset_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (user, _) = client
        .create_test_user(Some("reset@x.com".to_string()))
        .await;

    println!("[>] Requesting a reset code.");
    let req = test::TestRequest::post()
        .uri("/auth/password/forgot")
        .set_json(serde_json::json!({ "email": "reset@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let code = stored_code(&ctx, user.id, CodePurpose::PasswordReset).await;

    println!("[>] Resetting the password with the code.");
    let req = test::TestRequest::post()
        .uri("/auth/password/reset")
        .set_json(serde_json::json!({
            "email": "reset@x.com",
            "code": code,
            "password": "newpassword9",
            "password_confirmation": "newpassword9",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] Old password no longer logs in; the new one does.");
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "reset@x.com",
            "password": common::client::TEST_PASSWORD,
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({
            "email": "reset@x.com",
            "password": "newpassword9",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    println!("[>] The consumed code cannot be reused.");
    let req = test::TestRequest::post()
        .uri("/auth/password/reset")
        .set_json(serde_json::json!({
            "email": "reset@x.com",
            "code": code,
            "password": "anotherpass1",
            "password_confirmation": "anotherpass1",
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
    println!("[/] Test passed: password reset round-trip.");
}

#[tokio::test]
async fn test_forgot_password_does_not_reveal_registration() {
    println!("\n\n[+] Running test: test_forgot_password_does_not_reveal_registration");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    client
        .create_test_user(Some("known@x.com".to_string()))
        .await;

    let req = test::TestRequest::post()
        .uri("/auth/password/forgot")
        .set_json(serde_json::json!({ "email": "known@x.com" }))
        .to_request();
    let resp_known = test::call_service(&app, req).await;
    assert_eq!(resp_known.status(), StatusCode::OK);
    let body_known = test::read_body(resp_known).await;

    let req = test::TestRequest::post()
        .uri("/auth/password/forgot")
        .set_json(serde_json::json!({ "email": "unknown@x.com" }))
        .to_request();
    let resp_unknown = test::call_service(&app, req).await;
    assert_eq!(resp_unknown.status(), StatusCode::OK);
    let body_unknown = test::read_body(resp_unknown).await;

    assert_eq!(body_known, body_unknown);
    println!("[/] Test passed: forgot-password replies identically either way.");
}
