//! 路由层集成测试：认证、角色、参数校验与正常流程

use actix_web::{App, dev::ServiceResponse, http::StatusCode, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaObjectCache;
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::utils::password::hash_password;
use crate::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Sch00l-Admin";

async fn seeded_storage() -> Arc<dyn Storage> {
    let storage: Arc<dyn Storage> =
        Arc::new(SeaOrmStorage::in_memory().await.expect("in-memory storage"));
    storage.seed_fixtures().await.expect("fixtures");

    for (username, role) in [("admin", UserRole::Admin), ("clerk", UserRole::Staff)] {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@school.edu"),
                password: hash_password(PASSWORD).expect("hash"),
                role,
                display_name: None,
            })
            .await
            .expect("user");
    }
    storage
}

macro_rules! init_app {
    ($storage:expr) => {{
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::new(1_000, 60));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage))
                .app_data(web::Data::new(cache))
                .configure(super::configure_routes),
        )
        .await
    }};
}

async fn body(resp: ServiceResponse) -> Value {
    test::read_body_json(resp).await
}

/// 登录并返回 access token，`$client` 区分限流计数
macro_rules! login {
    ($app:expr, $username:expr, $client:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", $client))
            .set_json(json!({ "username": $username, "password": PASSWORD }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        body(resp).await["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_api_requires_token() {
    let app = init_app!(seeded_storage().await);

    for uri in [
        "/api/v1/students",
        "/api/v1/teachers",
        "/api/v1/subjects",
        "/api/v1/classrooms",
        "/api/v1/enrollments",
        "/api/v1/dashboard/stats",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/students")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let app = init_app!(seeded_storage().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.2"))
        .set_json(json!({ "username": "admin", "password": "Wrong-Pass1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_student_crud_happy_path() {
    let app = init_app!(seeded_storage().await);
    let token = login!(&app, "admin", "10.0.0.3");

    let req = test::TestRequest::get()
        .uri("/api/v1/students?page=1&size=5")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body(resp).await;
    assert_eq!(listed["data"]["pagination"]["total"], 8);
    assert_eq!(listed["data"]["items"].as_array().unwrap().len(), 5);

    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Rafael Lima",
            "email": "rafael.lima@school.edu",
            "date_of_birth": "2012-04-18",
            "enrollment_number": "STU-2025-100",
            "phone": "+55 11 95555-0101",
            "address": "Rua Vergueiro, 77"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body(resp).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/students/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "phone": "+55 11 95555-0202" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await["data"]["phone"], "+55 11 95555-0202");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/students/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_requires_admin() {
    let app = init_app!(seeded_storage().await);
    let token = login!(&app, "clerk", "10.0.0.4");

    // staff 可以读写
    let req = test::TestRequest::get()
        .uri("/api/v1/subjects/1")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for uri in [
        "/api/v1/students/1",
        "/api/v1/teachers/1",
        "/api/v1/subjects/1",
        "/api/v1/classrooms/1",
        "/api/v1/enrollments/1",
    ] {
        let req = test::TestRequest::delete()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[actix_web::test]
async fn test_validation_errors_are_400() {
    let app = init_app!(seeded_storage().await);
    let token = login!(&app, "admin", "10.0.0.5");

    // 缺少必填字段
    let req = test::TestRequest::post()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Only Name" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 非法 ID
    let req = test::TestRequest::get()
        .uri("/api/v1/classrooms/abc")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 非法 JSON
    let req = test::TestRequest::post()
        .uri("/api/v1/subjects")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body(resp).await["code"].as_i64().is_some());

    // 非法状态筛选
    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments?status=graduated")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_enrollment_filters_and_dashboard() {
    let app = init_app!(seeded_storage().await);
    let token = login!(&app, "admin", "10.0.0.6");

    let req = test::TestRequest::get()
        .uri("/api/v1/enrollments?status=pending")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body(resp).await;
    let items = listed["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["status"] == "pending"));
    assert!(items.iter().all(|item| item["student_name"].is_string()));

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/stats")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await["data"]["enrollments"]["active"], 5);
}

#[actix_web::test]
async fn test_session_lifecycle() {
    let app = init_app!(seeded_storage().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.7"))
        .set_json(json!({
            "username": "clerk@school.edu",
            "password": PASSWORD,
            "remember_me": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refresh_cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == crate::utils::jwt::REFRESH_COOKIE_NAME)
        .expect("refresh cookie")
        .into_owned();
    assert!(refresh_cookie.http_only().unwrap_or(false));
    let token = body(resp).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await["data"]["user"]["role"], "staff");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(refresh_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body(resp).await["data"]["access_token"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_creates_staff_account() {
    let app = init_app!(seeded_storage().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-Forwarded-For", "10.0.0.8"))
        .set_json(json!({
            "username": "secretary",
            "email": "secretary@school.edu",
            "password": "Front-Desk42"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body(resp).await;
    assert_eq!(created["data"]["role"], "staff");
    assert!(created["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-Forwarded-For", "10.0.0.8"))
        .set_json(json!({
            "username": "secretary",
            "email": "other@school.edu",
            "password": "Front-Desk42"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_unknown_api_path_is_json_404() {
    let app = init_app!(seeded_storage().await);
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/nothing-here").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(resp).await["code"], 1004);
}
