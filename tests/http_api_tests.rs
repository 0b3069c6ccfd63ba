mod common;

use actix_web::{
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};

use common::test_context;
use eduportal_server::{
    app_state::AppState,
    handlers,
    middleware::RequestIdMiddleware,
    models::{
        domain::UserRole,
        dto::request::{LoginRequest, RegisterUserRequest},
    },
};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(RequestIdMiddleware)
                .configure(handlers::configure),
        )
        .await
    };
}

async fn token_for(state: &AppState, email: &str, role: UserRole) -> String {
    state
        .user_service
        .register(RegisterUserRequest {
            name: Some("Riley".to_string()),
            email: Some(email.to_string()),
            phone: None,
            role: Some(role),
            password: Some("pw-1234".to_string()),
        })
        .await
        .unwrap();

    state
        .auth_service
        .login(LoginRequest {
            email: Some(email.to_string()),
            password: Some("pw-1234".to_string()),
        })
        .await
        .unwrap()
        .token
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_web::test]
async fn health_endpoint_responds() {
    let app = init_app!(test_context().state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn protected_route_without_token_is_unauthorized() {
    let ctx = test_context();
    let app = init_app!(ctx.state);

    let req = test::TestRequest::post()
        .uri("/api/assignments")
        .set_json(json!({ "title": "Sneaky" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(body["code"], 401);
    assert_eq!(ctx.assignments.len().await, 0);
}

#[actix_web::test]
async fn malformed_authorization_header_is_unauthorized() {
    let app = init_app!(test_context().state);

    for value in ["Token abc", "Bearer ", "Bearer not.a.jwt"] {
        let req = test::TestRequest::post()
            .uri("/api/assignments/some-id/submit")
            .insert_header((header::AUTHORIZATION, value))
            .set_json(json!({ "answer": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", value);
    }
}

#[actix_web::test]
async fn student_cannot_create_assignments() {
    let state = test_context().state;
    let token = token_for(&state, "stu@example.com", UserRole::Student).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assignments")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Mine now" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn submission_ignores_spoofed_student_fields() {
    let state = test_context().state;
    let teacher = token_for(&state, "teach@example.com", UserRole::Teacher).await;
    let student = token_for(&state, "stu@example.com", UserRole::Student).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/assignments")
        .insert_header(bearer(&teacher))
        .set_json(json!({ "title": "HW1", "dueDate": "2030-05-01" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["assignment"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["assignment"]["status"], "Draft");

    let req = test::TestRequest::post()
        .uri(&format!("/api/assignments/{}/submit", id))
        .insert_header(bearer(&student))
        .set_json(json!({
            "answer": "42",
            "studentName": "Mallory",
            "studentEmail": "mallory@example.com"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["submission"]["studentEmail"], "stu@example.com");
    assert_eq!(body["submission"]["studentName"], "Riley");
    assert_eq!(body["submission"]["reviewed"], false);

    let submission_id = body["submission"]["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::put()
        .uri(&format!("/api/assignments/{}/review/{}", id, submission_id))
        .insert_header(bearer(&teacher))
        .to_request();
    let reviewed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reviewed["submission"]["reviewed"], true);
}

#[actix_web::test]
async fn published_route_is_not_captured_by_id_route() {
    let app = init_app!(test_context().state);

    let req = test::TestRequest::get()
        .uri("/api/assignments/published")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["assignments"], json!([]));
}

#[actix_web::test]
async fn unknown_assignment_is_a_json_not_found() {
    let app = init_app!(test_context().state);

    let req = test::TestRequest::get()
        .uri("/api/assignments/missing")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Assignment not found");
    assert_eq!(body["code"], 404);
}

#[actix_web::test]
async fn malformed_json_body_is_a_validation_error() {
    let app = init_app!(test_context().state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn registration_response_omits_password_material() {
    let app = init_app!(test_context().state);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Quinn",
            "email": "quinn@example.com",
            "role": "Admin",
            "password": "topsecret"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "User added successfully");
    assert_eq!(body["user"]["email"], "quinn@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(!body.to_string().contains("topsecret"));
}
