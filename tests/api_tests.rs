use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use eventlogd::auth::Authenticator;
use eventlogd::db::{EventStore, UserStore};
use eventlogd::router::{app_router, AppState};

/// Build an app backed by a throwaway SQLite file, schema initialized and
/// sample data seeded.
async fn test_app() -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "eventlogd-api-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = eventlogd::db::connect(&database_url)
        .await
        .expect("failed to open test database");
    eventlogd::db::init_schema(&pool)
        .await
        .expect("failed to init schema");

    let users = UserStore::new(pool.clone());
    let events = EventStore::new(pool);
    eventlogd::seed::run(&events, &users)
        .await
        .expect("failed to seed test database");

    let state = AppState::new(Authenticator::new(users), events);
    (app_router(state), temp_path)
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json_body: Option<Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match json_body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed")
}

async fn login(app: &Router, username: &str, password: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/token")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={username}&password={password}"
                )))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn bearer_token(app: &Router) -> String {
    let resp = login(app, "admin", "adminpass").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["token_type"], "bearer");
    json["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string()
}

#[tokio::test]
async fn login_and_list_seeded_events() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(&app, Method::GET, "/logeventos/", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let events = json.as_array().expect("expected a JSON array");
    assert_eq!(events.len(), 5);
    assert_eq!(events[0]["descricao"], "Sistema iniciado");
    assert_eq!(events[0]["tipo"], "INFO");
    assert_eq!(events[4]["tipo"], "SUCCESS");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn login_with_bad_credentials_returns_401() {
    let (app, temp_path) = test_app().await;

    let resp = login(&app, "admin", "wrongpass").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
    let json = body_json(resp).await;
    assert_eq!(json["detail"], "Usuário ou senha incorretos!");

    let resp = login(&app, "nobody", "whatever").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let (app, temp_path) = test_app().await;

    let resp = send(&app, Method::GET, "/logeventos/", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(&app, Method::GET, "/logeventos/", Some("garbage"), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let (app, temp_path) = test_app().await;

    let secret = &eventlogd::config::CONFIG.secret_key;
    let stale =
        eventlogd::auth::token::issue_token("admin", secret, Duration::minutes(-5)).unwrap();
    let resp = send(&app, Method::GET, "/logeventos/", Some(&stale), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["detail"], "Token expirado.");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(
        &app,
        Method::POST,
        "/logeventos/",
        Some(&token),
        Some(serde_json::json!({"descricao": "x", "tipo": "INFO", "usuario": "tester"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    let id = created["id"].as_i64().expect("missing id");
    assert!(id > 0);
    assert!(created["data_criacao"].is_string());

    let resp = send(
        &app,
        Method::GET,
        &format!("/logeventos/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["descricao"], "x");
    assert_eq!(fetched["tipo"], "INFO");
    assert_eq!(fetched["usuario"], "tester");
    assert_eq!(fetched["data_criacao"], created["data_criacao"]);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn get_unknown_id_returns_404() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(&app, Method::GET, "/logeventos/999", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["detail"], "Log de evento não encontrado");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn put_replaces_all_mutable_fields() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(&app, Method::GET, "/logeventos/1", Some(&token), None).await;
    let before = body_json(resp).await;

    let resp = send(
        &app,
        Method::PUT,
        "/logeventos/1",
        Some(&token),
        Some(serde_json::json!({"descricao": "substituído"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let after = body_json(resp).await;
    assert_eq!(after["descricao"], "substituído");
    // omitted fields are replaced with null on a full update
    assert!(after["tipo"].is_null());
    assert!(after["usuario"].is_null());
    assert_eq!(after["data_criacao"], before["data_criacao"]);

    let resp = send(
        &app,
        Method::PUT,
        "/logeventos/999",
        Some(&token),
        Some(serde_json::json!({"descricao": "x"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(
        &app,
        Method::PATCH,
        "/logeventos/1",
        Some(&token),
        Some(serde_json::json!({"tipo": "ERROR"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let patched = body_json(resp).await;
    assert_eq!(patched["tipo"], "ERROR");
    assert_eq!(patched["descricao"], "Sistema iniciado");
    assert_eq!(patched["usuario"], "admin");

    let resp = send(
        &app,
        Method::PATCH,
        "/logeventos/999",
        Some(&token),
        Some(serde_json::json!({"tipo": "ERROR"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let (app, temp_path) = test_app().await;
    let token = bearer_token(&app).await;

    let resp = send(&app, Method::DELETE, "/logeventos/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, Method::GET, "/logeventos/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, Method::DELETE, "/logeventos/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn user_account_can_also_login() {
    let (app, temp_path) = test_app().await;

    let resp = login(&app, "user", "userpass").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let token = json["access_token"].as_str().expect("missing access_token");
    assert_eq!(
        eventlogd::auth::token::validate_token(token, &eventlogd::config::CONFIG.secret_key)
            .unwrap(),
        "user"
    );

    let _ = fs::remove_file(&temp_path);
}
