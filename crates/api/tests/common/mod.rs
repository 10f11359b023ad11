//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use parkcheck_api::auth::jwt::{Claims, JwtConfig};
use parkcheck_api::config::ServerConfig;
use parkcheck_api::router::build_app_router;
use parkcheck_api::state::AppState;
use parkcheck_core::geometry::rectangle;
use parkcheck_core::permit::{PermitAreaWindow, PermitSubject};
use parkcheck_core::roles::{ROLE_OPERATOR, ROLE_STAFF};
use parkcheck_db::models::operator::{CreateOperator, Operator};
use parkcheck_db::models::parking::CreateParking;
use parkcheck_db::models::payment_zone::CreatePaymentZone;
use parkcheck_db::models::permit::CreatePermit;
use parkcheck_db::models::permit_area::CreatePermitArea;
use parkcheck_db::models::user::{CreateUser, User};
use parkcheck_db::repositories::{
    OperatorRepo, ParkingRepo, PaymentZoneRepo, PermitAreaRepo, PermitRepo, PermitSeriesRepo,
    UserRepo,
};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, uri, None, body.to_string()).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, uri, Some(token), body.to_string()).await
}

/// POST a raw (possibly malformed) body with a bearer token.
pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    send_json(app, uri, Some(token), body.to_string()).await
}

async fn send_json(app: Router, uri: &str, token: Option<&str>, body: String) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Principals
// ---------------------------------------------------------------------------

/// Mint a 15-minute HS256 token the way an external issuer would.
pub fn token_for(user_id: i64, role: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + 15 * 60,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// A staff user and a bearer token for it.
pub async fn staff(pool: &PgPool) -> (User, String) {
    let user = create_user(pool, "officer", ROLE_STAFF).await;
    let token = token_for(user.id, ROLE_STAFF);
    (user, token)
}

/// An operator (with its linked user) and a bearer token for the user.
pub async fn operator(pool: &PgPool, username: &str) -> (Operator, String) {
    let user = create_user(pool, username, ROLE_OPERATOR).await;
    let operator = OperatorRepo::create(
        pool,
        &CreateOperator {
            user_id: user.id,
            name: format!("{username} Oy"),
        },
    )
    .await
    .expect("operator creation should succeed");
    let token = token_for(user.id, ROLE_OPERATOR);
    (operator, token)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Inside the test zone/area rectangle.
pub fn inside() -> serde_json::Value {
    serde_json::json!({ "longitude": 24.9, "latitude": 60.2 })
}

/// North of the test zone/area rectangle.
pub fn outside() -> serde_json::Value {
    serde_json::json!({ "longitude": 24.9, "latitude": 60.4 })
}

pub async fn seed_zone(pool: &PgPool, number: i16) {
    PaymentZoneRepo::create(
        pool,
        &CreatePaymentZone {
            number,
            name: format!("Zone {number}"),
            geom: rectangle((24.8, 60.1), (25.0, 60.3)),
        },
    )
    .await
    .expect("zone creation should succeed");
}

pub async fn seed_area(pool: &PgPool, identifier: &str) {
    PermitAreaRepo::create(
        pool,
        &CreatePermitArea {
            name: format!("Area {identifier}"),
            identifier: identifier.to_string(),
            geom: rectangle((24.8, 60.1), (25.0, 60.3)),
        },
    )
    .await
    .expect("area creation should succeed");
}

pub async fn seed_parking(
    pool: &PgPool,
    operator_id: i64,
    registration_number: &str,
    zone: i16,
    time_start: DateTime<Utc>,
    time_end: Option<DateTime<Utc>>,
) -> i64 {
    ParkingRepo::create(
        pool,
        &CreateParking {
            registration_number: registration_number.to_string(),
            operator_id,
            zone,
            location: None,
            time_start,
            time_end,
        },
    )
    .await
    .expect("parking creation should succeed")
    .id
}

/// A permit with one subject and one area sharing the same window.
pub async fn seed_permit(
    pool: &PgPool,
    active: bool,
    registration_number: &str,
    area: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> i64 {
    let series = PermitSeriesRepo::create(pool, active).await.unwrap();
    let input = CreatePermit::new(
        series.id,
        None,
        vec![PermitSubject {
            registration_number: registration_number.to_string(),
            start_time,
            end_time,
        }],
        vec![PermitAreaWindow {
            area: area.to_string(),
            start_time,
            end_time,
        }],
    )
    .unwrap();
    PermitRepo::create(pool, &input)
        .await
        .expect("permit creation should succeed")
        .id
}
