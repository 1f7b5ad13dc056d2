//! Request helpers for router tests.

use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    app::build_app,
    auth::{jwt::JwtKeys, password::hash_password},
    state::AppState,
    users::repo_types::{NewUser, User},
};

const BOUNDARY: &str = "----vivero-test-boundary";

/// Sends `req` through a fresh router over `state`. Non-JSON bodies come
/// back as a JSON string.
pub async fn call(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
    let res = build_app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if body.is_null() {
        builder.body(Body::empty()).unwrap()
    } else {
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

pub enum Part {
    Text(&'static str, &'static str),
    File(&'static str, &'static str, &'static [u8]),
}

impl Part {
    pub fn text(name: &'static str, value: &'static str) -> Self {
        Part::Text(name, value)
    }

    pub fn file(name: &'static str, file_name: &'static str, body: &'static [u8]) -> Self {
        Part::File(name, file_name, body)
    }
}

pub fn multipart_request(uri: &str, parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn seed_user(state: &AppState, email: &str, password: &str) -> User {
    state
        .users
        .create(NewUser {
            name: "Ana".into(),
            email: email.into(),
            password: hash_password(password).unwrap(),
            image: None,
            role: "USER_ROLE".into(),
            google: false,
        })
        .await
        .unwrap()
}

/// A valid bearer token for some user id.
pub fn token_for(state: &AppState) -> String {
    JwtKeys::from_ref(state).sign(&ObjectId::new().to_hex()).unwrap()
}
