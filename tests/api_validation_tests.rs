// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request validation tests.
//!
//! Malformed or out-of-range request bodies must be rejected with 400
//! before anything is written.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use life_rpg::db::{MemoryDb, UserStore};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{json_request, send};

async fn register_status(app: &axum::Router, username: &str, password: &str) -> StatusCode {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    status
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let db = Arc::new(MemoryDb::new());
    let (app, _) = common::create_test_app_with_store(db.clone());

    assert_eq!(
        register_status(&app, "hunter", "12345").await,
        StatusCode::BAD_REQUEST
    );
    assert!(db.get_user_by_username("hunter").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_bad_usernames() {
    let (app, _) = common::create_test_app();

    assert_eq!(register_status(&app, "", "secret123").await, StatusCode::BAD_REQUEST);
    assert_eq!(register_status(&app, "   ", "secret123").await, StatusCode::BAD_REQUEST);
    assert_eq!(
        register_status(&app, &"x".repeat(33), "secret123").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        register_status(&app, &"x".repeat(32), "secret123").await,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_register_trims_username() {
    let (app, _) = common::create_test_app();

    assert_eq!(
        register_status(&app, "  hunter  ", "secret123").await,
        StatusCode::CREATED
    );
    assert_eq!(
        register_status(&app, "hunter", "secret123").await,
        StatusCode::CONFLICT
    );
}

#[tokio::test]
async fn test_register_accepts_padded_username_at_limit() {
    let (app, _) = common::create_test_app();
    let name = "x".repeat(32);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "username": format!("  {name}  "), "password": "secret123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], name.as_str());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": format!(" {name} "), "password": "secret123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (app, _) = common::create_test_app();

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\": \"hunter\""))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let (app, _) = common::create_test_app();

    let (status, _) = send(
        &app,
        json_request("POST", "/api/auth/login", None, json!({ "username": "hunter" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
