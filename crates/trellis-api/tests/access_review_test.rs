//! HTTP tests for the access review endpoint.

mod helpers;

use http::StatusCode;
use serde_json::json;

use trellis_entity::ResourceRef;

const REVIEW: &str = "/apis/core/v1/accessreview";

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["roles"], 4);
}

#[tokio::test]
async fn test_review_requires_bearer_token() {
    let app = helpers::TestApp::new();
    let body = json!({ "apis": [{ "url": "/health", "method": "GET" }] });

    let response = app.request("POST", REVIEW, Some(body.clone()), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let forged = app.token_with_secret(1, true, "wrong-secret");
    let response = app.request("POST", REVIEW, Some(body), Some(&forged)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guest_review() {
    let app = helpers::TestApp::new();
    let status_url = format!("/apis/core/v1/clusters/{}/status", app.cluster);
    let shell_url = format!("/apis/core/v1/clusters/{}/shell", app.cluster);
    let token = app.token(2, false);

    let response = app
        .request(
            "POST",
            REVIEW,
            Some(json!({
                "apis": [
                    { "url": status_url, "method": "GET" },
                    { "url": shell_url, "method": "GET" },
                ]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data[&status_url]["GET"]["allowed"], true);
    assert_eq!(data[&shell_url]["GET"]["allowed"], false);
}

#[tokio::test]
async fn test_owner_review() {
    let app = helpers::TestApp::new();
    app.store
        .add_user_member(ResourceRef::group(app.group), 120, "owner", 1)
        .unwrap();
    let cluster_url = format!("/apis/core/v1/clusters/{}", app.cluster);
    let tags_url = format!("/apis/core/v1/clusters/{}/templateschematags", app.cluster);
    let token = app.token(120, false);

    let response = app
        .request(
            "POST",
            REVIEW,
            Some(json!({
                "apis": [
                    { "url": cluster_url, "method": "DELETE" },
                    { "url": tags_url, "method": "POST" },
                ]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data[&cluster_url]["DELETE"]["allowed"], true);
    assert_eq!(data[&tags_url]["POST"]["allowed"], false);
}

#[tokio::test]
async fn test_admin_token_allows_everything() {
    let app = helpers::TestApp::new();
    let token = app.token(1, true);

    let response = app
        .request(
            "POST",
            REVIEW,
            Some(json!({ "apis": [{ "url": "/apis/core/v1/groups", "method": "POST" }] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["/apis/core/v1/groups"]["POST"]["allowed"], true);
    assert_eq!(response.body["data"]["/apis/core/v1/groups"]["POST"]["reason"], "admin");
}

#[tokio::test]
async fn test_missing_cluster_is_404() {
    let app = helpers::TestApp::new();
    let token = app.token(2, false);

    let response = app
        .request(
            "POST",
            REVIEW,
            Some(json!({
                "apis": [{ "url": "/apis/core/v1/clusters/424242/status", "method": "GET" }]
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_method_is_400() {
    let app = helpers::TestApp::new();
    let token = app.token(2, false);
    let url = format!("/apis/core/v1/clusters/{}", app.cluster);

    let response = app
        .request(
            "POST",
            REVIEW,
            Some(json!({ "apis": [{ "url": url, "method": "CONNECT" }] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
