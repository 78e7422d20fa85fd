mod common;

use common::*;
use follow_check::{App, CheckRequest, Direction, RelationshipChecker};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_list(server: &MockServer, list_path: &str, logins: &[&str]) {
    let body: Vec<_> = logins.iter().map(|l| api_user(l)).collect();
    Mock::given(method("GET"))
        .and(path(list_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, login: &str, followers: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_profile(login, followers)))
        .mount(server)
        .await;
}

fn checker(server: &MockServer) -> RelationshipChecker {
    let config = test_config(server);
    RelationshipChecker::new(Arc::new(fetcher(&config)), config.max_concurrent_enrichment)
}

#[tokio::test]
async fn test_end_to_end_following_not_followed_back() {
    let server = MockServer::start().await;
    mount_list(&server, "/users/alice/following", &["bob", "carol"]).await;
    mount_list(&server, "/users/alice/followers", &["bob"]).await;
    mount_profile(&server, "carol", 42).await;

    let envelope = checker(&server)
        .check_relationship_asymmetry("alice", "", Direction::FollowingButNotFollowedBack)
        .await;

    let users = envelope.users.as_ref().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].login(), "carol");
    assert_eq!(users[0].identity.profile_url, "https://github.com/carol");
    assert_eq!(users[0].follower_count, Some(42));
    assert_eq!(users[0].public_repo_count, Some(7));
    assert!(!envelope.has_partial_data_error);
    assert!(envelope.error_message.is_none());
}

#[tokio::test]
async fn test_end_to_end_partial_enrichment() {
    let server = MockServer::start().await;
    mount_list(&server, "/users/alice/following", &[]).await;
    mount_list(&server, "/users/alice/followers", &["u1", "u2", "u3", "u4", "u5"]).await;
    for login in ["u1", "u2", "u4", "u5"] {
        mount_profile(&server, login, 1).await;
    }
    Mock::given(method("GET"))
        .and(path("/users/u3"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let envelope = checker(&server)
        .check_relationship_asymmetry("alice", "", Direction::FollowedButNotFollowingBack)
        .await;

    let users = envelope.users.as_ref().unwrap();
    let logins: Vec<&str> = users.iter().map(|u| u.login()).collect();
    assert_eq!(logins, vec!["u1", "u2", "u3", "u4", "u5"]);
    assert!(!users[2].has_details());
    assert_eq!(users[2].identity.avatar_url, "https://avatars.example/u3");
    assert!(envelope.has_partial_data_error);
    assert!(!envelope.is_rate_limit_error);
}

#[tokio::test]
async fn test_end_to_end_rate_limited_list() {
    let server = MockServer::start().await;
    mount_list(&server, "/users/alice/following", &["bob"]).await;
    Mock::given(method("GET"))
        .and(path("/users/alice/followers"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let envelope = checker(&server)
        .check_relationship_asymmetry("alice", "", Direction::FollowingButNotFollowedBack)
        .await;

    assert!(envelope.is_rate_limit_error);
    assert!(envelope.users.is_none());
    // 关系列表失败后不再请求详情
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/users/bob"));
}

#[tokio::test]
async fn test_end_to_end_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let envelope = checker(&server)
        .check_relationship_asymmetry("nobody-here", "", Direction::FollowingButNotFollowedBack)
        .await;

    assert_eq!(envelope.error_message.as_deref(), Some("用户 nobody-here 不存在"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_username_sends_nothing() {
    let server = MockServer::start().await;

    let envelope = checker(&server)
        .check_relationship_asymmetry("", "", Direction::FollowingButNotFollowedBack)
        .await;

    assert!(envelope.error_message.is_some());
    assert!(envelope.users.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_app_uses_configured_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer from-config"))
        .and(path("/users/alice/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer from-config"))
        .and(path("/users/alice/followers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = follow_check::Config {
        token: Some("from-config".to_string()),
        ..test_config(&server)
    };
    let app = App::initialize(config).unwrap();
    let envelope = app
        .run(&CheckRequest {
            username: "alice".to_string(),
            token: None,
            direction: Direction::FollowingButNotFollowedBack,
        })
        .await;

    assert_eq!(envelope.users, Some(Vec::new()));
}
