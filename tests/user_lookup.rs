//! User lookups against a mocked v2 API.
//!
//! Uses wiremock to serve the responses and verify request counts.

use octopi::{ApiClient, OctopiError, User};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fcoury_json() -> serde_json::Value {
    serde_json::json!({
        "user": {
            "login": "fcoury",
            "id": 1,
            "name": "Felipe Coury",
            "company": "Webbynode",
            "created_at": "2008/03/05 08:35:34 -0800",
            "public_repo_count": 12,
            "followers_count": 2,
            "following_count": 1
        }
    })
}

#[tokio::test]
async fn test_find_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/show/fcoury"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fcoury_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let user = User::find(&client, "fcoury").await.unwrap();

    assert_eq!(user.login, "fcoury");
    assert_eq!(user.name.as_deref(), Some("Felipe Coury"));
    assert_eq!(user.company.as_deref(), Some("Webbynode"));
    assert_eq!(user.public_repo_count, Some(12));
    assert_eq!(
        user.created_at.map(|t| t.to_rfc3339()),
        Some("2008-03-05T16:35:34+00:00".to_string())
    );
}

#[tokio::test]
async fn test_find_user_twice_is_equal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/show/fcoury"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fcoury_json()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let first = User::find(&client, "fcoury").await.unwrap();
    let second = User::find(&client, "fcoury").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_find_missing_user_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/show/nobody"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "error": "Not Found" })),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let err = User::find(&client, "nobody").await.unwrap_err();

    assert!(matches!(err, OctopiError::NotFound { resource: "user", .. }));
}

#[tokio::test]
async fn test_invalid_login_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fcoury_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();

    for login in ["fcoury/../admin", "", "..", "bad login"] {
        let err = User::find(&client, login).await.unwrap_err();
        assert!(
            matches!(err, OctopiError::Validation { .. }),
            "{login:?} should fail validation, got {err:?}"
        );
    }

    // wiremock verifies the expectation on MockServer drop
}

#[tokio::test]
async fn test_search_users() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/search/oe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [
                { "login": "joe" },
                { "login": "moe" },
                { "login": "monroe" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let users = User::find_all(&client, "oe").await.unwrap();

    let logins: Vec<_> = users.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["joe", "moe", "monroe"]);
}

#[tokio::test]
async fn test_search_without_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/search/zzz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let users = User::find_all(&client, "zzz").await.unwrap();

    assert!(users.is_empty());
}
