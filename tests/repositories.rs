//! Repository and tag lookups against a mocked v2 API.

use octopi::{ApiClient, OctopiError, Options, Repository, Tag, User};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_tags_keep_response_order() {
    let mock_server = MockServer::start().await;

    // Raw body so the key order is exactly what the service sent
    Mock::given(method("GET"))
        .and(path("/repos/show/joe/proj/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"tags":{"v2.0":"fff999","v1.0":"abc123","v1.1":"def456"}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let tags = Tag::all(&client, &Options::from([("user", "joe"), ("repo", "proj")]))
        .await
        .unwrap();

    let pairs: Vec<_> = tags
        .iter()
        .map(|t| (t.name.as_str(), t.hash.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("v2.0", "fff999"), ("v1.0", "abc123"), ("v1.1", "def456")]
    );
}

#[tokio::test]
async fn test_tags_of_untagged_repository() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/repos/show/joe/proj/tags",
        serde_json::json!({ "tags": {} }),
    )
    .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let tags = Tag::all(&client, &Options::from([("repo", "joe/proj")]))
        .await
        .unwrap();

    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_tags_require_repository() {
    let client = ApiClient::new("http://127.0.0.1:1", None).unwrap();

    let err = Tag::all(&client, &Options::from([("user", "joe")]))
        .await
        .unwrap_err();

    assert!(matches!(err, OctopiError::Validation { .. }));
}

#[tokio::test]
async fn test_find_repository() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/repos/show/fcoury/octopi",
        serde_json::json!({
            "repository": {
                "name": "octopi",
                "owner": "fcoury",
                "description": "A Ruby interface to GitHub API v2",
                "url": "http://github.com/fcoury/octopi",
                "fork": false,
                "private": false,
                "watchers": 120,
                "forks": 20,
                "open_issues": 3,
                "created_at": "2009/04/18 13:04:09 -0700"
            }
        }),
    )
    .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let repo = Repository::find(
        &client,
        &Options::from([("user", "fcoury"), ("name", "octopi")]),
    )
    .await
    .unwrap();

    assert_eq!(repo.to_string(), "fcoury/octopi");
    assert_eq!(repo.watchers, Some(120));
    assert!(repo.created_at.is_some());
}

#[tokio::test]
async fn test_user_repositories_and_tags() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/repos/show/joe",
        serde_json::json!({
            "repositories": [
                { "name": "proj", "owner": "joe" },
                { "name": "notes", "owner": "joe", "private": true }
            ]
        }),
    )
    .await;
    mount_json(
        &mock_server,
        "/repos/show/joe/proj/tags",
        serde_json::json!({ "tags": { "v1.0": "abc123" } }),
    )
    .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let joe: User = serde_json::from_value(serde_json::json!({ "login": "joe" })).unwrap();
    let repos = joe.repositories(&client).await.unwrap();

    assert_eq!(repos.names(), vec!["proj", "notes"]);
    assert_eq!(repos.private().len(), 1);

    let proj = repos.get("proj").unwrap();
    let tags = proj.tags(&client).await.unwrap();
    assert_eq!(tags[0].name, "v1.0");
}

#[tokio::test]
async fn test_search_repositories() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "/repos/search/ruby%20client",
        serde_json::json!({
            "repositories": [{ "name": "octopi", "owner": "fcoury" }]
        }),
    )
    .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let found = Repository::find_all(&client, "ruby client").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].full_name(), "fcoury/octopi");
}
