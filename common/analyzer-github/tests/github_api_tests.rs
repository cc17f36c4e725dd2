//! GitHub API client tests against a stub upstream
//! Tests cover response decoding, error mapping and credential precedence

use analyzer_github::{
    CommitInfo, FileStatus, GitHubClient, GitHubError, TokenContext, TokenResolver,
};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::Method;
use serde_json::{Value, json};

fn client_for(server: &ServerGuard, fallback: Option<&str>) -> GitHubClient {
    GitHubClient::new(server.url(), TokenResolver::new(fallback.map(String::from)))
}

fn commit_json(sha: &str, message: &str, author: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": { "name": author, "date": date }
        },
        "html_url": format!("https://x/{}", sha)
    })
}

#[tokio::test]
async fn test_get_latest_commit_flattens_upstream_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/commits/main")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(commit_json("abc123", "init", "Alice", "2024-01-01T00:00:00Z").to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let commit = client
        .get_latest_commit("octocat", "Hello-World", "main")
        .await
        .unwrap();

    assert_eq!(
        commit,
        CommitInfo {
            sha: "abc123".to_string(),
            message: "init".to_string(),
            author: "Alice".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
            url: "https://x/abc123".to_string(),
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_404_preserves_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/missing/commits/main")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let error = client
        .get_latest_commit("octocat", "missing", "main")
        .await
        .unwrap_err();

    match error {
        GitHubError::Request { status, ref body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Not Found"));
        }
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_commit_diff_accumulates_totals() {
    let mut server = Server::new_async().await;
    let mut body = commit_json("def456", "feature", "Bob", "2024-02-01T10:00:00Z");
    body["files"] = json!([
        { "filename": "src/lib.rs", "status": "modified", "additions": 10, "deletions": 2,
          "patch": "@@ -1 +1 @@" },
        { "filename": "logo.png", "status": "added", "additions": 0, "deletions": 0 },
        { "filename": "old.rs", "status": "removed", "additions": 0, "deletions": 40 }
    ]);
    server
        .mock("GET", "/repos/octocat/Hello-World/commits/def456")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let diff = client
        .get_commit_diff("octocat", "Hello-World", "def456")
        .await
        .unwrap();

    assert_eq!(diff.commit().sha, "def456");
    assert_eq!(diff.files().len(), 3);
    assert_eq!(diff.files()[0].filename, "src/lib.rs");
    assert_eq!(diff.files()[1].patch, None);
    assert_eq!(diff.files()[2].status, FileStatus::Removed);
    assert_eq!(
        diff.total_additions(),
        diff.files().iter().map(|f| f.additions).sum::<u64>()
    );
    assert_eq!(diff.total_additions(), 10);
    assert_eq!(diff.total_deletions(), 42);
}

#[tokio::test]
async fn test_get_recent_commits_keeps_upstream_order() {
    let mut server = Server::new_async().await;
    let body = json!([
        commit_json("c3", "third", "Alice", "2024-03-03T00:00:00Z"),
        commit_json("c2", "second", "Bob", "2024-03-02T00:00:00Z"),
        commit_json("c1", "first", "Alice", "2024-03-01T00:00:00Z"),
    ]);
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/commits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sha".into(), "develop".into()),
            Matcher::UrlEncoded("per_page".into(), "3".into()),
        ]))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let commits = client
        .get_recent_commits("octocat", "Hello-World", 3, "develop")
        .await
        .unwrap();

    let shas: Vec<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(shas, vec!["c3", "c2", "c1"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_recent_commits_never_exceeds_count() {
    let mut server = Server::new_async().await;
    // An upstream that ignores per_page
    let body = json!([
        commit_json("c3", "third", "Alice", "2024-03-03T00:00:00Z"),
        commit_json("c2", "second", "Bob", "2024-03-02T00:00:00Z"),
        commit_json("c1", "first", "Alice", "2024-03-01T00:00:00Z"),
    ]);
    server
        .mock("GET", "/repos/octocat/Hello-World/commits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let commits = client
        .get_recent_commits("octocat", "Hello-World", 2, "main")
        .await
        .unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].sha, "c3");
}

#[tokio::test]
async fn test_get_recent_commits_caps_page_size() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/commits")
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let commits = client
        .get_recent_commits("octocat", "Hello-World", 500, "main")
        .await
        .unwrap();

    assert!(commits.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_recent_commits_zero_count_skips_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let commits = client
        .get_recent_commits("octocat", "Hello-World", 0, "main")
        .await
        .unwrap();

    assert!(commits.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_file_content_decodes_base64() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/Hello-World/contents/README.md")
        .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
        .with_status(200)
        .with_body(
            json!({
                "type": "file",
                "encoding": "base64",
                "content": "SGVsbG8s\nIFdvcmxk\nIQo=\n",
                "sha": "f00d",
                "size": 14,
                "download_url": "https://raw.example/README.md"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let file = client
        .get_file_content("octocat", "Hello-World", "README.md", "main")
        .await
        .unwrap();

    assert_eq!(file.path, "README.md");
    assert_eq!(file.content, "Hello, World!\n");
    assert_eq!(file.sha, "f00d");
    assert_eq!(file.size, 14);
    assert_eq!(
        file.download_url.as_deref(),
        Some("https://raw.example/README.md")
    );
}

#[tokio::test]
async fn test_get_file_content_on_directory_listing_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/Hello-World/contents/src")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                { "type": "file", "name": "lib.rs", "path": "src/lib.rs", "sha": "1", "size": 10 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let error = client
        .get_file_content("octocat", "Hello-World", "src", "main")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        GitHubError::NotAFile { ref path, ref kind } if path == "src" && kind == "dir"
    ));
}

#[tokio::test]
async fn test_get_file_content_on_submodule_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/Hello-World/contents/vendor/lib")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "type": "submodule", "sha": "2", "size": 0 }).to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let error = client
        .get_file_content("octocat", "Hello-World", "vendor/lib", "main")
        .await
        .unwrap_err();

    assert!(matches!(error, GitHubError::NotAFile { ref kind, .. } if kind == "submodule"));
}

#[tokio::test]
async fn test_get_file_content_encodes_reserved_characters_in_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/contents/docs/issue%2312.md")
        .match_query(Matcher::UrlEncoded("ref".into(), "release".into()))
        .with_status(200)
        .with_body(
            json!({
                "type": "file",
                "content": "SGVsbG8s\nIFdvcmxk\nIQo=\n",
                "sha": "f00d",
                "size": 14
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let file = client
        .get_file_content("octocat", "Hello-World", "docs/issue#12.md", "release")
        .await
        .unwrap();

    assert_eq!(file.path, "docs/issue#12.md");
    assert_eq!(file.content, "Hello, World!\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_branch_with_query_characters_stays_in_ref() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/contents/README.md")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ref".into(), "feature/a&b?c".into()),
            Matcher::Regex("^ref=[^&]*$".to_string()),
        ]))
        .with_status(200)
        .with_body(
            json!({ "type": "file", "content": "", "sha": "f00d", "size": 0 }).to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    client
        .get_file_content("octocat", "Hello-World", "README.md", "feature/a&b?c")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_branch_name_with_slash_is_one_segment() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/octocat/Hello-World/branches/feature%2Flogin")
        .with_status(200)
        .with_body(
            json!({ "name": "feature/login", "commit": { "sha": "abc" }, "protected": false })
                .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let branch = client
        .get_branch("octocat", "Hello-World", "feature/login")
        .await
        .unwrap();

    assert_eq!(branch.name, "feature/login");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dot_segments_are_rejected_before_any_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let error = client.get_repository("..", "user").await.unwrap_err();
    assert!(matches!(error, GitHubError::InvalidUrl(_)));

    let error = client
        .get_file_content("octocat", "Hello-World", "../../user", "main")
        .await
        .unwrap_err();
    assert!(matches!(error, GitHubError::InvalidUrl(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_repository_and_branch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/Hello-World")
        .with_status(200)
        .with_body(
            json!({
                "id": 1296269,
                "name": "Hello-World",
                "full_name": "octocat/Hello-World",
                "description": null,
                "default_branch": "master",
                "clone_url": "https://github.com/octocat/Hello-World.git",
                "updated_at": "2024-01-01T00:00:00Z"
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/repos/octocat/Hello-World/branches/master")
        .with_status(200)
        .with_body(
            json!({
                "name": "master",
                "commit": { "sha": "7fd1a60", "url": "https://x" },
                "protected": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let repo = client
        .get_repository("octocat", "Hello-World")
        .await
        .unwrap();
    assert_eq!(repo.full_name, "octocat/Hello-World");
    assert_eq!(repo.description, None);
    assert_eq!(repo.default_branch, "master");

    let branch = client
        .get_branch("octocat", "Hello-World", &repo.default_branch)
        .await
        .unwrap();
    assert_eq!(branch.sha, "7fd1a60");
    assert!(branch.protected);
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/Hello-World/commits/main")
        .with_status(200)
        .with_body(json!({ "sha": "abc123" }).to_string())
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let error = client
        .get_latest_commit("octocat", "Hello-World", "main")
        .await
        .unwrap_err();

    assert!(matches!(error, GitHubError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_network_error() {
    let client = GitHubClient::new(
        "http://127.0.0.1:1",
        TokenResolver::new(Some("ghp_fallback".to_string())),
    );
    let error = client
        .get_latest_commit("octocat", "Hello-World", "main")
        .await
        .unwrap_err();

    assert!(matches!(error, GitHubError::Network(_)));
}

#[tokio::test]
async fn test_request_sends_github_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rate_limit")
        .match_header("accept", "application/vnd.github.v3+json")
        .match_header(
            "user-agent",
            Matcher::Regex("^contrib-analyzer/".to_string()),
        )
        .match_header("authorization", "Bearer ghp_fallback")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"));
    let value = client
        .request(&["rate_limit"], &[], Method::GET, None)
        .await
        .unwrap();

    assert_eq!(value, json!({}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_explicit_token_beats_context_and_fallback() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer ghp_explicit")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"))
        .scoped(TokenContext::new(Some("ghp_context".to_string())));
    client
        .request(&["user"], &[], Method::GET, Some("ghp_explicit"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_context_token_beats_fallback() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer ghp_context")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server, Some("ghp_fallback"))
        .scoped(TokenContext::new(Some("ghp_context".to_string())));
    client.request(&["user"], &[], Method::GET, None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_scoped_contexts_do_not_leak_between_clients() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer ghp_first")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let fallback = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer ghp_fallback")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let shared = client_for(&server, Some("ghp_fallback"));
    let request_scoped = shared.scoped(TokenContext::new(Some("ghp_first".to_string())));

    request_scoped
        .request(&["user"], &[], Method::GET, None)
        .await
        .unwrap();
    shared.request(&["user"], &[], Method::GET, None).await.unwrap();

    first.assert_async().await;
    fallback.assert_async().await;
}

#[tokio::test]
async fn test_no_token_sends_unauthenticated_request_and_surfaces_401() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/octocat/private/commits/main")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"message":"Requires authentication"}"#)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let error = client
        .get_latest_commit("octocat", "private", "main")
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(401));
}
