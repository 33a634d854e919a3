//! HTTP-level integration tests for the repository wiki API.
//!
//! Every test starts from freshly seeded fixtures: `user2/repo1` with its
//! four historical pages, private `user2/repo2` and wiki-less `user2/repo3`.

mod common;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};
use common::{
    body_json, build_test_app, decode_field, delete, get, get_with_cookie, issue_token, login,
    patch_json, post_json, send,
};
use forgewiki_api::fixtures::{
    HOME_CONTENT, IMAGE_PAGE_CONTENT, SPACED_NAME_CONTENT, UNESCAPED_CONTENT,
};
use forgewiki_core::content::{encode_content, encode_content_padded};
use forgewiki_core::structs::{CommitUser, WikiCommit, WikiPageMetaData};
use pretty_assertions::assert_eq;
use serde_json::json;

const WIKI: &str = "/api/v1/repos/user2/repo1/wiki";

const HOME_SHA: &str = "2c54faec6c45d31c1abfaecdab471eac6633738a";
const SPACED_SHA: &str = "c10d10b7e655b3dab1f53176db57c8219a5488d6";
const IMAGE_SHA: &str = "0cf15c3f66ec8384480ed9c3cf87c9e97fbb0ec3";
const UNESCAPED_SHA: &str = "0dca5bd9b5d7ef937710e056f575e86c0184ba85";

fn page_body(title: &str, content: &[u8]) -> serde_json::Value {
    json!({
        "title": title,
        "content_base64": encode_content_padded(content),
        "message": "",
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_home_page_returns_fixture_commit() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/page/Home")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;

    let ethan = json!({
        "name": "Ethan Koenig",
        "email": "ethantkoenig@gmail.com",
        "date": "2017-11-27T04:31:18Z",
    });
    assert_eq!(page["title"], "Home");
    assert_eq!(page["sub_url"], "Home");
    assert_eq!(page["html_url"], "http://localhost:3000/user2/repo1/wiki/Home");
    assert_eq!(
        page["last_commit"],
        json!({
            "sha": HOME_SHA,
            "author": ethan,
            "commiter": ethan,
            "message": "Add Home.md\n",
        })
    );
    assert_eq!(page["content_base64"], "IyBIb21lIHBhZ2UKClRoaXMgaXMgdGhlIGhvbWUgcGFnZSEK");
    assert_eq!(decode_field(&page["content_base64"]), HOME_CONTENT);
    assert_eq!(page["commit_count"], 1);
    assert_eq!(page["sidebar"], "");
    assert_eq!(page["footer"], "");
}

#[tokio::test]
async fn get_page_resolves_titles_sub_urls_and_legacy_names() {
    let app = build_test_app().await;

    for (name, content) in [
        ("Page-With-Spaced-Name", SPACED_NAME_CONTENT),
        ("Page%20With%20Spaced%20Name", SPACED_NAME_CONTENT),
        ("Page-With-Image", IMAGE_PAGE_CONTENT),
        ("Unescaped-File", UNESCAPED_CONTENT),
        ("Unescaped%20File", UNESCAPED_CONTENT),
    ] {
        let response = get(&app, &format!("{WIKI}/page/{name}")).await;
        assert_eq!(response.status(), StatusCode::OK, "page {name}");
        let page = body_json(response).await;
        assert_eq!(decode_field(&page["content_base64"]), content, "page {name}");
    }
}

fn fixture_commit(id: &str, name: &str, email: &str, date: &str, message: &str) -> WikiCommit {
    let user = CommitUser::new(name, email, date);
    WikiCommit {
        id: id.into(),
        author: user.clone(),
        committer: user,
        message: message.into(),
    }
}

#[tokio::test]
async fn list_pages_returns_seeded_pages_in_title_order() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/pages")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "4");
    let pages: Vec<WikiPageMetaData> =
        serde_json::from_value(body_json(response).await).expect("page metadata");

    let summary: Vec<(&str, &str, &WikiCommit)> = pages
        .iter()
        .map(|p| (p.title.as_str(), p.sub_url.as_str(), &p.last_commit))
        .collect();
    let gabriel = ("Gabriel Silva Simões", "simoes.sgabriel@gmail.com");
    let expected = [
        fixture_commit(
            HOME_SHA,
            "Ethan Koenig",
            "ethantkoenig@gmail.com",
            "2017-11-27T04:31:18Z",
            "Add Home.md\n",
        ),
        fixture_commit(
            IMAGE_SHA,
            gabriel.0,
            gabriel.1,
            "2019-01-25T01:41:55Z",
            "Add jpeg.jpg and page with image\n",
        ),
        fixture_commit(
            SPACED_SHA,
            gabriel.0,
            gabriel.1,
            "2019-01-25T01:39:51Z",
            "Add page with spaced name\n",
        ),
        fixture_commit(
            UNESCAPED_SHA,
            "6543",
            "6543@obermui.de",
            "2021-07-19T16:42:46Z",
            "add unescaped file\n",
        ),
    ];
    assert_eq!(
        summary,
        vec![
            ("Home", "Home", &expected[0]),
            ("Page With Image", "Page-With-Image", &expected[1]),
            ("Page With Spaced Name", "Page-With-Spaced-Name", &expected[2]),
            ("Unescaped File", "Unescaped-File", &expected[3]),
        ]
    );
    for page in &pages {
        assert_eq!(page.sub_url, page.title.replace(' ', "-"));
    }
}

#[tokio::test]
async fn list_pages_paginates_with_total_count() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/pages?page=2&limit=3")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "4");
    let pages = body_json(response).await;
    let titles: Vec<&str> = pages
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Unescaped File"]);

    let response = get(&app, &format!("{WIKI}/pages?page=3&limit=3")).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_pages_past_any_offset_is_empty() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/pages?page={}&limit=50", i64::MAX)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "4");
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn home_revisions_contain_single_fixture_commit() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/revisions/Home")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["commits"].as_array().unwrap().len(), 1);
    assert_eq!(list["commits"][0]["sha"], HOME_SHA);
    assert_eq!(list["commits"][0]["author"]["name"], "Ethan Koenig");
}

#[tokio::test]
async fn last_commit_matches_newest_revision_for_every_page() {
    let app = build_test_app().await;

    let pages = body_json(get(&app, &format!("{WIKI}/pages")).await).await;
    for meta in pages.as_array().unwrap() {
        let sub_url = meta["sub_url"].as_str().unwrap();
        let page = body_json(get(&app, &format!("{WIKI}/page/{sub_url}")).await).await;
        let revisions = body_json(get(&app, &format!("{WIKI}/revisions/{sub_url}")).await).await;
        assert_eq!(page["last_commit"], revisions["commits"][0], "page {sub_url}");
        assert_eq!(page["commit_count"], revisions["count"], "page {sub_url}");
    }
}

#[tokio::test]
async fn missing_pages_and_wikis_return_404() {
    let app = build_test_app().await;

    for uri in [
        format!("{WIKI}/page/Does-Not-Exist"),
        format!("{WIKI}/revisions/Does-Not-Exist"),
        "/api/v1/repos/user2/repo3/wiki/pages".to_string(),
        "/api/v1/repos/user2/nope/wiki/page/Home".to_string(),
    ] {
        let response = get(&app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND", "{uri}");
    }
}

#[tokio::test]
async fn attachments_are_not_pages() {
    let app = build_test_app().await;

    let response = get(&app, &format!("{WIKI}/page/jpeg.jpg")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Private repositories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn private_wiki_is_hidden_from_strangers() {
    let app = build_test_app().await;
    let uri = "/api/v1/repos/user2/repo2/wiki/page/Home";

    assert_eq!(get(&app, uri).await.status(), StatusCode::NOT_FOUND);

    let stranger = login(&app, "user4").await;
    assert_eq!(
        get_with_cookie(&app, uri, &stranger).await.status(),
        StatusCode::NOT_FOUND
    );

    for user in ["user2", "user1"] {
        let cookie = login(&app, user).await;
        let response = get_with_cookie(&app, uri, &cookie).await;
        assert_eq!(response.status(), StatusCode::OK, "{user}");
        assert_eq!(body_json(response).await["title"], "Home");
    }
}

#[tokio::test]
async fn private_wiki_is_readable_with_owner_token() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "reader").await;

    let response = get(
        &app,
        &format!("/api/v1/repos/user2/repo2/wiki/pages?token={token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "1");
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_page_round_trips_content() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let content = b"Wiki page content for API unit tests";

    let response = post_json(
        &app,
        &format!("{WIKI}/new?token={token}"),
        page_body("New page", content),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["title"], "New page");
    assert_eq!(created["sub_url"], "New-page");
    assert_eq!(created["commit_count"], 1);
    assert_eq!(created["last_commit"]["message"], "Add \"New page\"");
    assert_eq!(created["last_commit"]["author"]["name"], "user2");
    assert_eq!(created["last_commit"]["author"]["email"], "user2@example.com");
    assert_eq!(created["last_commit"]["author"], created["last_commit"]["commiter"]);

    let fetched = body_json(get(&app, &format!("{WIKI}/page/New-page")).await).await;
    assert_eq!(decode_field(&fetched["content_base64"]), content);
    assert_eq!(fetched["last_commit"], created["last_commit"]);

    let pages = body_json(get(&app, &format!("{WIKI}/pages")).await).await;
    assert_eq!(pages.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn create_page_accepts_punctuation_titles() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let response = post_json(
        &app,
        &format!("{WIKI}/new?token={token}"),
        page_body("&&&&", b"Wiki page content for API unit tests"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["title"], "&&&&");

    let response = get(&app, &format!("{WIKI}/page/%26%26%26%26")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["sub_url"], "&&&&");
}

#[tokio::test]
async fn create_page_keeps_supplied_message_and_accepts_unpadded_content() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let content = b"four";

    let body = json!({
        "title": "Unpadded",
        "content_base64": encode_content(content),
        "message": "custom message",
    });
    let response = post_json(&app, &format!("{WIKI}/new?token={token}"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["last_commit"]["message"], "custom message");
    assert_eq!(decode_field(&created["content_base64"]), content);
}

#[tokio::test]
async fn create_page_initializes_missing_wiki() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let wiki = "/api/v1/repos/user2/repo3/wiki";

    let response = post_json(&app, &format!("{wiki}/new?token={token}"), page_body("Home", b"hi")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let pages = body_json(get(&app, &format!("{wiki}/pages")).await).await;
    assert_eq!(pages.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_existing_page_conflicts() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let response = post_json(&app, &format!("{WIKI}/new?token={token}"), page_body("Home", b"x")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_page_rejects_invalid_titles_and_content() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let uri = format!("{WIKI}/new?token={token}");

    for title in ["", "a/b", "_pages"] {
        let response = post_json(&app, &uri, page_body(title, b"x")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "title {title:?}");
    }

    let body = json!({ "title": "Broken", "content_base64": "not base64!", "message": "" });
    let response = post_json(&app, &uri, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn writes_require_a_valid_token() {
    let app = build_test_app().await;
    let body = page_body("New page", b"x");

    let response = post_json(&app, &format!("{WIKI}/new"), body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(&app, &format!("{WIKI}/new?token=0000"), body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A session alone does not authorize writes.
    let cookie = login(&app, "user2").await;
    let request = Request::post(format!("{WIKI}/new"))
        .header("cookie", cookie)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);

    let response = patch_json(&app, &format!("{WIKI}/page/Home"), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_is_accepted_from_header_and_access_token_param() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let request = Request::post(format!("{WIKI}/new"))
        .header(AUTHORIZATION, format!("token {token}"))
        .header("content-type", "application/json")
        .body(Body::from(page_body("Via header", b"x").to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::CREATED);

    let response = post_json(
        &app,
        &format!("{WIKI}/new?access_token={token}"),
        page_body("Via param", b"x"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn non_owner_token_is_forbidden_but_admin_may_write() {
    let app = build_test_app().await;

    let stranger = issue_token(&app, "user4", "stranger").await;
    let response = post_json(
        &app,
        &format!("{WIKI}/new?token={stranger}"),
        page_body("Intruder", b"x"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = issue_token(&app, "user1", "admin").await;
    let response = post_json(
        &app,
        &format!("{WIKI}/new?token={admin}"),
        page_body("By admin", b"x"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let page = body_json(response).await;
    assert_eq!(page["last_commit"]["author"]["name"], "User One");
}

#[tokio::test]
async fn edit_renames_page() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let content = b"Edited wiki page content for API unit tests";

    let response = patch_json(
        &app,
        &format!("{WIKI}/page/Page-With-Spaced-Name?token={token}"),
        page_body("edited title", content),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let edited = body_json(response).await;
    assert_eq!(edited["title"], "edited title");
    assert_eq!(edited["sub_url"], "edited-title");
    assert_eq!(edited["last_commit"]["message"], "Update \"edited title\"");
    assert_eq!(decode_field(&edited["content_base64"]), content);

    let old = get(&app, &format!("{WIKI}/page/Page-With-Spaced-Name")).await;
    assert_eq!(old.status(), StatusCode::NOT_FOUND);

    let renamed = body_json(get(&app, &format!("{WIKI}/page/edited-title")).await).await;
    assert_eq!(decode_field(&renamed["content_base64"]), content);

    let revisions = body_json(get(&app, &format!("{WIKI}/revisions/edited-title")).await).await;
    assert_eq!(revisions["count"], 1);
    assert_eq!(revisions["commits"][0], edited["last_commit"]);

    let pages = body_json(get(&app, &format!("{WIKI}/pages")).await).await;
    let titles: Vec<&str> = pages
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["edited title", "Home", "Page With Image", "Unescaped File"]
    );
}

#[tokio::test]
async fn repeated_edits_leave_last_payload() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;
    let uri = format!("{WIKI}/page/Home?token={token}");
    let content = b"# Home\n\nRewritten.\n";

    for _ in 0..2 {
        let response = patch_json(&app, &uri, page_body("Home", content)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let page = body_json(get(&app, &format!("{WIKI}/page/Home")).await).await;
    assert_eq!(decode_field(&page["content_base64"]), content);
    assert_eq!(page["commit_count"], 3);
}

#[tokio::test]
async fn edit_with_blank_title_keeps_current_title() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let response = patch_json(
        &app,
        &format!("{WIKI}/page/Unescaped-File?token={token}"),
        page_body("", b"updated"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["title"], "Unescaped File");
    assert_eq!(page["last_commit"]["message"], "Update \"Unescaped File\"");
}

#[tokio::test]
async fn edit_errors() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let response = patch_json(
        &app,
        &format!("{WIKI}/page/Does-Not-Exist?token={token}"),
        page_body("Does Not Exist", b"x"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json(
        &app,
        &format!("{WIKI}/page/Home?token={token}"),
        page_body("Page With Image", b"x"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_page_removes_it_from_listing() {
    let app = build_test_app().await;
    let token = issue_token(&app, "user2", "writer").await;

    let response = delete(&app, &format!("{WIKI}/page/Page-With-Image?token={token}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("{WIKI}/page/Page-With-Image")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, &format!("{WIKI}/pages")).await;
    assert_eq!(response.headers()["x-total-count"], "3");

    let response = delete(&app, &format!("{WIKI}/page/Page-With-Image?token={token}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_requires_write_access() {
    let app = build_test_app().await;

    let response = delete(&app, &format!("{WIKI}/page/Home")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stranger = issue_token(&app, "user4", "stranger").await;
    let response = delete(&app, &format!("{WIKI}/page/Home?token={stranger}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
