#![allow(clippy::too_many_lines)]
//! User resource integration tests.
//!
//! ## Ability Model
//! - anonymous: nothing
//! - user: `show` on itself only
//! - administrator: everything on the collection and on regular users;
//!   `show`, `edit` and `update` on itself and other administrators
//!
//! Denied requests answer 401 for anonymous callers and 403 otherwise.

use salvo::http::StatusCode;
use serde_json::json;

use openmensa_test::component::model::user::User;

use super::helpers::*;

// ============================================================================
// Index
// ============================================================================

#[test_log::test(tokio::test)]
async fn index_requires_admin() {
    let app = TestApp::new().await;
    let (_, user_token) = app.login("heinz", false);
    let (_, admin_token) = app.login("root", true);
    let internal = [User::system(), User::anonymous()];

    TestRequest::get(&users_path("json"))
        .send(&app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get(&users_path("json"))
        .bearer(&user_token)
        .send(&app)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let body = TestRequest::get(&users_path("json"))
        .bearer(&admin_token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let listed = body.as_array().expect("user list should be an array");
    for user in &internal {
        let id = user.id.to_string();
        assert!(listed.iter().all(|u| u["id"].as_str() != Some(id.as_str())));
    }

    let mut logins: Vec<&str> = listed.iter().filter_map(|u| u["login"].as_str()).collect();
    logins.sort_unstable();
    assert_eq!(logins, vec!["heinz", "root"]);
}

// ============================================================================
// Show
// ============================================================================

#[test_log::test(tokio::test)]
async fn user_may_show_only_itself() {
    let app = TestApp::new().await;
    let (heinz, token) = app.login("heinz", false);
    let other = app.seed_user("jutta", false);

    TestRequest::get(&user_path(heinz.id, "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("\"login\":\"heinz\"");

    TestRequest::get(&user_path(other.id, "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    TestRequest::get(&user_path(heinz.id, "json"))
        .send(&app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    TestRequest::get(&user_path(uuid::Uuid::now_v7(), "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::get("/api/v2/users/not-a-uuid.json")
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Create
// ============================================================================

#[test_log::test(tokio::test)]
async fn admin_creates_user_with_defaults() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    let response = TestRequest::post(&users_path("json"))
        .bearer(&token)
        .json_body(&json!({
            "login": "heinz",
            "name": "Heinz Klein",
            "email": "heinz@example.org",
        }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED);
    let body = response.json();

    assert_eq!(body["login"], "heinz");
    assert_eq!(body["time_zone"], "Berlin");
    assert_eq!(body["language"], "en");
    assert_eq!(body["admin"], false);

    let id: uuid::Uuid = body["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("created user should have an id");
    assert_eq!(
        app.find_user(id).map(|u| u.name),
        Some("Heinz Klein".to_string())
    );
}

#[test_log::test(tokio::test)]
async fn create_is_denied_below_admin() {
    let app = TestApp::new().await;
    let (_, token) = app.login("heinz", false);
    let payload = json!({ "login": "jutta", "name": "Jutta" });

    TestRequest::post(&users_path("json"))
        .json_body(&payload)
        .send(&app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::post(&users_path("json"))
        .bearer(&token)
        .json_body(&payload)
        .send(&app)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn invalid_user_is_unprocessable() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    let body = TestRequest::post(&users_path("json"))
        .bearer(&token)
        .json_body(&json!({ "login": "system", "name": "", "email": "nope" }))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();

    assert_eq!(body["status"], 422);
    assert_eq!(body["fields"], json!(["login", "name", "email"]));

    TestRequest::post(&users_path("json"))
        .bearer(&token)
        .json_body(&json!({ "login": "root", "name": "Again" }))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .assert_body_contains("login");
}

#[test_log::test(tokio::test)]
async fn create_accepts_xml_and_msgpack_bodies() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    TestRequest::post(&users_path("xml"))
        .bearer(&token)
        .xml_body("<user><login>heinz</login><name>Heinz Klein</name></user>")
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .assert_body_contains("<login>heinz</login>");

    let body = TestRequest::post(&users_path("msgpack"))
        .bearer(&token)
        .msgpack_body(&json!({ "login": "jutta", "name": "Jutta", "language": "de" }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .msgpack();
    assert_eq!(body["login"], "jutta");
    assert_eq!(body["language"], "de");
}

#[test_log::test(tokio::test)]
async fn admin_may_create_administrators() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    let body = TestRequest::post(&users_path("json"))
        .bearer(&token)
        .json_body(&json!({ "login": "second", "name": "Second", "admin": true }))
        .send(&app)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["admin"], true);
    assert_eq!(body["role"], "administrator");
}

// ============================================================================
// Update
// ============================================================================

#[test_log::test(tokio::test)]
async fn admin_updates_user() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);
    let heinz = app.seed_user("heinz", false);

    let body = TestRequest::put(&user_path(heinz.id, "json"))
        .bearer(&token)
        .json_body(&json!({ "name": "Heinz Klein", "time_zone": "London", "email": "" }))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["name"], "Heinz Klein");
    assert_eq!(body["time_zone"], "London");
    assert!(body.get("email").is_none(), "{body}");

    let stored = app.find_user(heinz.id).expect("user should still exist");
    assert_eq!(stored.email, None);
    assert_eq!(stored.login, "heinz");
}

#[test_log::test(tokio::test)]
async fn patch_behaves_like_put() {
    let app = TestApp::new().await;
    let (root, token) = app.login("root", true);

    TestRequest::patch(&user_path(root.id, "json"))
        .bearer(&token)
        .json_body(&json!({ "language": "de" }))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("\"language\":\"de\"");
}

#[test_log::test(tokio::test)]
async fn user_cannot_update_itself() {
    let app = TestApp::new().await;
    let (heinz, token) = app.login("heinz", false);

    TestRequest::put(&user_path(heinz.id, "json"))
        .bearer(&token)
        .json_body(&json!({ "name": "Changed" }))
        .send(&app)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(
        app.find_user(heinz.id).map(|u| u.name),
        Some("heinz".to_string())
    );
}

#[test_log::test(tokio::test)]
async fn invalid_update_is_not_stored() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);
    let heinz = app.seed_user("heinz", false);

    TestRequest::put(&user_path(heinz.id, "json"))
        .bearer(&token)
        .json_body(&json!({ "login": "root" }))
        .send(&app)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(
        app.find_user(heinz.id).map(|u| u.login),
        Some("heinz".to_string())
    );
}

// ============================================================================
// Destroy
// ============================================================================

#[test_log::test(tokio::test)]
async fn admin_destroys_regular_user() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);
    let heinz = app.seed_user("heinz", false);

    TestRequest::delete(&user_path(heinz.id, "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::NO_CONTENT)
        .assert_body_empty();

    assert!(app.find_user(heinz.id).is_none());

    TestRequest::delete(&user_path(heinz.id, "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn administrators_are_never_destroyed() {
    let app = TestApp::new().await;
    let (root, token) = app.login("root", true);
    let peer = app.seed_user("peer", true);

    for id in [root.id, peer.id] {
        TestRequest::delete(&user_path(id, "json"))
            .bearer(&token)
            .send(&app)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert!(app.find_user(id).is_some());
    }
}

#[test_log::test(tokio::test)]
async fn user_cannot_destroy_anyone() {
    let app = TestApp::new().await;
    let (heinz, token) = app.login("heinz", false);
    let other = app.seed_user("jutta", false);

    for id in [heinz.id, other.id] {
        TestRequest::delete(&user_path(id, "json"))
            .bearer(&token)
            .send(&app)
            .await
            .assert_status(StatusCode::FORBIDDEN);
        assert!(app.find_user(id).is_some());
    }
}

#[test_log::test(tokio::test)]
async fn wrong_method_on_known_resource() {
    let app = TestApp::new().await;
    let (root, token) = app.login("root", true);

    TestRequest::post(&user_path(root.id, "json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);

    TestRequest::delete(&users_path("json"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
