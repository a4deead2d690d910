//! Authentication integration tests.
//!
//! `whoami` echoes the resolved current user, so it shows how a request's
//! token was interpreted.

use salvo::http::StatusCode;

use super::helpers::*;

const WHOAMI_PATH: &str = "/api/v2/whoami.json";

#[test_log::test(tokio::test)]
async fn anonymous_without_token() {
    let app = TestApp::new().await;

    let body = TestRequest::get(WHOAMI_PATH)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["login"], "anonymous");
    assert_eq!(body["role"], "anonymous");
    assert_eq!(body["admin"], false);
}

#[test_log::test(tokio::test)]
async fn bearer_token_identifies_user() {
    let app = TestApp::new().await;
    let (user, token) = app.login("heinz", false);

    let body = TestRequest::get(WHOAMI_PATH)
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["login"], "heinz");
    assert_eq!(body["role"], "user");
    assert_eq!(body["email"], "heinz@example.org");
}

#[test_log::test(tokio::test)]
async fn query_parameter_token_identifies_user() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    let body = TestRequest::get(&format!("{WHOAMI_PATH}?access_token={token}"))
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["login"], "root");
    assert_eq!(body["role"], "administrator");
    assert_eq!(body["admin"], true);
}

#[test_log::test(tokio::test)]
async fn unknown_token_is_anonymous() {
    let app = TestApp::new().await;
    app.login("heinz", false);

    let body = TestRequest::get(WHOAMI_PATH)
        .bearer("not-a-token")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["login"], "anonymous");
}

#[test_log::test(tokio::test)]
async fn token_of_deleted_user_is_anonymous() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.login("root", true);
    let (user, token) = app.login("heinz", false);

    TestRequest::delete(&user_path(user.id, "json"))
        .bearer(&admin_token)
        .send(&app)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body = TestRequest::get(WHOAMI_PATH)
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["login"], "anonymous");
}
