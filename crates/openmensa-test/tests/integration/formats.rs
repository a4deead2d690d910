//! Format negotiation and response encoding.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_needs_no_format() {
    let app = TestApp::new().await;

    TestRequest::get("/api/healthcheck")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
}

#[test_log::test(tokio::test)]
async fn missing_format_is_not_acceptable() {
    let app = TestApp::new().await;

    let response = TestRequest::get("/api/v2/whoami")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_ACCEPTABLE)
        .assert_header("X-OM-Api-Version", "2");
    assert_eq!(response.body_string(), "Unsupported format.");

    TestRequest::get("/api/v2/whoami.html")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_ACCEPTABLE);
}

#[test_log::test(tokio::test)]
async fn suffix_wins_over_query_parameter() {
    let app = TestApp::new().await;

    TestRequest::get("/api/v2/whoami.json?format=xml")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Content-Type", "application/json");

    TestRequest::get("/api/v2/whoami?format=xml")
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Content-Type", "application/xml");
}

#[test_log::test(tokio::test)]
async fn every_response_carries_api_version() {
    let app = TestApp::new().await;

    TestRequest::get("/api/v2/whoami.json")
        .send(&app)
        .await
        .assert_header("X-OM-Api-Version", "2");
    TestRequest::get("/api/v2/cafeterias.json")
        .send(&app)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_header("X-OM-Api-Version", "2");
}

#[test_log::test(tokio::test)]
async fn xml_documents() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);
    app.seed_user("heinz", false);

    TestRequest::get("/api/v2/whoami.xml")
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("<?xml")
        .assert_body_contains("<user>")
        .assert_body_contains("<login>root</login>");

    let list = TestRequest::get(&users_path("xml"))
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("<users>")
        .body_string();
    assert_eq!(list.matches("<user>").count(), 2, "{list}");
}

#[test_log::test(tokio::test)]
async fn msgpack_documents() {
    let app = TestApp::new().await;
    let (user, token) = app.login("heinz", false);

    let response = TestRequest::get("/api/v2/whoami.msgpack")
        .bearer(&token)
        .send(&app)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("Content-Type", "application/msgpack");
    let body = response.msgpack();

    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["login"], "heinz");
}

#[test_log::test(tokio::test)]
async fn errors_use_the_requested_format() {
    let app = TestApp::new().await;

    let body = TestRequest::get(&users_path("json"))
        .send(&app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["status"], 401);

    TestRequest::get(&users_path("xml"))
        .send(&app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_body_contains("<error>")
        .assert_body_contains("<status>401</status>");
}

#[test_log::test(tokio::test)]
async fn malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let (_, token) = app.login("root", true);

    TestRequest::post(&users_path("json"))
        .bearer(&token)
        .body("{not json")
        .send(&app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
