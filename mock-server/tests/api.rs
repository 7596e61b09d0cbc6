use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, LocationRecord, Session, DEMO_PASS, DEMO_USER};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- location ---

#[tokio::test]
async fn create_location_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/location",
            r#"{"latitude":50.93,"longitude":-1.39}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: LocationRecord = body_json(resp).await;
    assert_eq!(record.data["latitude"], 50.93);
}

#[tokio::test]
async fn create_location_malformed_json_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/location", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_location_not_found() {
    let resp = app()
        .oneshot(get_request("/location/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_location_bad_uuid_returns_400() {
    let resp = app().oneshot(get_request("/location/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn location_roundtrip() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/location", r#"{"user":"a","latitude":1.5}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: LocationRecord = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/location/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: LocationRecord = body_json(resp).await;
    assert_eq!(fetched, created);
}

// --- login ---

#[tokio::test]
async fn login_with_demo_account_returns_token() {
    let body = format!(r#"{{"user":"{DEMO_USER}","pass":"{DEMO_PASS}"}}"#);
    let resp = app().oneshot(json_request("POST", "/login", &body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let session: Session = body_json(resp).await;
    assert!(!session.token.is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let resp = app()
        .oneshot(json_request("POST", "/login", r#"{"user":"a","pass":"b"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(resp).await.is_empty());
}

// --- land registry ---

#[tokio::test]
async fn addresses_for_known_post_code() {
    let resp = app()
        .oneshot(get_request("/land-registry/get-addresses/SO17%201BJ"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let addresses: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0]["town"], "SOUTHAMPTON");
}

#[tokio::test]
async fn addresses_for_unknown_post_code_is_empty() {
    let resp = app()
        .oneshot(get_request("/land-registry/get-addresses/ZZ99%209ZZ"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let addresses: Vec<serde_json::Value> = body_json(resp).await;
    assert!(addresses.is_empty());
}

// --- ping ---

#[tokio::test]
async fn ping_has_no_body() {
    let resp = app().oneshot(get_request("/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- land registry transactions ---

#[tokio::test]
async fn transactions_for_post_code_ignore_spacing() {
    let resp = app()
        .oneshot(get_request("/land-registry/get-transactions/so171bj"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let sales: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(sales.len(), 2);
    assert!(sales.iter().all(|s| s["postcode"] == "SO17 1BJ"));
}

#[tokio::test]
async fn transactions_for_town_match_case_insensitively() {
    let resp = app()
        .oneshot(get_request("/land-registry/get-transactionsTown/Southampton"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let sales: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(sales.len(), 3);
    assert!(sales.iter().all(|s| s["town"] == "SOUTHAMPTON"));
}

#[tokio::test]
async fn transactions_for_unknown_town_are_empty() {
    let resp = app()
        .oneshot(get_request("/land-registry/get-transactionsTown/NOWHERE"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let sales: Vec<serde_json::Value> = body_json(resp).await;
    assert!(sales.is_empty());
}
