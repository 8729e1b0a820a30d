//! Integration tests for the resource layer.
//!
//! These tests exercise `Flat` and `FlatImage` end to end against a local
//! mock server: addressing, decoding, credential handling, and the
//! list, create, save, retrieve and exists operations.

use base64::Engine;
use flatfox_api::clients::HttpError;
use flatfox_api::rest::resources::{Flat, FlatImage};
use flatfox_api::rest::{
    ApiResource, Creatable, Decoded, FieldValue, Fields, FileUpload, Listable, ResourceError,
    Updatable,
};
use flatfox_api::{AccessToken, FlatfoxConfig, ServerUrl};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FlatfoxConfig {
    FlatfoxConfig::builder()
        .server(ServerUrl::new(server.uri()).unwrap())
        .access_token(AccessToken::new("default-token").unwrap())
        .build()
}

fn token(value: &str) -> AccessToken {
    AccessToken::new(value).unwrap()
}

fn basic_auth(token: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{token}:"));
    format!("Basic {encoded}")
}

fn id_of(object: &Fields) -> Option<i64> {
    object.get("id").and_then(FieldValue::as_i64)
}

// ============================================================================
// retrieve / refresh
// ============================================================================

#[tokio::test]
async fn test_retrieve_by_id_decodes_flat_and_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "street": "Bahnhofstrasse 1",
            "images": [{"id": 5, "caption": "Kitchen"}, {"id": 6}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flat = Flat::retrieve(&config_for(&server), None, Fields::with_id(42))
        .await
        .unwrap();

    assert_eq!(id_of(&flat), Some(42));
    assert_eq!(flat.get("street").and_then(FieldValue::as_str), Some("Bahnhofstrasse 1"));

    let images = flat.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].get("caption").and_then(FieldValue::as_str), Some("Kitchen"));
}

#[tokio::test]
async fn test_retrieve_by_external_id_uses_ext_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/ext-ref-17/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "external_id": "ref-17"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flat = Flat::retrieve(&config_for(&server), None, Fields::with_external_id("ref-17"))
        .await
        .unwrap();

    assert_eq!(id_of(&flat), Some(7));
}

#[tokio::test]
async fn test_retrieve_with_explicit_token_binds_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Authorization", basic_auth("per-call").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "images": [{"id": 2}]})))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let mut flat = Flat::retrieve(&config, Some(token("per-call")), Fields::with_id(1))
        .await
        .unwrap();

    assert_eq!(flat.access_token(), Some(&token("per-call")));
    assert!(!flat.contains_key("access_token"));
    assert_eq!(flat.images()[0].access_token(), Some(&token("per-call")));

    // The object's own credential keeps being used after a refresh.
    flat.refresh(&config).await.unwrap();
    assert_eq!(flat.access_token(), Some(&token("per-call")));
}

#[tokio::test]
async fn test_refresh_replaces_fields_entirely() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "rooms": 4})))
        .mount(&server)
        .await;

    let mut flat = Flat::from_object(
        Fields::with_id(3)
            .with("stale", "local only")
            .with("rooms", 2)
            .into(),
    );
    flat.refresh(&config_for(&server)).await.unwrap();

    assert!(flat.get("stale").is_none());
    assert_eq!(flat.get("rooms").and_then(FieldValue::as_i64), Some(4));
}

#[tokio::test]
async fn test_failed_refresh_leaves_fields_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let mut flat = Flat::from_object(Fields::with_id(3).with("rooms", 2).into());
    let error = flat.refresh(&config_for(&server)).await.unwrap_err();

    assert!(matches!(error, ResourceError::Http(HttpError::Response(_))));
    assert_eq!(flat.fields(), &Fields::with_id(3).with("rooms", 2));
}

#[tokio::test]
async fn test_refresh_with_non_mapping_response_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .mount(&server)
        .await;

    let error = Flat::retrieve(&config_for(&server), None, Fields::with_id(1))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResourceError::UnexpectedResponse {
            resource: "Flat",
            operation: "refresh"
        }
    ));
}

#[tokio::test]
async fn test_retrieve_without_identity_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let error = Flat::retrieve(&config_for(&server), None, Fields::new().with("city", "Bern"))
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::MissingId { resource: "Flat" }));
    assert_eq!(
        error.to_string(),
        "Cannot get instance url of object Flat: no id is set."
    );
}

// ============================================================================
// exists
// ============================================================================

#[tokio::test]
async fn test_exists_is_true_when_retrieve_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/1/"))
        .and(header("Authorization", basic_auth("default-token").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    assert!(Flat::exists(&config_for(&server), Fields::with_id(1)).await);
}

#[tokio::test]
async fn test_exists_is_false_on_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    assert!(!Flat::exists(&config_for(&server), Fields::with_id(1)).await);
}

#[tokio::test]
async fn test_exists_is_false_on_permission_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Forbidden"})))
        .mount(&server)
        .await;

    assert!(!Flat::exists(&config_for(&server), Fields::with_id(1)).await);
}

#[tokio::test]
async fn test_exists_is_false_on_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(!Flat::exists(&config_for(&server), Fields::with_id(1)).await);
}

#[tokio::test]
async fn test_exists_is_false_without_identity() {
    let server = MockServer::start().await;
    assert!(!Flat::exists(&config_for(&server), Fields::new()).await);
}

// ============================================================================
// list
// ============================================================================

#[tokio::test]
async fn test_list_sends_query_and_decodes_each_flat() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/"))
        .and(query_param("status", "act"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "images": [{"id": 10}]},
            {"id": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let decoded = Flat::list(
        &config_for(&server),
        Some(token("lister")),
        Fields::new().with("status", "act"),
    )
    .await
    .unwrap();

    let flats = decoded.into_resources();
    assert_eq!(flats.len(), 2);
    assert_eq!(id_of(&flats[0]), Some(1));
    assert_eq!(flats[0].images().len(), 1);
    assert!(flats[1].images().is_empty());
    assert_eq!(flats[1].access_token(), Some(&token("lister")));
}

#[tokio::test]
async fn test_list_passes_a_lone_mapping_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/my-flat/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let decoded = Flat::list(&config_for(&server), None, Fields::new())
        .await
        .unwrap();

    let Decoded::Resource(flat) = decoded else {
        panic!("expected a single resource");
    };
    assert_eq!(id_of(&flat), Some(1));
}

#[tokio::test]
async fn test_list_with_a_file_filter_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = Flat::list(
        &config_for(&server),
        None,
        Fields::new().with("plan", FileUpload::new("plan.pdf", b"%PDF".to_vec())),
    )
    .await;

    assert!(matches!(
        result,
        Err(ResourceError::Http(HttpError::InvalidHttpRequest(_)))
    ));
}

// ============================================================================
// create
// ============================================================================

#[tokio::test]
async fn test_create_posts_fields_and_builds_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/my-flat/"))
        .and(body_json(json!({"street": "Seestrasse 5", "rooms": 2.5})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "street": "Seestrasse 5",
            "rooms": 2.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flat = Flat::create(
        &config_for(&server),
        Some(token("creator")),
        Fields::new().with("street", "Seestrasse 5").with("rooms", 2.5),
    )
    .await
    .unwrap();

    assert_eq!(id_of(&flat), Some(77));
    assert_eq!(flat.access_token(), Some(&token("creator")));
    assert!(!flat.contains_key("access_token"));
}

#[tokio::test]
async fn test_create_rejected_payload_carries_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"street": ["This field is required."]})),
        )
        .mount(&server)
        .await;

    let error = Flat::create(&config_for(&server), None, Fields::new().with("rooms", 2))
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::Http(HttpError::InvalidRequest(_))));
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(
        error.json_body(),
        Some(&json!({"street": ["This field is required."]}))
    );
}

#[tokio::test]
async fn test_flat_image_create_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/flat-image/"))
        .and(body_string_contains(r#"name="flat""#))
        .and(body_string_contains(r#"filename="living-room.jpg""#))
        .and(body_string_contains("JPEGDATA"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 501, "flat": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let image = FlatImage::create(
        &config_for(&server),
        None,
        Fields::new()
            .with("flat", 42)
            .with("image", FileUpload::new("living-room.jpg", b"JPEGDATA".to_vec())),
    )
    .await
    .unwrap();

    assert_eq!(id_of(&image), Some(501));
}

// ============================================================================
// save
// ============================================================================

#[tokio::test]
async fn test_save_puts_fields_and_refreshes_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/my-flat/9/"))
        .and(body_json(json!({"rent_net": 2150})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "rent_net": 2150,
            "rent_gross": 2400,
            "images": [{"id": 3}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flat = Flat::from_object(Fields::with_id(9).with("rent_net", 2150).into());
    flat.set_access_token(Some(token("owner")));
    flat.save(&config_for(&server)).await.unwrap();

    assert_eq!(flat.get("rent_gross").and_then(FieldValue::as_i64), Some(2400));
    assert_eq!(flat.images().len(), 1);
    assert_eq!(flat.access_token(), Some(&token("owner")));
}

#[tokio::test]
async fn test_save_by_external_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/my-flat/ext-abc/"))
        .and(body_json(json!({"external_id": "abc", "description": "Renovated"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11,
            "external_id": "abc",
            "description": "Renovated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flat = Flat::from_object(
        Fields::with_external_id("abc")
            .with("description", "Renovated")
            .into(),
    );
    flat.save(&config_for(&server)).await.unwrap();

    assert_eq!(id_of(&flat), Some(11));
}

#[tokio::test]
async fn test_save_without_identity_fails_locally() {
    let server = MockServer::start().await;
    let mut flat = Flat::from_object(Fields::new().with("rooms", 1).into());

    let error = flat.save(&config_for(&server)).await.unwrap_err();
    assert!(matches!(error, ResourceError::MissingId { .. }));
}
