//! Integration tests for qrgate
//!
//! These tests drive the router end to end with mock collaborators and
//! verify the HTTP contract of every endpoint.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use qrgate::{
    api::server::create_router,
    test_utils::{
        mock_collaborators, test_state, test_state_with, MockDecoder, MockEncoder, MockFailure,
        MockRenderer, FAKE_PNG, VALID_CUSTOM, VALID_WIFI,
    },
};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "qrgate-test-boundary";

/// Build a multipart body with an optional image and an optional mode
fn multipart_body(image: Option<&[u8]>, mode: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(mode) = mode {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"mode\"\r\n\r\n{mode}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"qr.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn scan_request(image: Option<&[u8]>, mode: Option<&str>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/scan")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(image, mode)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_scan_defaults_to_dfa() {
    let decoder = MockDecoder::with_texts(&[VALID_CUSTOM]);
    let app = create_router(test_state(decoder.clone()));

    let response = app.oneshot(scan_request(Some(b"png-bytes"), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["mode"], "DFA");

    let item = &json["items"][0];
    assert_eq!(item["schema"], "custom");
    assert_eq!(item["text"], VALID_CUSTOM);
    assert_eq!(item["valid"], true);
    assert_eq!(item["path"].as_array().unwrap().len(), 8);
    assert_eq!(item["path"][7], "q_accept");
    assert_eq!(item["extracted_data"]["type"], "ticket");
    assert_eq!(item["extracted_data"]["parsed_data"]["seat"], "A1");
    assert!(item["diagram"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    // The upload reaches the decoder byte for byte
    assert_eq!(decoder.uploads(), vec![b"png-bytes".to_vec()]);
}

#[tokio::test]
async fn test_scan_nfa_mode() {
    let decoder = MockDecoder::with_texts(&[VALID_CUSTOM, VALID_WIFI]);
    let app = create_router(test_state(decoder));

    let response = app.oneshot(scan_request(Some(b"img"), Some("nfa"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["mode"], "NFA");

    let custom = &json["items"][0];
    assert_eq!(custom["valid"], true);
    assert_eq!(custom["path"].as_array().unwrap().len(), 7);
    assert!(custom["extracted_data"].get("parsed_data").is_none());

    let wifi = &json["items"][1];
    assert_eq!(wifi["schema"], "wifi");
    assert_eq!(
        wifi["path"],
        serde_json::json!(["start", "AUTH✔", "SSID✔", "PASS✔", "accept"])
    );
    assert_eq!(wifi["extracted_data"]["schema"], "wifi");
    assert_eq!(wifi["extracted_data"]["password"], "secret123");
}

#[tokio::test]
async fn test_scan_rejections_do_not_fail_the_batch() {
    let decoder = MockDecoder::with_texts(&["ticket:1:2", VALID_WIFI, "WIFI:T:WPA;P:x;;"]);
    let app = create_router(test_state(decoder));

    let response = app.oneshot(scan_request(Some(b"img"), Some("DFA"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    assert_eq!(items[0]["valid"], false);
    assert_eq!(items[0]["error"], "Expected 5 parts, got 3");
    assert_eq!(items[0]["path"], serde_json::json!(["q0", "q_reject"]));

    assert_eq!(items[1]["valid"], true);

    assert_eq!(items[2]["valid"], false);
    assert_eq!(items[2]["error"], "Missing SSID");
}

#[tokio::test]
async fn test_scan_nfa_reports_error_list() {
    let decoder = MockDecoder::with_texts(&["ticket:1:2"]);
    let app = create_router(test_state(decoder));

    let response = app.oneshot(scan_request(Some(b"img"), Some("NFA"))).await.unwrap();
    let json = json_body(response).await;

    let item = &json["items"][0];
    assert_eq!(item["errors"], serde_json::json!(["Pattern mismatch"]));
    assert!(item.get("error").is_none());
    assert!(item.get("extracted_data").is_none());
}

#[tokio::test]
async fn test_scan_multiline_payload_is_one_item() {
    let text = format!("{VALID_CUSTOM}\n");
    let decoder = MockDecoder::with_texts(&[text.as_str()]);

    for mode in ["DFA", "NFA"] {
        let app = create_router(test_state(decoder.clone()));
        let response = app.oneshot(scan_request(Some(b"img"), Some(mode))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["items"][0]["text"], text.as_str());
        assert_eq!(json["items"][0]["valid"], true, "{mode} rejected the payload");
    }
}

#[tokio::test]
async fn test_scan_no_codes_found() {
    let app = create_router(test_state(MockDecoder::with_texts(&[])));

    let response = app.oneshot(scan_request(Some(b"img"), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["items"], serde_json::json!([]));
}

#[tokio::test]
async fn test_scan_unknown_mode_is_bad_request() {
    let app = create_router(test_state(MockDecoder::with_texts(&[VALID_CUSTOM])));

    let response = app.oneshot(scan_request(Some(b"img"), Some("PDA"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"]["type"], "validation_error");
    assert_eq!(json["error"]["status"], 400);
}

#[tokio::test]
async fn test_scan_missing_file_is_bad_request() {
    let app = create_router(test_state(MockDecoder::with_texts(&[VALID_CUSTOM])));

    let response = app.oneshot(scan_request(None, Some("DFA"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert!(json["error"]["message"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_scan_decoder_unavailable() {
    let app = create_router(test_state(MockDecoder::failing(MockFailure::Unavailable)));

    let response = app.oneshot(scan_request(Some(b"img"), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = json_body(response).await;
    assert_eq!(json["error"]["type"], "collaborator_unavailable");
}

#[tokio::test]
async fn test_scan_renderer_failure_omits_diagram() {
    let collaborators = mock_collaborators(
        MockDecoder::with_texts(&[VALID_WIFI]),
        MockEncoder::new(),
        MockRenderer::failing(MockFailure::Failed),
    );
    let app = create_router(test_state_with(collaborators));

    let response = app.oneshot(scan_request(Some(b"img"), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["items"][0]["valid"], true);
    assert!(json["items"][0].get("diagram").is_none());
}

#[tokio::test]
async fn test_example_valid_png() {
    let encoder = MockEncoder::new();
    let collaborators =
        mock_collaborators(MockDecoder::default(), encoder.clone(), MockRenderer::new());
    let app = create_router(test_state_with(collaborators));

    let response = app.oneshot(get("/example?kind=VALID")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.starts_with(FAKE_PNG));

    let encoded = encoder.encoded();
    assert_eq!(encoded.len(), 1);
    assert!(encoded[0].starts_with("ticket:"));
    assert!(encoded[0].contains(":1.0.0:"));
}

#[tokio::test]
async fn test_example_defaults_to_valid() {
    let encoder = MockEncoder::new();
    let collaborators =
        mock_collaborators(MockDecoder::default(), encoder.clone(), MockRenderer::new());
    let app = create_router(test_state_with(collaborators));

    let response = app.oneshot(get("/example")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(encoder.encoded()[0].starts_with("ticket:"));
}

#[tokio::test]
async fn test_example_invalid_kind() {
    let encoder = MockEncoder::new();
    let collaborators =
        mock_collaborators(MockDecoder::default(), encoder.clone(), MockRenderer::new());
    let app = create_router(test_state_with(collaborators));

    let response = app.oneshot(get("/example?kind=whatever")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        encoder.encoded(),
        vec![qrgate::models::payload::INVALID_EXAMPLE.to_string()]
    );
}

#[tokio::test]
async fn test_example_encoder_unavailable() {
    let collaborators = mock_collaborators(
        MockDecoder::default(),
        MockEncoder::failing(MockFailure::Unavailable),
        MockRenderer::new(),
    );
    let app = create_router(test_state_with(collaborators));

    let response = app.oneshot(get("/example?kind=valid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = create_router(test_state(MockDecoder::default()));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_readyz_reflects_probes() {
    let collaborators = mock_collaborators(
        MockDecoder::default(),
        MockEncoder::new(),
        MockRenderer::failing(MockFailure::Unavailable),
    );
    let state = test_state_with(collaborators.clone());
    qrgate::api::probe_collaborators(&state.health, &collaborators).await;
    let app = create_router(state);

    let response = app.oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["decoder"]["status"], "healthy");
    assert_eq!(json["checks"]["renderer"]["status"], "degraded");
}

#[tokio::test]
async fn test_build_endpoint_returns_version() {
    let app = create_router(test_state(MockDecoder::default()));

    let response = app.oneshot(get("/build")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_router(test_state(MockDecoder::default()));

    let response = app.oneshot(get("/nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
