//! Scan and example endpoints

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::external::QrEncoder;
use crate::models::{ExampleKind, Strategy, ValidationError, ValidationErrorKind};
use crate::scan::{ScanReport, ScanService};

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";
/// Multipart field carrying the strategy
const MODE_FIELD: &str = "mode";

/// Decode an uploaded image and validate every QR payload in it
///
/// `mode` is matched case-insensitively and defaults to `DFA` when missing or
/// blank. Any other value is rejected with 400 `validation_error`; it is not
/// treated as `NFA`.
///
/// # Example
/// ```text
/// POST /scan  (multipart: file=<image>, mode=DFA|NFA)
/// ```
pub async fn scan(
    State(scanner): State<ScanService>,
    mut multipart: Multipart,
) -> Result<Json<ScanReport>> {
    let mut image = None;
    let mut mode = String::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => image = Some(field.bytes().await?),
            MODE_FIELD => mode = field.text().await?,
            _ => {},
        }
    }

    let strategy = Strategy::parse(&mode)?;
    let image =
        image.ok_or_else(|| ValidationError::new(ValidationErrorKind::RequiredField, FILE_FIELD))?;

    let report = scanner.scan_image(&image, strategy).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ExampleParams {
    kind: Option<String>,
}

/// Render an example payload as a QR PNG
///
/// # Example
/// ```text
/// GET /example?kind=valid
/// ```
pub async fn example(
    State(encoder): State<Arc<dyn QrEncoder>>,
    Query(params): Query<ExampleParams>,
) -> Result<Response> {
    let kind = ExampleKind::parse(params.kind.as_deref().unwrap_or("valid"));
    let payload = kind.payload();
    tracing::debug!(kind = ?kind, payload = %payload, "Encoding example payload");

    let png = encoder.encode(&payload).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
