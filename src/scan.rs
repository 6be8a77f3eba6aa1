//! Scan pipeline: decode, validate, draw
//!
//! Every text decoded from an image is validated on its own. A rejected
//! payload or a failed diagram never affects the other items.

use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, Span};

use crate::diagram::DiagramRenderer;
use crate::error::Result;
use crate::external::QrDecoder;
use crate::logging::Timer;
use crate::models::{Schema, Strategy, ValidationResult};
use crate::validators::ValidatorSet;

/// One decoded text and its validation outcome
#[derive(Debug, Clone, Serialize)]
pub struct ScanItem {
    pub schema: Schema,
    pub text: String,
    #[serde(flatten)]
    pub result: ValidationResult,
    /// PNG data URI of the path diagram, when rendering succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

/// Response body of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Number of texts decoded from the image
    pub count: usize,
    pub mode: Strategy,
    pub items: Vec<ScanItem>,
}

/// Validates decoded payloads and attaches diagrams
#[derive(Clone)]
pub struct ScanService {
    validators: Arc<ValidatorSet>,
    decoder: Arc<dyn QrDecoder>,
    diagrams: Option<DiagramRenderer>,
}

impl ScanService {
    /// `diagrams: None` disables diagram rendering
    pub fn new(
        validators: Arc<ValidatorSet>,
        decoder: Arc<dyn QrDecoder>,
        diagrams: Option<DiagramRenderer>,
    ) -> Self {
        Self {
            validators,
            decoder,
            diagrams,
        }
    }

    /// Decode an image and validate every QR payload in it
    pub async fn scan_image(&self, image: &[u8], strategy: Strategy) -> Result<ScanReport> {
        let timer = Timer::start("scan_image");

        let texts = self.decoder.decode(image).await?;
        tracing::info!(
            bytes = image.len(),
            codes = texts.len(),
            mode = %strategy,
            "Decoded upload"
        );

        let report = self.scan_texts(texts, strategy).await;
        timer.stop();
        Ok(report)
    }

    /// Validate already-decoded texts in order
    pub async fn scan_texts(&self, texts: Vec<String>, strategy: Strategy) -> ScanReport {
        let mut items = Vec::with_capacity(texts.len());
        for text in texts {
            items.push(self.scan_text(text, strategy).await);
        }

        ScanReport {
            count: items.len(),
            mode: strategy,
            items,
        }
    }

    /// Validate one text and try to draw its path
    pub async fn scan_text(&self, text: String, strategy: Strategy) -> ScanItem {
        let span = crate::scan_span!(Schema::sniff(&text), strategy);
        self.scan_text_in(text, strategy).instrument(span).await
    }

    async fn scan_text_in(&self, text: String, strategy: Strategy) -> ScanItem {
        let timer = Timer::start("scan_item");
        let span = Span::current();

        let (schema, result) = self.validators.validate(&text, strategy);
        span.record("valid", result.is_valid());
        span.record("path_len", result.path().len() as u64);

        let diagram = self.draw(&result, schema, strategy).await;
        span.record("diagram", diagram.is_some());
        timer.stop_in(&span);

        ScanItem {
            schema,
            text,
            result,
            diagram,
        }
    }

    async fn draw(
        &self,
        result: &ValidationResult,
        schema: Schema,
        strategy: Strategy,
    ) -> Option<String> {
        let renderer = self.diagrams.as_ref()?;
        if result.path().is_empty() {
            return None;
        }

        match renderer.render(result.path(), schema, strategy).await {
            Ok(uri) => Some(uri),
            Err(e) => {
                tracing::warn!(error = %e, schema = %schema, "Diagram omitted");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockDecoder, MockFailure, MockRenderer, VALID_CUSTOM, VALID_WIFI};

    fn service(decoder: MockDecoder, renderer: Option<MockRenderer>) -> ScanService {
        ScanService::new(
            Arc::new(ValidatorSet::new()),
            Arc::new(decoder),
            renderer.map(|r| DiagramRenderer::new(Arc::new(r))),
        )
    }

    #[tokio::test]
    async fn test_batch_isolation() {
        let decoder = MockDecoder::with_texts(&[VALID_CUSTOM, "garbage", VALID_WIFI]);
        let report = service(decoder, Some(MockRenderer::new()))
            .scan_image(b"img", Strategy::Dfa)
            .await
            .unwrap();

        assert_eq!(report.count, 3);
        assert_eq!(report.mode, Strategy::Dfa);
        let valid: Vec<bool> = report.items.iter().map(|i| i.result.is_valid()).collect();
        assert_eq!(valid, vec![true, false, true]);
        assert_eq!(report.items[2].schema, Schema::Wifi);
        assert!(report.items.iter().all(|i| i.diagram.is_some()));
    }

    #[tokio::test]
    async fn test_render_failure_omits_diagram() {
        let decoder = MockDecoder::with_texts(&[VALID_CUSTOM]);
        let report = service(decoder, Some(MockRenderer::failing(MockFailure::Timeout)))
            .scan_image(b"img", Strategy::Nfa)
            .await
            .unwrap();

        assert_eq!(report.count, 1);
        assert!(report.items[0].result.is_valid());
        assert!(report.items[0].diagram.is_none());
    }

    #[tokio::test]
    async fn test_diagrams_disabled() {
        let decoder = MockDecoder::with_texts(&[VALID_CUSTOM]);
        let report = service(decoder, None).scan_image(b"img", Strategy::Dfa).await.unwrap();
        assert!(report.items[0].diagram.is_none());
    }

    #[tokio::test]
    async fn test_no_codes() {
        let report = service(MockDecoder::with_texts(&[]), None)
            .scan_image(b"img", Strategy::Dfa)
            .await
            .unwrap();
        assert_eq!(report.count, 0);
        assert!(report.items.is_empty());
    }

    #[tokio::test]
    async fn test_decoder_unavailable() {
        let decoder = MockDecoder::failing(MockFailure::Unavailable);
        let err = service(decoder, None)
            .scan_image(b"img", Strategy::Dfa)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::CollaboratorUnavailable(_)));
    }

    #[tokio::test]
    async fn test_item_serialization() {
        let item = service(MockDecoder::with_texts(&[]), None)
            .scan_text("WIFI:S:x;;".to_string(), Strategy::Nfa)
            .await;
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["schema"], "wifi");
        assert_eq!(value["text"], "WIFI:S:x;;");
        assert_eq!(value["valid"], true);
        assert!(value["path"].is_array());
        assert!(value.get("diagram").is_none());
    }
}
