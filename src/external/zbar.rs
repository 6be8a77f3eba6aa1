//! QR decoding through `zbarimg`
//!
//! Only the QR symbology is enabled, so linear barcodes in the same image are
//! ignored. Symbols are read from the XML report rather than `--raw`, which
//! keeps a payload that contains newlines together as one text.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::OnceLock;
use tempfile::TempDir;

use super::{CollaboratorError, CollaboratorResult, QrDecoder, Tool};

/// `zbarimg` exit status when the image could not be read
const EXIT_IMAGE_ERROR: i32 = 2;
/// `zbarimg` exit status when no symbol was found
const EXIT_NO_SYMBOLS: i32 = 4;

static DATA_REGEX: OnceLock<Regex> = OnceLock::new();
static CDATA_REGEX: OnceLock<Regex> = OnceLock::new();

/// `<data attrs>body</data>`, where the body is CDATA sections and whitespace
fn data_regex() -> &'static Regex {
    DATA_REGEX.get_or_init(|| {
        Regex::new(r"(?s)<data([^>]*)>((?:<!\[CDATA\[.*?\]\]>|[^<])*)</data>")
            .expect("Invalid zbar data regex pattern")
    })
}

fn cdata_regex() -> &'static Regex {
    CDATA_REGEX.get_or_init(|| {
        Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("Invalid CDATA regex pattern")
    })
}

#[derive(Debug, Clone)]
pub struct ZbarDecoder {
    tool: Tool,
}

impl ZbarDecoder {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }
}

/// Arguments restricting the scan to QR codes with an XML report
fn decode_args(input: &Path) -> [&OsStr; 5] {
    [
        OsStr::new("--quiet"),
        OsStr::new("--xml"),
        OsStr::new("-Sdisable"),
        OsStr::new("-Sqrcode.enable"),
        input.as_os_str(),
    ]
}

/// One payload per `<data>` element, in document order
///
/// zbar splits a payload containing `]]>` over adjacent CDATA sections and
/// base64-encodes binary payloads (`format='base64'`).
fn parse_symbols(stdout: &[u8]) -> Vec<String> {
    let report = String::from_utf8_lossy(stdout);

    data_regex()
        .captures_iter(&report)
        .filter_map(|caps| {
            let text: String = cdata_regex()
                .captures_iter(&caps[2])
                .map(|section| section[1].to_string())
                .collect();

            if !caps[1].contains("format='base64'") {
                return Some(text);
            }

            let encoded: String = text.split_whitespace().collect();
            match general_purpose::STANDARD.decode(encoded) {
                Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping symbol with malformed base64 data");
                    None
                },
            }
        })
        .collect()
}

#[async_trait]
impl QrDecoder for ZbarDecoder {
    async fn decode(&self, image: &[u8]) -> CollaboratorResult<Vec<String>> {
        let name = self.tool.name();
        let workdir = TempDir::new().map_err(|e| CollaboratorError::io(name, e))?;
        let input = workdir.path().join("upload");
        tokio::fs::write(&input, image)
            .await
            .map_err(|e| CollaboratorError::io(name, e))?;

        let output = self.tool.run(decode_args(&input)).await?;

        match output.status.code() {
            Some(0) => Ok(parse_symbols(&output.stdout)),
            Some(EXIT_NO_SYMBOLS) => Ok(Vec::new()),
            Some(EXIT_IMAGE_ERROR) => {
                tracing::debug!(bytes = image.len(), "Upload is not a readable image");
                Ok(Vec::new())
            },
            _ => Err(self.tool.failure(&output)),
        }
    }

    async fn probe(&self) -> CollaboratorResult<()> {
        self.tool.probe("--version").await
    }
}
