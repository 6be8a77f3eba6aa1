//! Validation results and checkpoint paths
//!
//! A `ValidationResult` is built fresh for every validation call. It always
//! carries the checkpoint path; an accepted result carries the extracted
//! fields and a rejected one carries its error message(s), never both.

use serde::Serialize;
use std::collections::BTreeMap;

use super::payload::{PayloadType, WifiAuth};
use super::schema::Schema;

/// Outcome of validating one decoded text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extracted_data: Option<ExtractedData>,
}

impl ValidationResult {
    /// Accepted result with the extracted fields
    pub fn accept(path: Vec<String>, data: ExtractedData) -> Self {
        Self {
            valid: true,
            path,
            error: None,
            errors: None,
            extracted_data: Some(data),
        }
    }

    /// Rejected result reporting a single `error` message
    pub fn reject(path: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            path,
            error: Some(error.into()),
            errors: None,
            extracted_data: None,
        }
    }

    /// Rejected result reporting an `errors` list
    pub fn reject_all(path: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            valid: false,
            path,
            error: None,
            errors: Some(errors),
            extracted_data: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    /// All error messages regardless of how they are reported
    pub fn messages(&self) -> Vec<&str> {
        match (&self.error, &self.errors) {
            (Some(error), _) => vec![error.as_str()],
            (None, Some(errors)) => errors.iter().map(String::as_str).collect(),
            (None, None) => Vec::new(),
        }
    }

    pub fn extracted_data(&self) -> Option<&ExtractedData> {
        self.extracted_data.as_ref()
    }
}

/// Checkpoint path under construction
#[derive(Debug, Clone, Default)]
pub struct Trace {
    path: Vec<String>,
}

impl Trace {
    /// Start a path at the given checkpoint
    pub fn start(label: &str) -> Self {
        Self {
            path: vec![label.to_string()],
        }
    }

    /// Record that a checkpoint was reached
    pub fn visit(&mut self, label: &str) {
        self.path.push(label.to_string());
    }

    /// Terminate at the reject checkpoint
    pub fn reject(mut self, reject_label: &str, error: impl ToString) -> ValidationResult {
        self.path.push(reject_label.to_string());
        ValidationResult::reject(self.path, error.to_string())
    }

    /// Terminate through the given trailing checkpoints
    pub fn accept(mut self, tail: &[&str], data: ExtractedData) -> ValidationResult {
        self.path.extend(tail.iter().map(|label| label.to_string()));
        ValidationResult::accept(self.path, data)
    }
}

/// Build a path from fixed literal labels
pub fn literal_path(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

/// Fields extracted from an accepted payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractedData {
    Custom(CustomFields),
    Wifi(WifiFields),
}

impl ExtractedData {
    pub fn as_custom(&self) -> Option<&CustomFields> {
        match self {
            ExtractedData::Custom(fields) => Some(fields),
            ExtractedData::Wifi(_) => None,
        }
    }

    pub fn as_wifi(&self) -> Option<&WifiFields> {
        match self {
            ExtractedData::Wifi(fields) => Some(fields),
            ExtractedData::Custom(_) => None,
        }
    }
}

/// Raw fields of an accepted custom payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomFields {
    #[serde(rename = "type")]
    pub payload_type: PayloadType,
    pub uuid: String,
    pub version: String,
    pub timestamp: String,
    pub data: String,
    /// Key/value pairs of `data`; only the explicit-state walk fills this in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<BTreeMap<String, String>>,
}

/// Fields of an accepted Wi-Fi configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiFields {
    /// Always `Schema::Wifi`
    pub schema: Schema,
    pub auth: WifiAuth,
    pub ssid: String,
    pub password: Option<String>,
    pub hidden: Option<bool>,
}
