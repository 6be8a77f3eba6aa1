//! Single-pattern validator for the custom payload

use regex::Regex;
use std::sync::OnceLock;

use super::literal_paths;
use super::Validator;
use crate::models::result::literal_path;
use crate::models::{
    CustomFields, ExtractedData, PayloadError, PayloadType, Schema, Strategy, ValidationResult,
};

static PAYLOAD_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get or initialize the composed payload pattern
fn payload_regex() -> &'static Regex {
    PAYLOAD_REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"^(ticket|product|auth|invoice)",
            r":([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})",
            r":([0-9]+\.[0-9]+\.[0-9]+)",
            r":([0-9]{8}T[0-9]{4}Z)",
            // a single trailing newline is tolerated at the end anchor
            r":([A-Za-z0-9]+=[A-Za-z0-9]+(?:,[A-Za-z0-9]+=[A-Za-z0-9]+)*)\n?$",
        ))
        .expect("Invalid payload regex pattern")
    })
}

#[derive(Debug, Clone)]
pub struct CustomNfa {
    pattern: &'static Regex,
}

impl CustomNfa {
    pub fn new() -> Self {
        Self {
            pattern: payload_regex(),
        }
    }
}

impl Default for CustomNfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for CustomNfa {
    fn schema(&self) -> Schema {
        Schema::Custom
    }

    fn strategy(&self) -> Strategy {
        Strategy::Nfa
    }

    fn validate(&self, payload: &str) -> ValidationResult {
        let mismatch = || {
            ValidationResult::reject_all(
                literal_path(&literal_paths::REJECT),
                vec![PayloadError::PatternMismatch.to_string()],
            )
        };

        let Some(caps) = self.pattern.captures(payload) else {
            return mismatch();
        };
        // the alternation only admits the four type literals
        let Some(payload_type) = PayloadType::parse(&caps[1]) else {
            return mismatch();
        };

        ValidationResult::accept(
            literal_path(&literal_paths::CUSTOM_ACCEPT),
            ExtractedData::Custom(CustomFields {
                payload_type,
                uuid: caps[2].to_string(),
                version: caps[3].to_string(),
                timestamp: caps[4].to_string(),
                data: caps[5].to_string(),
                parsed_data: None,
            }),
        )
    }
}
