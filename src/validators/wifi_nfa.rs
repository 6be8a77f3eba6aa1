//! Single-pattern validator for `WIFI:` configuration payloads
//!
//! Tokens are pulled out with a global `K:value;` match. A trailing token
//! without its closing `;` never matches and is dropped, unlike the
//! explicit-state walk which keeps it.

use regex::Regex;
use std::sync::OnceLock;

use super::literal_paths;
use super::wifi::{apply_rules, WifiTokens};
use super::Validator;
use crate::models::result::literal_path;
use crate::models::{ExtractedData, Schema, Strategy, ValidationResult, WifiError, WIFI_PREFIX};

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get or initialize the `K:value;` token pattern
fn token_regex() -> &'static Regex {
    TOKEN_REGEX
        .get_or_init(|| Regex::new(r"([A-Za-z]):([^;]*);").expect("Invalid token regex pattern"))
}

#[derive(Debug, Clone)]
pub struct WifiNfa {
    pattern: &'static Regex,
}

impl WifiNfa {
    pub fn new() -> Self {
        Self {
            pattern: token_regex(),
        }
    }

    fn tokenize(&self, body: &str) -> WifiTokens {
        self.pattern
            .captures_iter(body)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }

    fn reject(error: &WifiError) -> ValidationResult {
        ValidationResult::reject_all(literal_path(&literal_paths::REJECT), vec![error.brief()])
    }
}

impl Default for WifiNfa {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for WifiNfa {
    fn schema(&self) -> Schema {
        Schema::Wifi
    }

    fn strategy(&self) -> Strategy {
        Strategy::Nfa
    }

    fn validate(&self, text: &str) -> ValidationResult {
        let Some(body) = text.strip_prefix(WIFI_PREFIX) else {
            return Self::reject(&WifiError::MissingPrefix);
        };

        let tokens = self.tokenize(body);
        match apply_rules(&tokens, |_| {}) {
            Ok(fields) => ValidationResult::accept(
                literal_path(&literal_paths::WIFI_ACCEPT),
                ExtractedData::Wifi(fields),
            ),
            Err(e) => Self::reject(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WifiAuth;

    fn validate(text: &str) -> ValidationResult {
        WifiNfa::new().validate(text)
    }

    fn errors(result: &ValidationResult) -> Vec<&str> {
        assert!(result.error().is_none());
        result.messages()
    }

    #[test]
    fn test_wpa2_network() {
        let result = validate("WIFI:S:MyNet;T:WPA2;P:secret123;;");
        assert!(result.is_valid());
        assert_eq!(result.path(), ["start", "AUTH✔", "SSID✔", "PASS✔", "accept"]);

        let fields = result.extracted_data().and_then(ExtractedData::as_wifi).unwrap();
        assert_eq!(fields.ssid, "MyNet");
        assert_eq!(fields.auth, WifiAuth::Wpa2);
        assert_eq!(fields.password.as_deref(), Some("secret123"));
    }

    #[test]
    fn test_fixed_path_ignores_optional_fields() {
        let result = validate("WIFI:S:MyNet;H:false;;");
        assert!(result.is_valid());
        assert_eq!(result.path(), ["start", "AUTH✔", "SSID✔", "PASS✔", "accept"]);
        let fields = result.extracted_data().and_then(ExtractedData::as_wifi).unwrap();
        assert_eq!(fields.hidden, Some(false));
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("MyNet", "Missing WIFI: prefix"),
            ("WIFI:T:WPA;P:x;;", "Missing SSID"),
            ("WIFI:S:a;T:WPA4;;", "Invalid auth"),
            ("WIFI:S:a;T:WPA;;", "Password required"),
            ("WIFI:S:a;H:TRUE;;", "Invalid H value"),
        ];

        for (text, expected) in cases {
            let result = validate(text);
            assert!(!result.is_valid(), "expected rejection for {text}");
            assert_eq!(result.path(), ["start", "reject"]);
            assert_eq!(errors(&result), vec![expected]);
        }
    }

    #[test]
    fn test_unterminated_trailing_token_is_dropped() {
        // the explicit-state walk accepts this text; here the SSID token is lost
        let result = validate("WIFI:T:WPA;P:pw;S:tail");
        assert!(!result.is_valid());
        assert_eq!(errors(&result), vec!["Missing SSID"]);
    }

    #[test]
    fn test_single_letter_keys() {
        // `XS:` scans as key `S`
        let result = validate("WIFI:XS:net;;");
        let fields = result.extracted_data().and_then(ExtractedData::as_wifi).unwrap();
        assert_eq!(fields.ssid, "net");
    }
}
