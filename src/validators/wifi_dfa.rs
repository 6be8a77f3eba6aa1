//! Explicit-state validator for `WIFI:` configuration payloads

use super::checkpoints as cp;
use super::wifi::{apply_rules, WifiTokens};
use super::Validator;
use crate::models::{
    ExtractedData, Schema, Strategy, Trace, ValidationResult, WifiError, WIFI_PREFIX,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct WifiDfa;

impl WifiDfa {
    pub fn new() -> Self {
        Self
    }
}

/// Split on `;` and keep every non-empty segment that has a `:`
///
/// A trailing segment without a closing `;` is still kept.
fn tokenize(body: &str) -> WifiTokens {
    body.split(';')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split_once(':'))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl Validator for WifiDfa {
    fn schema(&self) -> Schema {
        Schema::Wifi
    }

    fn strategy(&self) -> Strategy {
        Strategy::Dfa
    }

    fn validate(&self, text: &str) -> ValidationResult {
        let mut trace = Trace::start(cp::START);

        let Some(body) = text.strip_prefix(WIFI_PREFIX) else {
            return trace.reject(cp::REJECT, WifiError::MissingPrefix);
        };
        trace.visit(cp::WIFI);

        let tokens = tokenize(body);
        match apply_rules(&tokens, |check| trace.visit(check.checkpoint())) {
            Ok(fields) => trace.accept(&[cp::ACCEPT], ExtractedData::Wifi(fields)),
            Err(e) => trace.reject(cp::REJECT, e),
        }
    }
}
