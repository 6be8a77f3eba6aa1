//! Schema and strategy selection
//!
//! A decoded text is interpreted either as a custom ticket-like record or as a
//! Wi-Fi network configuration, and validated with one of two strategies.

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind};

/// Literal prefix identifying a Wi-Fi configuration payload
pub const WIFI_PREFIX: &str = "WIFI:";

/// Record format a decoded text is interpreted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Colon-delimited `type:uuid:version:timestamp:data` record
    Custom,
    /// `WIFI:` network-configuration URI
    Wifi,
}

impl Schema {
    /// Pick the schema by sniffing the literal `WIFI:` prefix
    pub fn sniff(text: &str) -> Self {
        if text.starts_with(WIFI_PREFIX) {
            Schema::Wifi
        } else {
            Schema::Custom
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Schema::Custom => "custom",
            Schema::Wifi => "wifi",
        }
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Hand-written field-by-field walk with a recorded checkpoint path
    #[default]
    #[serde(rename = "DFA")]
    Dfa,
    /// Single composed pattern with a fixed literal path
    #[serde(rename = "NFA")]
    Nfa,
}

impl Strategy {
    /// Parse a mode string (case-insensitive, blank means DFA)
    ///
    /// Values other than `DFA` and `NFA` are an error rather than a fallback.
    pub fn parse(mode: &str) -> Result<Self, ValidationError> {
        let mode = mode.trim();
        if mode.is_empty() {
            return Ok(Strategy::Dfa);
        }

        match mode.to_uppercase().as_str() {
            "DFA" => Ok(Strategy::Dfa),
            "NFA" => Ok(Strategy::Nfa),
            _ => Err(ValidationError::with_context(
                ValidationErrorKind::InvalidMode,
                "mode",
                format!("Unknown mode: {}", mode),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Dfa => "DFA",
            Strategy::Nfa => "NFA",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
