//! Payload vocabularies and example payloads
//!
//! This module defines the enumerated field values accepted by the two
//! schemas, plus the example payloads served by the `/example` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allowed values of the custom payload's first field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadType {
    Ticket,
    Product,
    Auth,
    Invoice,
}

impl PayloadType {
    pub const ALL: [PayloadType; 4] = [
        PayloadType::Ticket,
        PayloadType::Product,
        PayloadType::Auth,
        PayloadType::Invoice,
    ];

    /// Exact, case-sensitive match against the allowed literals
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ticket" => Some(PayloadType::Ticket),
            "product" => Some(PayloadType::Product),
            "auth" => Some(PayloadType::Auth),
            "invoice" => Some(PayloadType::Invoice),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadType::Ticket => "ticket",
            PayloadType::Product => "product",
            PayloadType::Auth => "auth",
            PayloadType::Invoice => "invoice",
        }
    }
}

impl std::fmt::Display for PayloadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wi-Fi authentication type (`T:` key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WifiAuth {
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WPA2")]
    Wpa2,
    #[serde(rename = "WPA3")]
    Wpa3,
    /// Open network; also the value when `T:` is absent
    #[default]
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiAuth {
    /// Exact, case-sensitive match against the allowed literals
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WEP" => Some(WifiAuth::Wep),
            "WPA" => Some(WifiAuth::Wpa),
            "WPA2" => Some(WifiAuth::Wpa2),
            "WPA3" => Some(WifiAuth::Wpa3),
            "nopass" => Some(WifiAuth::NoPass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WifiAuth::Wep => "WEP",
            WifiAuth::Wpa => "WPA",
            WifiAuth::Wpa2 => "WPA2",
            WifiAuth::Wpa3 => "WPA3",
            WifiAuth::NoPass => "nopass",
        }
    }

    pub fn requires_password(&self) -> bool {
        *self != WifiAuth::NoPass
    }
}

impl std::fmt::Display for WifiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which example payload to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
    Valid,
    Invalid,
}

impl ExampleKind {
    /// `valid` (any case) selects the valid example, anything else the invalid one
    pub fn parse(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("valid") {
            ExampleKind::Valid
        } else {
            ExampleKind::Invalid
        }
    }

    pub fn payload(&self) -> String {
        match self {
            ExampleKind::Valid => example_valid_payload(),
            ExampleKind::Invalid => example_invalid_payload(),
        }
    }
}

/// Fixed malformed payload: unknown type literal
pub const INVALID_EXAMPLE: &str =
    "invalid:aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa:1.0.0:20240101T1200Z:id=12345";

/// Format a timestamp the way the custom payload expects (`YYYYMMDDTHHMMZ`)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%MZ").to_string()
}

/// Valid ticket payload stamped with the current UTC time and a random UUID
pub fn example_valid_payload() -> String {
    format!(
        "ticket:{}:1.0.0:{}:id=12345,seat=A1",
        Uuid::new_v4(),
        format_timestamp(Utc::now())
    )
}

pub fn example_invalid_payload() -> String {
    INVALID_EXAMPLE.to_string()
}
