//! Field rules shared by both Wi-Fi validators
//!
//! The two strategies differ only in how they tokenize `KEY:VALUE;` pairs
//! and in how they report progress; the rules applied to the resulting
//! key/value map are the same.

use std::collections::HashMap;

use super::checkpoints as cp;
use crate::models::{Schema, WifiAuth, WifiError, WifiFields};

/// Key/value map parsed from the text after the `WIFI:` prefix
pub(super) type WifiTokens = HashMap<String, String>;

/// Rule passed on the way to acceptance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WifiCheck {
    Ssid,
    Auth,
    Password,
    Hidden,
}

impl WifiCheck {
    pub(super) fn checkpoint(&self) -> &'static str {
        match self {
            WifiCheck::Ssid => cp::SSID,
            WifiCheck::Auth => cp::AUTH,
            WifiCheck::Password => cp::PASSWORD,
            WifiCheck::Hidden => cp::HIDDEN,
        }
    }
}

/// Apply the Wi-Fi field rules in order, reporting each rule that passes
///
/// `Hidden` is only reported when the `H` key is present.
pub(super) fn apply_rules(
    tokens: &WifiTokens,
    mut passed: impl FnMut(WifiCheck),
) -> Result<WifiFields, WifiError> {
    let ssid = match tokens.get("S") {
        Some(ssid) if !ssid.is_empty() => ssid.clone(),
        _ => return Err(WifiError::MissingSsid),
    };
    passed(WifiCheck::Ssid);

    let auth = match tokens.get("T") {
        None => WifiAuth::default(),
        Some(raw) => WifiAuth::parse(raw).ok_or_else(|| WifiError::InvalidAuth(raw.clone()))?,
    };
    passed(WifiCheck::Auth);

    let password = tokens.get("P").cloned();
    let has_password = password.as_deref().is_some_and(|p| !p.is_empty());
    if auth.requires_password() && !has_password {
        return Err(WifiError::PasswordRequired);
    }
    passed(WifiCheck::Password);

    let hidden = match tokens.get("H").map(String::as_str) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => return Err(WifiError::InvalidHidden),
    };
    if hidden.is_some() {
        passed(WifiCheck::Hidden);
    }

    Ok(WifiFields {
        schema: Schema::Wifi,
        auth,
        ssid,
        password,
        hidden,
    })
}
