//! Payload validators
//!
//! Four engines cover the (schema, strategy) grid:
//! - `CustomDfa` / `WifiDfa` walk the fields one by one and record every
//!   checkpoint reached, stopping at the first failure.
//! - `CustomNfa` / `WifiNfa` match with a precompiled pattern and report a
//!   fixed literal path that does not reflect partial progress.
//!
//! Validators hold no per-call state; one instance serves concurrent requests.

mod custom_dfa;
mod custom_nfa;
mod wifi;
mod wifi_dfa;
mod wifi_nfa;

pub use custom_dfa::CustomDfa;
pub use custom_nfa::CustomNfa;
pub use wifi_dfa::WifiDfa;
pub use wifi_nfa::WifiNfa;

use crate::models::{Schema, Strategy, ValidationResult};

/// Checkpoint labels of the explicit-state walks
pub mod checkpoints {
    pub const START: &str = "q0";
    pub const ACCEPT: &str = "q_accept";
    pub const REJECT: &str = "q_reject";

    pub const TYPE: &str = "q1";
    pub const UUID: &str = "q5";
    pub const VERSION: &str = "q42";
    pub const TIMESTAMP: &str = "q50";
    pub const DATA: &str = "q64";
    pub const PROCESS: &str = "q65";

    pub const WIFI: &str = "q_wifi";
    pub const SSID: &str = "q_S";
    pub const AUTH: &str = "q_T";
    pub const PASSWORD: &str = "q_P";
    pub const HIDDEN: &str = "q_H";
}

/// Fixed paths of the single-pattern strategy
pub mod literal_paths {
    pub const REJECT: [&str; 2] = ["start", "reject"];
    pub const CUSTOM_ACCEPT: [&str; 7] = [
        "start",
        "TYPE✔",
        "UUID✔",
        "VERSION✔",
        "TIMESTAMP✔",
        "DATA✔",
        "accept",
    ];
    pub const WIFI_ACCEPT: [&str; 5] = ["start", "AUTH✔", "SSID✔", "PASS✔", "accept"];
}

/// A payload validator for one schema and strategy
pub trait Validator: Send + Sync {
    fn schema(&self) -> Schema;

    fn strategy(&self) -> Strategy;

    /// Validate one decoded text
    fn validate(&self, input: &str) -> ValidationResult;
}

/// All four validators, built once and shared
pub struct ValidatorSet {
    custom_dfa: CustomDfa,
    custom_nfa: CustomNfa,
    wifi_dfa: WifiDfa,
    wifi_nfa: WifiNfa,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self {
            custom_dfa: CustomDfa::new(),
            custom_nfa: CustomNfa::new(),
            wifi_dfa: WifiDfa::new(),
            wifi_nfa: WifiNfa::new(),
        }
    }

    /// Select the validator for a schema and strategy
    pub fn get(&self, schema: Schema, strategy: Strategy) -> &dyn Validator {
        match (schema, strategy) {
            (Schema::Custom, Strategy::Dfa) => &self.custom_dfa,
            (Schema::Custom, Strategy::Nfa) => &self.custom_nfa,
            (Schema::Wifi, Strategy::Dfa) => &self.wifi_dfa,
            (Schema::Wifi, Strategy::Nfa) => &self.wifi_nfa,
        }
    }

    /// Sniff the schema from the text and validate it with the chosen strategy
    pub fn validate(&self, text: &str, strategy: Strategy) -> (Schema, ValidationResult) {
        let schema = Schema::sniff(text);
        (schema, self.get(schema, strategy).validate(text))
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        Self::new()
    }
}
