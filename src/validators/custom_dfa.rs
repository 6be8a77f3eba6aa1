//! Explicit-state validator for the custom payload
//!
//! Walks `type:uuid:version:timestamp:data` field by field. Each field's
//! checkpoint is recorded before the field is checked, so a rejected path
//! ends right after the checkpoint of the field that failed.

use std::collections::BTreeMap;

use super::checkpoints as cp;
use super::Validator;
use crate::models::{
    CustomFields, ExtractedData, PayloadError, PayloadType, Schema, Strategy, Trace,
    ValidationResult,
};

const UUID_GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];
const TIMESTAMP_LEN: usize = 14;

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomDfa;

impl CustomDfa {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for CustomDfa {
    fn schema(&self) -> Schema {
        Schema::Custom
    }

    fn strategy(&self) -> Strategy {
        Strategy::Dfa
    }

    fn validate(&self, payload: &str) -> ValidationResult {
        let mut trace = Trace::start(cp::START);

        let parts: Vec<&str> = payload.split(':').collect();
        let [type_part, uuid_part, version_part, ts_part, data_part] = parts[..] else {
            return trace.reject(cp::REJECT, PayloadError::PartCount(parts.len()));
        };

        trace.visit(cp::TYPE);
        let Some(payload_type) = PayloadType::parse(type_part) else {
            return trace.reject(cp::REJECT, PayloadError::InvalidType(type_part.to_string()));
        };

        trace.visit(cp::UUID);
        if !check_uuid(uuid_part) {
            return trace.reject(cp::REJECT, PayloadError::InvalidUuid(uuid_part.to_string()));
        }

        trace.visit(cp::VERSION);
        if !check_version(version_part) {
            return trace.reject(
                cp::REJECT,
                PayloadError::InvalidVersion(version_part.to_string()),
            );
        }

        trace.visit(cp::TIMESTAMP);
        if !check_timestamp(ts_part) {
            return trace.reject(cp::REJECT, PayloadError::InvalidTimestamp(ts_part.to_string()));
        }

        trace.visit(cp::DATA);
        let parsed_data = match parse_data(data_part) {
            Ok(pairs) => pairs,
            Err(e) => return trace.reject(cp::REJECT, e),
        };

        trace.accept(
            &[cp::PROCESS, cp::ACCEPT],
            ExtractedData::Custom(CustomFields {
                payload_type,
                uuid: uuid_part.to_string(),
                version: version_part.to_string(),
                timestamp: ts_part.to_string(),
                data: data_part.to_string(),
                parsed_data: Some(parsed_data),
            }),
        )
    }
}

/// Five hyphen-separated groups of exactly 8-4-4-4-12 characters
///
/// Only lengths are checked here; hex content is not.
fn check_uuid(uuid: &str) -> bool {
    let groups: Vec<&str> = uuid.split('-').collect();
    groups.len() == UUID_GROUP_LENGTHS.len()
        && groups
            .iter()
            .zip(UUID_GROUP_LENGTHS)
            .all(|(group, len)| group.chars().count() == len)
}

/// Three dot-separated groups of decimal digits
fn check_version(version: &str) -> bool {
    let groups: Vec<&str> = version.split('.').collect();
    groups.len() == 3
        && groups
            .iter()
            .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()))
}

/// 14 characters with `T` at index 8 and a trailing `Z`
fn check_timestamp(ts: &str) -> bool {
    let chars: Vec<char> = ts.chars().collect();
    chars.len() == TIMESTAMP_LEN && chars[8] == 'T' && chars[TIMESTAMP_LEN - 1] == 'Z'
}

/// Comma-separated `key=value` pairs; later duplicate keys win
fn parse_data(data: &str) -> Result<BTreeMap<String, String>, PayloadError> {
    if data.is_empty() || !data.contains('=') {
        return Err(PayloadError::InvalidData);
    }

    let mut pairs = BTreeMap::new();
    for pair in data.split(',') {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(PayloadError::InvalidPair(pair.to_string()));
        };
        pairs.insert(key.to_string(), value.to_string());
    }
    Ok(pairs)
}
