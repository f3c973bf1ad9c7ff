use std::hash::{Hash, Hasher};

use serde_json::Value;
use siphasher::sip::SipHasher13;

/// Hash text into the decimal key form used for user and paste ids.
///
/// SipHash-1-3 with zero keys. Ids are persisted, so the algorithm must not
/// change between builds; this is not a cryptographic digest.
pub fn digest(text: &str) -> String {
    let mut hasher = SipHasher13::new();
    text.hash(&mut hasher);
    hasher.finish().to_string()
}

/// Text form of a client-supplied identity: strings contribute their
/// contents, anything else its compact JSON.
pub fn identity_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
