use serde::Deserialize;

pub mod api;

/// An already-hashed identifier as sent back by clients.
///
/// Create responses carry ids as strings, but clients that treat them as
/// numbers send them back unquoted, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "KeyRepr")]
pub struct Key(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Text(String),
    Number(u64),
}

impl From<KeyRepr> for Key {
    fn from(repr: KeyRepr) -> Self {
        match repr {
            KeyRepr::Text(s) => Key(s),
            KeyRepr::Number(n) => Key(n.to_string()),
        }
    }
}

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_string_or_number() {
        let a: Key = serde_json::from_str(r#""12345""#).unwrap();
        let b: Key = serde_json::from_str("12345").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "12345");
    }

    #[test]
    fn key_accepts_full_u64_range() {
        let key: Key = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(key.as_str(), "18446744073709551615");
    }

    #[test]
    fn key_rejects_other_values() {
        assert!(serde_json::from_str::<Key>("-1").is_err());
        assert!(serde_json::from_str::<Key>("[1]").is_err());
        assert!(serde_json::from_str::<Key>("null").is_err());
    }
}
