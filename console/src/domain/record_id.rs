//! Opaque record identifier.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a remote record.
///
/// The API emits integer ids while older console payloads carried strings;
/// both decode into the same value. Ids always serialise as strings and are
/// never interpreted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawRecordId::deserialize(deserializer)? {
            RawRecordId::Text(text) => Self(text),
            RawRecordId::Number(number) => Self(number.to_string()),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(7), "7")]
    #[case(json!("7"), "7")]
    #[case(json!("a1b2"), "a1b2")]
    fn decodes_numbers_and_strings(#[case] raw: serde_json::Value, #[case] expected: &str) {
        let id: RecordId = serde_json::from_value(raw).expect("id decodes");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    fn integer_and_string_forms_are_equal() {
        assert_eq!(RecordId::from(42_i64), RecordId::from("42"));
    }

    #[rstest]
    fn rejects_non_scalar_ids() {
        let result = serde_json::from_value::<RecordId>(json!({"id": 1}));
        assert!(result.is_err());
    }
}
