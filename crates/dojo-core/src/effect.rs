use serde::{Deserialize, Deserializer};

use crate::value::{FieldValue, Number};

/// A declarative instruction to mutate one player field.
///
/// The variant is decided once, when world data is parsed, from the shape of
/// the JSON value: numbers add, arrays append, everything else overwrites.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectValue {
    /// Add to the existing numeric field (absent counts as 0).
    Delta(Number),
    /// Append items to the existing sequence field.
    Append(Vec<String>),
    /// Overwrite the field outright (`Null` clears it).
    Set(FieldValue),
}

impl EffectValue {
    /// Classify a raw JSON value. Every value maps to exactly one variant.
    ///
    /// Array elements that are not strings are kept as their compact JSON
    /// text so an append always yields a sequence of strings.
    pub fn classify(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Number(n) => Self::Delta(Number::from_json(&n)),
            Value::Array(items) => Self::Append(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            other => Self::Set(FieldValue::from(other)),
        }
    }
}

impl<'de> Deserialize<'de> for EffectValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_deltas() {
        assert_eq!(
            EffectValue::classify(json!(25)),
            EffectValue::Delta(Number::Integer(25))
        );
        assert_eq!(
            EffectValue::classify(json!(-1.5)),
            EffectValue::Delta(Number::Float(-1.5))
        );
    }

    #[test]
    fn arrays_are_appends() {
        assert_eq!(
            EffectValue::classify(json!(["Rusty Sword", "Torch"])),
            EffectValue::Append(vec!["Rusty Sword".to_string(), "Torch".to_string()])
        );
    }

    #[test]
    fn non_string_array_items_become_text() {
        assert_eq!(
            EffectValue::classify(json!(["key", 7])),
            EffectValue::Append(vec!["key".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn everything_else_is_set() {
        assert_eq!(
            EffectValue::classify(json!("seal_flame")),
            EffectValue::Set(FieldValue::Text("seal_flame".to_string()))
        );
        assert_eq!(
            EffectValue::classify(json!(null)),
            EffectValue::Set(FieldValue::Null)
        );
        // Booleans are never numeric.
        assert_eq!(
            EffectValue::classify(json!(true)),
            EffectValue::Set(FieldValue::Boolean(true))
        );
    }

    #[test]
    fn deserialize_classifies() {
        let effect: EffectValue = serde_json::from_str("[\"Herb\"]").unwrap();
        assert_eq!(effect, EffectValue::Append(vec!["Herb".to_string()]));
    }
}
