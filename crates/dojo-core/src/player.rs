use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidPlayerId;
use crate::value::{FieldValue, Number};

/// Well-known player field names.
pub mod fields {
    /// Hit points.
    pub const HP: &str = "hp";
    /// Experience.
    pub const XP: &str = "xp";
    /// Currency.
    pub const GOLD: &str = "gold";
    /// Resource consumed by training.
    pub const MANA: &str = "mana";
    /// Collected items.
    pub const INVENTORY: &str = "inventory";
    /// Skill currently being trained, or null.
    pub const ACTIVE_TRAINING: &str = "active_training";
    /// Unix timestamp (seconds) when the current training began, or null.
    pub const TRAINING_START: &str = "training_start";
    /// Overall mastery.
    pub const MASTERY: &str = "mastery";
}

/// Skills every new player starts with a zero counter for.
pub const TRAINABLE_SKILLS: [&str; 8] = [
    "seal_stillness",
    "seal_flame",
    "seal_flow",
    "seal_stone",
    "seal_gale",
    "seal_echo",
    "seal_shadow",
    "seal_radiance",
];

/// Human-readable skill name: `seal_flame` becomes `Flame`.
pub fn skill_display_name(skill: &str) -> String {
    let base = skill.strip_prefix("seal_").unwrap_or(skill);
    base.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Opaque, stable identity of a player.
///
/// The engine never authenticates it. Because it keys a stored record it is
/// restricted to ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Validate and wrap a raw identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidPlayerId> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(raw))
        } else {
            Err(InvalidPlayerId(raw))
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlayerId {
    type Err = InvalidPlayerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = InvalidPlayerId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The durable per-player record.
///
/// Stored as an open map of named fields so world data can introduce new
/// stats. Typed accessors cover the fields the engine itself relies on;
/// a missing or non-numeric stat reads as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerState {
    fields: BTreeMap<String, FieldValue>,
}

impl Default for PlayerState {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(fields::HP.to_string(), FieldValue::Integer(100));
        map.insert(fields::XP.to_string(), FieldValue::Integer(0));
        map.insert(fields::GOLD.to_string(), FieldValue::Integer(0));
        map.insert(fields::INVENTORY.to_string(), FieldValue::List(Vec::new()));
        map.insert(fields::MANA.to_string(), FieldValue::Integer(500));
        map.insert(fields::ACTIVE_TRAINING.to_string(), FieldValue::Null);
        map.insert(fields::TRAINING_START.to_string(), FieldValue::Null);
        for skill in TRAINABLE_SKILLS {
            map.insert(skill.to_string(), FieldValue::Integer(0));
        }
        map.insert(fields::MASTERY.to_string(), FieldValue::Integer(0));
        Self { fields: map }
    }
}

impl PlayerState {
    /// A record with no fields at all (every stat reads as 0).
    pub fn empty() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Raw access to a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Overwrite a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Mutable access to a field, inserting `Null` when absent.
    pub fn entry(&mut self, key: &str) -> &mut FieldValue {
        self.fields.entry(key.to_string()).or_default()
    }

    /// Iterate over all fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A numeric stat; missing or non-numeric fields read as 0.
    pub fn number(&self, key: &str) -> Number {
        self.fields
            .get(key)
            .and_then(FieldValue::as_number)
            .unwrap_or_default()
    }

    /// Hit points.
    pub fn hp(&self) -> Number {
        self.number(fields::HP)
    }

    /// Experience.
    pub fn xp(&self) -> Number {
        self.number(fields::XP)
    }

    /// Gold.
    pub fn gold(&self) -> Number {
        self.number(fields::GOLD)
    }

    /// Mana.
    pub fn mana(&self) -> Number {
        self.number(fields::MANA)
    }

    /// Mastery.
    pub fn mastery(&self) -> Number {
        self.number(fields::MASTERY)
    }

    /// Text items in the inventory, in acquisition order.
    pub fn inventory(&self) -> Vec<&str> {
        match self.fields.get(fields::INVENTORY) {
            Some(FieldValue::List(items)) => items.iter().filter_map(FieldValue::as_text).collect(),
            _ => Vec::new(),
        }
    }

    /// The skill being trained. Only non-empty text counts as training.
    pub fn active_training(&self) -> Option<&str> {
        self.fields
            .get(fields::ACTIVE_TRAINING)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// When the current training began.
    pub fn training_start(&self) -> Option<DateTime<Utc>> {
        let secs = match self.fields.get(fields::TRAINING_START)?.as_number()? {
            Number::Integer(n) => n,
            Number::Float(n) => n as i64,
        };
        DateTime::from_timestamp(secs, 0)
    }

    /// Record (or clear) the training start, stored as Unix seconds.
    pub fn set_training_start(&mut self, at: Option<DateTime<Utc>>) {
        let value = match at {
            Some(t) => FieldValue::Integer(t.timestamp()),
            None => FieldValue::Null,
        };
        self.fields.insert(fields::TRAINING_START.to_string(), value);
    }

    /// Begin training `skill` at `now`.
    pub fn start_training(&mut self, skill: &str, now: DateTime<Utc>) {
        self.set(fields::ACTIVE_TRAINING, skill);
        self.set_training_start(Some(now));
    }

    /// Return to idle: both training fields become null.
    pub fn stop_training(&mut self) {
        self.fields
            .insert(fields::ACTIVE_TRAINING.to_string(), FieldValue::Null);
        self.set_training_start(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = PlayerState::default();
        assert_eq!(state.hp(), Number::Integer(100));
        assert_eq!(state.xp(), Number::Integer(0));
        assert_eq!(state.gold(), Number::Integer(0));
        assert_eq!(state.mana(), Number::Integer(500));
        assert_eq!(state.mastery(), Number::Integer(0));
        assert!(state.inventory().is_empty());
        assert!(state.active_training().is_none());
        assert!(state.training_start().is_none());
        for skill in TRAINABLE_SKILLS {
            assert_eq!(state.number(skill), Number::Integer(0));
        }
    }

    #[test]
    fn missing_and_non_numeric_stats_read_zero() {
        let mut state = PlayerState::empty();
        assert_eq!(state.number("karma"), Number::Integer(0));
        state.set("karma", "lots");
        assert_eq!(state.number("karma"), Number::Integer(0));
    }

    #[test]
    fn training_round_trip() {
        let mut state = PlayerState::default();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        state.start_training("seal_flame", now);
        assert_eq!(state.active_training(), Some("seal_flame"));
        assert_eq!(state.training_start(), Some(now));

        state.stop_training();
        assert!(state.active_training().is_none());
        assert!(state.training_start().is_none());
    }

    #[test]
    fn empty_text_is_idle() {
        let mut state = PlayerState::default();
        state.set(fields::ACTIVE_TRAINING, "");
        assert!(state.active_training().is_none());
    }

    #[test]
    fn record_serializes_as_flat_document() {
        let state = PlayerState::default();
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["hp"], 100);
        assert_eq!(json["mana"], 500);
        assert!(json["active_training"].is_null());
        assert_eq!(json["inventory"], serde_json::json!([]));

        let back: PlayerState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn player_id_validation() {
        assert!(PlayerId::parse("123456789").is_ok());
        assert!(PlayerId::parse("kael_the-brave").is_ok());
        assert!(PlayerId::parse("").is_err());
        assert!(PlayerId::parse("../etc/passwd").is_err());
        assert!(PlayerId::parse("a b").is_err());
    }

    #[test]
    fn skill_names() {
        assert_eq!(skill_display_name("seal_flame"), "Flame");
        assert_eq!(skill_display_name("seal_still_water"), "Still Water");
        assert_eq!(skill_display_name("archery"), "Archery");
    }
}
