//! The effect engine: pure transformation of player state.

use std::collections::BTreeMap;

use dojo_core::{EffectValue, FieldValue, PlayerState};

/// Apply a set of named effects to a snapshot, returning the new state.
///
/// Keys are distinct fields, so iteration order never changes the result.
/// `Set` effects are idempotent; `Delta` and `Append` deliberately are not.
pub fn apply(state: &PlayerState, effects: &BTreeMap<String, EffectValue>) -> PlayerState {
    let mut next = state.clone();
    for (key, effect) in effects {
        apply_effect(&mut next, key, effect);
    }
    next
}

/// Apply one effect to one field in place.
pub fn apply_effect(state: &mut PlayerState, key: &str, effect: &EffectValue) {
    match effect {
        EffectValue::Delta(delta) => {
            let current = state.number(key);
            state.set(key, current + *delta);
        }
        EffectValue::Append(items) => {
            let field = state.entry(key);
            if !matches!(field, FieldValue::List(_)) {
                *field = FieldValue::List(Vec::new());
            }
            if let FieldValue::List(list) = field {
                list.extend(items.iter().cloned().map(FieldValue::Text));
            }
        }
        EffectValue::Set(value) => state.set(key, value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::Number;
    use proptest::prelude::*;

    fn effects(pairs: Vec<(&str, EffectValue)>) -> BTreeMap<String, EffectValue> {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn delta_adds_to_existing() {
        let state = PlayerState::default();
        let next = apply(
            &state,
            &effects(vec![("gold", EffectValue::Delta(Number::Integer(25)))]),
        );
        assert_eq!(next.gold(), Number::Integer(25));
    }

    #[test]
    fn delta_on_missing_field_starts_at_zero() {
        let state = PlayerState::empty();
        let next = apply(
            &state,
            &effects(vec![("karma", EffectValue::Delta(Number::Integer(-3)))]),
        );
        assert_eq!(next.number("karma"), Number::Integer(-3));
    }

    #[test]
    fn delta_on_text_field_treats_it_as_zero() {
        let mut state = PlayerState::empty();
        state.set("karma", "high");
        let next = apply(
            &state,
            &effects(vec![("karma", EffectValue::Delta(Number::Integer(2)))]),
        );
        assert_eq!(next.number("karma"), Number::Integer(2));
    }

    #[test]
    fn append_extends_inventory_in_order() {
        let mut state = PlayerState::default();
        state.set(
            "inventory",
            FieldValue::List(vec![FieldValue::Text("Torch".to_string())]),
        );
        let next = apply(
            &state,
            &effects(vec![(
                "inventory",
                EffectValue::Append(vec!["Herb".to_string(), "Rope".to_string()]),
            )]),
        );
        assert_eq!(next.inventory(), vec!["Torch", "Herb", "Rope"]);
    }

    #[test]
    fn append_replaces_wrong_shape() {
        let mut state = PlayerState::empty();
        state.set("inventory", FieldValue::Integer(4));
        let next = apply(
            &state,
            &effects(vec![("inventory", EffectValue::Append(vec!["Herb".to_string()]))]),
        );
        assert_eq!(next.inventory(), vec!["Herb"]);
    }

    #[test]
    fn set_overwrites() {
        let state = PlayerState::default();
        let next = apply(
            &state,
            &effects(vec![(
                "active_training",
                EffectValue::Set(FieldValue::Text("seal_flame".to_string())),
            )]),
        );
        assert_eq!(next.active_training(), Some("seal_flame"));

        let cleared = apply(
            &next,
            &effects(vec![("active_training", EffectValue::Set(FieldValue::Null))]),
        );
        assert!(cleared.active_training().is_none());
    }

    #[test]
    fn input_snapshot_is_untouched() {
        let state = PlayerState::default();
        let _ = apply(
            &state,
            &effects(vec![("hp", EffectValue::Delta(Number::Integer(-10)))]),
        );
        assert_eq!(state.hp(), Number::Integer(100));
    }

    fn arb_field() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            Just(FieldValue::Null),
            any::<i32>().prop_map(|n| FieldValue::Integer(n.into())),
            "[a-z]{0,8}".prop_map(FieldValue::Text),
            prop::collection::vec("[a-z]{1,6}", 0..4)
                .prop_map(|v| FieldValue::List(v.into_iter().map(FieldValue::Text).collect())),
        ]
    }

    fn arb_state() -> impl Strategy<Value = PlayerState> {
        prop::collection::btree_map("[a-z]{1,6}", arb_field(), 0..6).prop_map(|fields| {
            let mut state = PlayerState::default();
            for (k, v) in fields {
                state.set(k, v);
            }
            state
        })
    }

    proptest! {
        #[test]
        fn numeric_effect_adds(state in arb_state(), key in "[a-z]{1,6}", delta in -1000i64..1000) {
            let before = state.number(&key);
            let next = apply(&state, &effects(vec![(key.as_str(), EffectValue::Delta(Number::Integer(delta)))]));
            prop_assert_eq!(next.number(&key), before + Number::Integer(delta));
        }

        #[test]
        fn list_effect_appends(state in arb_state(), key in "[a-z]{1,6}", a in "[a-z]{1,5}", b in "[a-z]{1,5}") {
            let mut expected: Vec<FieldValue> = match state.get(&key) {
                Some(FieldValue::List(items)) => items.clone(),
                _ => Vec::new(),
            };
            expected.push(FieldValue::Text(a.clone()));
            expected.push(FieldValue::Text(b.clone()));

            let next = apply(&state, &effects(vec![(key.as_str(), EffectValue::Append(vec![a, b]))]));
            prop_assert_eq!(next.get(&key), Some(&FieldValue::List(expected)));
        }

        #[test]
        fn set_is_idempotent(state in arb_state(), key in "[a-z]{1,6}", value in arb_field()) {
            let set = effects(vec![(key.as_str(), EffectValue::Set(value))]);
            let once = apply(&state, &set);
            let twice = apply(&once, &set);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn delta_is_not_idempotent(state in arb_state(), key in "[a-z]{1,6}", delta in 1i64..1000) {
            let add = effects(vec![(key.as_str(), EffectValue::Delta(Number::Integer(delta)))]);
            let once = apply(&state, &add);
            let twice = apply(&once, &add);
            prop_assert_ne!(once, twice);
        }

        #[test]
        fn append_is_not_idempotent(state in arb_state(), key in "[a-z]{1,6}", item in "[a-z]{1,5}") {
            let add = effects(vec![(key.as_str(), EffectValue::Append(vec![item]))]);
            let once = apply(&state, &add);
            let twice = apply(&once, &add);
            prop_assert_ne!(once, twice);
        }
    }
}
