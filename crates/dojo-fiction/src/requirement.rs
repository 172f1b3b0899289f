//! Requirement gating for actions.

use std::collections::BTreeMap;

use dojo_core::PlayerState;

use crate::error::{ResolveError, ResolveResult};

/// Check every `stat >= threshold` pair against a pre-effect snapshot.
///
/// Missing or non-numeric stats count as 0. The first failing stat (in key
/// order) is reported.
pub fn check(state: &PlayerState, requires: &BTreeMap<String, f64>) -> ResolveResult<()> {
    for (stat, &threshold) in requires {
        let actual = state.number(stat).as_f64();
        if actual < threshold {
            return Err(ResolveError::RequirementNotMet {
                stat: stat.clone(),
                threshold,
                actual,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::FieldValue;

    fn requires(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_requirements_pass() {
        assert!(check(&PlayerState::empty(), &BTreeMap::new()).is_ok());
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut state = PlayerState::default();
        state.set("gold", FieldValue::Integer(50));
        assert!(check(&state, &requires(&[("gold", 50.0)])).is_ok());
    }

    #[test]
    fn below_threshold_fails_with_details() {
        let mut state = PlayerState::default();
        state.set("gold", FieldValue::Integer(49));
        let err = check(&state, &requires(&[("gold", 50.0)])).unwrap_err();
        match err {
            ResolveError::RequirementNotMet {
                stat,
                threshold,
                actual,
            } => {
                assert_eq!(stat, "gold");
                assert_eq!(threshold, 50.0);
                assert_eq!(actual, 49.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_stat_counts_as_zero() {
        let state = PlayerState::default();
        assert!(check(&state, &requires(&[("seal_flame_rank", 0.0)])).is_ok());
        assert!(check(&state, &requires(&[("seal_flame_rank", 1.0)])).is_err());
    }

    #[test]
    fn all_requirements_must_hold() {
        let state = PlayerState::default();
        let err = check(&state, &requires(&[("hp", 10.0), ("xp", 5.0)])).unwrap_err();
        assert!(matches!(err, ResolveError::RequirementNotMet { ref stat, .. } if stat == "xp"));
    }
}
