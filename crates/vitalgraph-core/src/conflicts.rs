//! # Contraindication Detection
//!
//! Surfacing warnings for known-bad protocol pairings. Detection sits
//! behind a trait so the heuristic can be swapped without touching the
//! effect engine.

use crate::interventions::Intervention;

// =============================================================================
// DETECTOR TRAIT
// =============================================================================

/// Decides which contraindication warnings apply to a selected stack.
pub trait ConflictDetector {
    /// Triggered warning texts, deduplicated, in first-trigger order.
    fn detect(&self, selected: &[&Intervention]) -> Vec<String>;
}

// =============================================================================
// KEYWORD HEURISTIC
// =============================================================================

/// The crude keyword matcher used in production.
///
/// For each listed contraindication the scenario text is tested for the
/// substrings `cardio`, `weight_training`, and `deficit`, each counting
/// only if a selected intervention id contains the paired substring
/// (`cardio`, `weight_training`, `diet`). A warning fires when the match
/// strength reaches 2, or whenever more than one intervention is stacked
/// at all. The second clause knowingly over-triggers on multi-protocol
/// stacks with no real conflict; downstream consumers rely on seeing
/// those warnings, so the behavior is kept as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordConflictDetector;

/// Scenario keyword paired with the id substring that activates it.
const KEYWORD_PAIRS: [(&str, &str); 3] = [
    ("cardio", "cardio"),
    ("weight_training", "weight_training"),
    ("deficit", "diet"),
];

impl ConflictDetector for KeywordConflictDetector {
    fn detect(&self, selected: &[&Intervention]) -> Vec<String> {
        let mut warnings: Vec<String> = Vec::new();
        for intervention in selected {
            for contraindication in &intervention.contraindications {
                let scenario = contraindication.scenario.to_lowercase();
                let match_strength = KEYWORD_PAIRS
                    .iter()
                    .filter(|(keyword, id_fragment)| {
                        scenario.contains(keyword)
                            && selected.iter().any(|i| i.id.contains(id_fragment))
                    })
                    .count();
                if (match_strength >= 2 || selected.len() > 1)
                    && !warnings.contains(&contraindication.warning)
                {
                    warnings.push(contraindication.warning.clone());
                }
            }
        }
        warnings
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interventions::intervention_by_id;

    fn stack(ids: &[&str]) -> Vec<&'static Intervention> {
        ids.iter()
            .map(|id| intervention_by_id(id).expect("known id"))
            .collect()
    }

    #[test]
    fn single_protocol_with_weak_match_stays_quiet() {
        let selected = stack(&["weight_training_5x5"]);
        // Scenario mentions cardio/weight_training/deficit, but only the
        // weight_training keyword is activated by the selection.
        assert!(KeywordConflictDetector.detect(&selected).is_empty());
    }

    #[test]
    fn cardio_plus_lifting_triggers_the_recovery_warning() {
        let selected = stack(&["weight_training_5x5", "cardio_moderate_3x"]);
        let warnings = KeywordConflictDetector.detect(&selected);
        assert!(warnings.iter().any(|w| w.contains("hypertrophy")));
    }

    #[test]
    fn any_multi_protocol_stack_warns_even_without_real_conflict() {
        let selected = stack(&["cardio_moderate_3x", "screen_time_reduction"]);
        let warnings = KeywordConflictDetector.detect(&selected);
        // cardio's sleep-debt contraindication fires purely from the
        // stack-size clause.
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("sleep debt"));
    }

    #[test]
    fn warnings_are_deduplicated_in_trigger_order() {
        let selected = stack(&[
            "weight_training_5x5",
            "cardio_moderate_3x",
            "diet_500_deficit",
        ]);
        let warnings = KeywordConflictDetector.detect(&selected);
        let mut sorted = warnings.clone();
        sorted.dedup();
        assert_eq!(warnings, sorted);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("hypertrophy"));
    }

    #[test]
    fn empty_stack_never_warns() {
        assert!(KeywordConflictDetector.detect(&[]).is_empty());
    }
}
