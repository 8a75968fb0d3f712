//! Rule Gate
//!
//! Deterministic pre-classifier. Runs on the raw vector before any
//! model is consulted and does not care whether one is loaded.

use serde::{Deserialize, Serialize};

use super::thresholds::{HumanLikeThresholds, RuleGateThresholds};
use crate::logic::features::FeatureVector;

/// Why the gate fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleHit {
    pub reasons: Vec<String>,
}

/// Hard automation gate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleGate {
    thresholds: RuleGateThresholds,
}

impl RuleGate {
    pub fn new(thresholds: RuleGateThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns `Some` iff every comparison of the signature holds.
    pub fn evaluate(&self, vector: &FeatureVector) -> Option<RuleHit> {
        let t = &self.thresholds;

        let checks = [
            (
                vector.avg_mouse_speed() > t.min_mouse_speed,
                format!("avg_mouse_speed {} > {}", vector.avg_mouse_speed(), t.min_mouse_speed),
            ),
            (
                vector.mouse_path_entropy() < t.max_path_entropy,
                format!("mouse_path_entropy {} < {}", vector.mouse_path_entropy(), t.max_path_entropy),
            ),
            (
                vector.click_delay() < t.max_click_delay,
                format!("click_delay {} < {}", vector.click_delay(), t.max_click_delay),
            ),
            (
                vector.task_completion_time() < t.max_completion_time,
                format!("task_completion_time {} < {}", vector.task_completion_time(), t.max_completion_time),
            ),
        ];

        if checks.iter().all(|(hit, _)| *hit) {
            Some(RuleHit {
                reasons: checks.into_iter().map(|(_, reason)| reason).collect(),
            })
        } else {
            None
        }
    }

    pub fn fires(&self, vector: &FeatureVector) -> bool {
        self.evaluate(vector).is_some()
    }
}

/// Legacy heuristic: every measurement comfortably inside human range
pub fn looks_human_like(vector: &FeatureVector, t: &HumanLikeThresholds) -> bool {
    vector.avg_mouse_speed() > t.min_mouse_speed
        && vector.mouse_path_entropy() > t.min_path_entropy
        && vector.click_delay() > t.min_click_delay
        && vector.task_completion_time() > t.min_completion_time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_fires_on_automation_signature() {
        let gate = RuleGate::default();
        let hit = gate.evaluate(&FeatureVector::new(3.5, 0.02, 0.05, 0.3, 0.0)).unwrap();
        assert_eq!(hit.reasons.len(), 4);
        assert!(hit.reasons[0].starts_with("avg_mouse_speed"));
    }

    #[test]
    fn test_gate_needs_every_condition() {
        let gate = RuleGate::default();
        // one condition broken at a time
        assert!(!gate.fires(&FeatureVector::new(2.9, 0.02, 0.05, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.05, 0.05, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.02, 0.2, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.02, 0.05, 0.7, 0.0)));
    }

    #[test]
    fn test_gate_boundaries_are_strict() {
        let gate = RuleGate::default();
        assert!(!gate.fires(&FeatureVector::new(3.0, 0.02, 0.05, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.04, 0.05, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.02, 0.1, 0.3, 0.0)));
        assert!(!gate.fires(&FeatureVector::new(3.5, 0.02, 0.05, 0.6, 0.0)));
    }

    #[test]
    fn test_gate_ignores_idle_time() {
        let gate = RuleGate::default();
        assert!(gate.fires(&FeatureVector::new(3.5, 0.02, 0.05, 0.3, 9.0)));
    }

    #[test]
    fn test_custom_thresholds() {
        let gate = RuleGate::new(RuleGateThresholds {
            min_mouse_speed: 1.0,
            ..Default::default()
        });
        assert!(gate.fires(&FeatureVector::new(1.5, 0.02, 0.05, 0.3, 0.0)));
    }

    #[test]
    fn test_looks_human_like() {
        let t = HumanLikeThresholds::default();
        assert!(looks_human_like(&FeatureVector::new(0.5, 0.3, 1.0, 2.0, 1.0), &t));
        assert!(!looks_human_like(&FeatureVector::new(0.5, 0.3, 1.0, 1.2, 1.0), &t));
        assert!(!looks_human_like(&FeatureVector::new(3.5, 0.02, 0.05, 0.3, 0.0), &t));
    }
}
