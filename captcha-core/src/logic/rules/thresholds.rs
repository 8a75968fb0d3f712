//! Rule Gate Thresholds
//!
//! Constants and config only - the predicate lives in `gate.rs`.

use serde::{Deserialize, Serialize};

// ============================================================================
// HARD GATE (automation signature)
// ============================================================================

/// Gate fires only above this pointer speed
pub const BOT_MIN_MOUSE_SPEED: f64 = 3.0;

/// Gate fires only below this path entropy
pub const BOT_MAX_PATH_ENTROPY: f64 = 0.04;

/// Gate fires only below this click delay (seconds)
pub const BOT_MAX_CLICK_DELAY: f64 = 0.1;

/// Gate fires only below this completion time (seconds)
pub const BOT_MAX_COMPLETION_TIME: f64 = 0.6;

// ============================================================================
// LEGACY HUMAN-LIKE HEURISTIC (assisted policy only)
// ============================================================================

pub const HUMAN_MIN_MOUSE_SPEED: f64 = 0.25;
pub const HUMAN_MIN_PATH_ENTROPY: f64 = 0.15;
pub const HUMAN_MIN_CLICK_DELAY: f64 = 0.4;
pub const HUMAN_MIN_COMPLETION_TIME: f64 = 1.2;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Automation signature: all four comparisons must hold (strict inequalities)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleGateThresholds {
    /// speed > this
    pub min_mouse_speed: f64,
    /// entropy < this
    pub max_path_entropy: f64,
    /// click delay < this
    pub max_click_delay: f64,
    /// completion time < this
    pub max_completion_time: f64,
}

impl Default for RuleGateThresholds {
    fn default() -> Self {
        Self {
            min_mouse_speed: BOT_MIN_MOUSE_SPEED,
            max_path_entropy: BOT_MAX_PATH_ENTROPY,
            max_click_delay: BOT_MAX_CLICK_DELAY,
            max_completion_time: BOT_MAX_COMPLETION_TIME,
        }
    }
}

/// Lower bounds of the legacy "looks human" heuristic (strict inequalities)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanLikeThresholds {
    pub min_mouse_speed: f64,
    pub min_path_entropy: f64,
    pub min_click_delay: f64,
    pub min_completion_time: f64,
}

impl Default for HumanLikeThresholds {
    fn default() -> Self {
        Self {
            min_mouse_speed: HUMAN_MIN_MOUSE_SPEED,
            min_path_entropy: HUMAN_MIN_PATH_ENTROPY,
            min_click_delay: HUMAN_MIN_CLICK_DELAY,
            min_completion_time: HUMAN_MIN_COMPLETION_TIME,
        }
    }
}
