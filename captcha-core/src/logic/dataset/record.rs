use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

/// Label value for human rows
pub const LABEL_HUMAN: u8 = 1;

/// Label value for bot rows
pub const LABEL_BOT: u8 = 0;

/// One labeled training row; field order matches the feature layout
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub avg_mouse_speed: f64,
    pub mouse_path_entropy: f64,
    pub click_delay: f64,
    pub task_completion_time: f64,
    pub idle_time: f64,
    pub label: u8,
}

impl DatasetRecord {
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.avg_mouse_speed,
            self.mouse_path_entropy,
            self.click_delay,
            self.task_completion_time,
            self.idle_time,
        )
    }
}
