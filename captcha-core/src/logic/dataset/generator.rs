//! Synthetic sample generator
//!
//! Human and bot rows are drawn from disjoint uniform ranges so the
//! offline trainer has a clean separation to learn.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::record::{DatasetRecord, LABEL_BOT, LABEL_HUMAN};

pub const DEFAULT_HUMANS: usize = 500;
pub const DEFAULT_BOTS: usize = 300;

/// Uniform sampling ranges for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRanges {
    pub avg_mouse_speed: Range<f64>,
    pub mouse_path_entropy: Range<f64>,
    pub click_delay: Range<f64>,
    pub task_completion_time: Range<f64>,
    /// `None` means the value is always 0.0
    pub idle_time: Option<Range<f64>>,
}

impl SampleRanges {
    pub fn human() -> Self {
        Self {
            avg_mouse_speed: 0.3..1.5,
            mouse_path_entropy: 0.2..0.9,
            click_delay: 0.5..3.5,
            task_completion_time: 1.5..6.0,
            idle_time: Some(0.0..2.5),
        }
    }

    pub fn bot() -> Self {
        Self {
            avg_mouse_speed: 1.8..4.0,
            mouse_path_entropy: 0.0..0.1,
            click_delay: 0.0..0.2,
            task_completion_time: 0.2..0.8,
            idle_time: None,
        }
    }
}

pub struct SyntheticGenerator {
    rng: StdRng,
    human: SampleRanges,
    bot: SampleRanges,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible output for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            human: SampleRanges::human(),
            bot: SampleRanges::bot(),
        }
    }

    pub fn human(&mut self) -> DatasetRecord {
        sample(&mut self.rng, &self.human, LABEL_HUMAN)
    }

    pub fn bot(&mut self) -> DatasetRecord {
        sample(&mut self.rng, &self.bot, LABEL_BOT)
    }

    /// `humans` human rows followed by `bots` bot rows
    pub fn generate(&mut self, humans: usize, bots: usize) -> Vec<DatasetRecord> {
        let mut records = Vec::with_capacity(humans + bots);
        records.extend((0..humans).map(|_| self.human()));
        records.extend((0..bots).map(|_| self.bot()));
        records
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn sample(rng: &mut StdRng, ranges: &SampleRanges, label: u8) -> DatasetRecord {
    DatasetRecord {
        avg_mouse_speed: uniform(rng, &ranges.avg_mouse_speed),
        mouse_path_entropy: uniform(rng, &ranges.mouse_path_entropy),
        click_delay: uniform(rng, &ranges.click_delay),
        task_completion_time: uniform(rng, &ranges.task_completion_time),
        idle_time: match &ranges.idle_time {
            Some(range) => uniform(rng, range),
            None => 0.0,
        },
        label,
    }
}

fn uniform(rng: &mut StdRng, range: &Range<f64>) -> f64 {
    round3(rng.gen_range(range.start..range.end))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
