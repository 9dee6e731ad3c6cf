//! Neutral-pose baseline estimation.

use crate::signal::PoseSample;

/// Calibrated neutral hip and knee heights in image pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Baseline {
    pub hip_y: f32,
    pub knee_y: f32,
}

/// Incremental mean over a fixed number of valid samples.
///
/// Every run starts from scratch: the first sample after [`Calibrator::reset`]
/// replaces the running value outright, so nothing from an earlier run leaks
/// into the new baseline.
#[derive(Clone, Debug)]
pub struct Calibrator {
    running: Baseline,
    frames: u32,
    required: u32,
}

impl Calibrator {
    pub fn new(required: u32) -> Self {
        Self {
            running: Baseline::default(),
            frames: 0,
            required: required.max(1),
        }
    }

    pub fn reset(&mut self) {
        self.running = Baseline::default();
        self.frames = 0;
    }

    /// Fold one valid sample in. Returns the finished baseline on the sample
    /// that completes the window; later calls are ignored until `reset`.
    pub fn add_sample(&mut self, sample: &PoseSample) -> Option<Baseline> {
        if self.is_complete() {
            return None;
        }
        if self.frames == 0 {
            self.running = Baseline {
                hip_y: sample.hip_y,
                knee_y: sample.knee_y,
            };
        } else {
            let n = self.frames as f32;
            self.running.hip_y = (self.running.hip_y * n + sample.hip_y) / (n + 1.0);
            self.running.knee_y = (self.running.knee_y * n + sample.knee_y) / (n + 1.0);
        }
        self.frames += 1;
        self.is_complete().then_some(self.running)
    }

    pub fn is_complete(&self) -> bool {
        self.frames >= self.required
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn required(&self) -> u32 {
        self.required
    }

    /// Fraction of the window collected, in \[0, 1\].
    pub fn progress(&self) -> f32 {
        (self.frames as f32 / self.required as f32).min(1.0)
    }

    /// Running mean so far; meaningless before the first sample.
    pub fn running(&self) -> Baseline {
        self.running
    }
}
