//! Late-race fade model.
//!
//! Starting faster than sustainable costs nothing through the first part of
//! the race; past the onset point the per-mile penalty grows with the square
//! of progress through the remainder, up to a fixed cap.

use crate::config::FadeConfig;

/// Seconds per mile by which the start pace is faster than sustainable
///
/// Positive means aggressive. This is the single source of the sign
/// convention shared by the schedule and the risk classifier.
pub fn pacing_deviation(sustainable_pace: f64, start_pace: f64) -> f64 {
    sustainable_pace - start_pace
}

impl FadeConfig {
    /// Penalty in seconds per mile at race completion `fraction` (0..=1)
    pub fn penalty(&self, deviation: f64, fraction: f64) -> f64 {
        // Also catches NaN inputs
        if !(deviation > 0.0) || !(fraction > self.onset) {
            return 0.0;
        }

        let progress = ((fraction - self.onset) / (1.0 - self.onset)).min(1.0);
        let penalty = progress * progress * self.aggression_multiplier * deviation;
        penalty.min(self.max_penalty)
    }
}

/// Fade penalty with the canonical model constants
pub fn fade_penalty(deviation: f64, fraction: f64) -> f64 {
    FadeConfig::default().penalty(deviation, fraction)
}
