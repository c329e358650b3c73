//! Mile-by-mile schedule generation.
//!
//! Walks the goal distance one mile at a time (the last segment may be a
//! fraction of a mile), holding the chosen start pace and adding the fade
//! penalty for each point in the race.

use serde::Serialize;

use crate::config::FadeConfig;
use crate::fade::pacing_deviation;
use crate::races::RaceKey;
use crate::{Error, Result};

/// One row of the schedule
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    /// 1-based ordinal
    pub index: u32,
    /// Miles covered by this segment (1.0 except possibly the last)
    pub distance: f64,
    /// Miles covered from the start through this segment
    pub distance_through: f64,
    /// Seconds per mile run in this segment, fade included
    pub pace: f64,
    pub segment_time: f64,
    /// Elapsed seconds at the end of this segment
    pub elapsed: f64,
    pub fade_penalty: f64,
}

/// Segments plus the pacing values they were generated from
#[derive(Clone, Debug, Serialize)]
pub struct Schedule {
    pub start_pace: f64,
    /// Seconds per mile faster than sustainable (positive = aggressive)
    pub deviation: f64,
    pub segments: Vec<Segment>,
}

impl Schedule {
    /// Elapsed time at the final segment
    pub fn total_time(&self) -> f64 {
        self.segments.iter().map(|s| s.segment_time).sum()
    }
}

/// Build the schedule for `goal_race`
///
/// `pacing_adjustment` is added to the sustainable pace to get the start
/// pace; negative values start faster than sustainable.
///
/// # Errors
/// Returns `Error::Domain` if the sustainable pace is not positive or the
/// adjusted start pace would be zero or negative.
pub fn build_schedule(
    fade: &FadeConfig,
    goal_race: RaceKey,
    sustainable_pace: f64,
    pacing_adjustment: f64,
) -> Result<Schedule> {
    if !(sustainable_pace.is_finite() && sustainable_pace > 0.0) {
        return Err(Error::Domain(format!(
            "sustainable pace must be positive, got {sustainable_pace}"
        )));
    }
    if !pacing_adjustment.is_finite() {
        return Err(Error::Domain("pacing adjustment must be finite".to_string()));
    }

    let start_pace = sustainable_pace + pacing_adjustment;
    if start_pace <= 0.0 {
        return Err(Error::Domain(format!(
            "adjustment of {pacing_adjustment}s/mi leaves no positive start pace"
        )));
    }

    let deviation = pacing_deviation(sustainable_pace, start_pace);
    let distance = goal_race.miles();
    let count = distance.ceil() as u32;

    let mut segments = Vec::with_capacity(count as usize);
    let mut elapsed = 0.0;

    for index in 1..=count {
        let segment_distance = if index == count {
            distance - f64::from(count - 1)
        } else {
            1.0
        };
        let distance_through = f64::from(index - 1) + segment_distance;
        let fraction = (f64::from(index) / distance).min(1.0);

        let fade_penalty = fade.penalty(deviation, fraction);
        let pace = start_pace + fade_penalty;
        let segment_time = pace * segment_distance;
        elapsed += segment_time;

        segments.push(Segment {
            index,
            distance: segment_distance,
            distance_through,
            pace,
            segment_time,
            elapsed,
            fade_penalty,
        });
    }

    tracing::debug!(
        "Built {} segments for {} at start pace {:.1}s/mi (deviation {:+.1})",
        segments.len(),
        goal_race,
        start_pace,
        deviation
    );

    Ok(Schedule {
        start_pace,
        deviation,
        segments,
    })
}

/// Segments for `goal_race` using the canonical fade model
pub fn generate_segments(
    goal_race: RaceKey,
    sustainable_pace: f64,
    pacing_adjustment: f64,
) -> Result<Vec<Segment>> {
    build_schedule(
        &FadeConfig::default(),
        goal_race,
        sustainable_pace,
        pacing_adjustment,
    )
    .map(|schedule| schedule.segments)
}
