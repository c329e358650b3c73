//! Projection composer: ties the predictor, schedule and risk classifier
//! into one result.
//!
//! Every call is independent; nothing is cached between projections.

use serde::Serialize;

use crate::races::RaceKey;
use crate::risk::RiskAssessment;
use crate::schedule::{build_schedule, Segment};
use crate::{Config, Error, Result};

/// Inputs for a single projection
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionRequest {
    pub goal_race: RaceKey,
    pub goal_seconds: f64,
    pub recent_race: RaceKey,
    pub recent_seconds: f64,
    /// Seconds per mile added to sustainable pace; negative starts faster
    pub pacing_adjustment: f64,
}

impl ProjectionRequest {
    /// Same request with a different pacing adjustment
    pub fn with_adjustment(&self, pacing_adjustment: f64) -> Self {
        Self {
            pacing_adjustment,
            ..self.clone()
        }
    }
}

/// Full outcome of one projection
#[derive(Clone, Debug, Serialize)]
pub struct ProjectionResult {
    pub goal_race: RaceKey,
    pub recent_race: RaceKey,
    pub pacing_adjustment: f64,
    /// Seconds per mile
    pub sustainable_pace: f64,
    pub goal_pace: f64,
    pub start_pace: f64,
    /// Seconds per mile faster than sustainable (positive = aggressive)
    pub deviation: f64,
    pub segments: Vec<Segment>,
    pub projected_finish: f64,
    /// Projected finish minus goal time; positive means slower than goal
    pub time_delta: f64,
    pub risk: RiskAssessment,
}

/// Aggressive, current and conservative variants of one request
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioComparison {
    pub delta: f64,
    pub aggressive: ProjectionResult,
    pub current: ProjectionResult,
    pub conservative: ProjectionResult,
}

/// Project a race outcome
///
/// # Errors
/// Returns `Error::Domain` for non-positive times or a start pace that
/// cannot be run.
pub fn project(config: &Config, request: &ProjectionRequest) -> Result<ProjectionResult> {
    if !(request.goal_seconds.is_finite() && request.goal_seconds > 0.0) {
        return Err(Error::Domain(format!(
            "goal time must be positive, got {}",
            request.goal_seconds
        )));
    }

    let sustainable_pace = config.predictor.sustainable_pace(
        request.recent_race,
        request.recent_seconds,
        request.goal_race,
    )?;
    let goal_pace = request.goal_seconds / request.goal_race.miles();

    let schedule = build_schedule(
        &config.fade,
        request.goal_race,
        sustainable_pace,
        request.pacing_adjustment,
    )?;
    let projected_finish = schedule.total_time();

    // Risk is classified on the schedule's own deviation so the tier always
    // matches the fade actually applied.
    let risk = config.risk.classify(schedule.deviation);

    tracing::debug!(
        "Projected {} finish {:.0}s (goal {:.0}s), risk {}",
        request.goal_race,
        projected_finish,
        request.goal_seconds,
        risk.tier
    );

    Ok(ProjectionResult {
        goal_race: request.goal_race,
        recent_race: request.recent_race,
        pacing_adjustment: request.pacing_adjustment,
        sustainable_pace,
        goal_pace,
        start_pace: schedule.start_pace,
        deviation: schedule.deviation,
        segments: schedule.segments,
        projected_finish,
        time_delta: projected_finish - request.goal_seconds,
        risk,
    })
}

/// Project the request alongside variants offset by the comparison delta
///
/// The aggressive scenario starts `delta` s/mi faster, the conservative one
/// `delta` s/mi slower.
pub fn compare(config: &Config, request: &ProjectionRequest) -> Result<ScenarioComparison> {
    let delta = config.comparison.delta;
    let aggressive = project(
        config,
        &request.with_adjustment(request.pacing_adjustment - delta),
    )?;
    let current = project(config, request)?;
    let conservative = project(
        config,
        &request.with_adjustment(request.pacing_adjustment + delta),
    )?;

    Ok(ScenarioComparison {
        delta,
        aggressive,
        current,
        conservative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskTier;

    fn marathon_request(pacing_adjustment: f64) -> ProjectionRequest {
        ProjectionRequest {
            goal_race: RaceKey::Marathon,
            goal_seconds: 12_600.0, // 3:30:00
            recent_race: RaceKey::HalfMarathon,
            recent_seconds: 6_000.0, // 1:40:00
            pacing_adjustment,
        }
    }

    #[test]
    fn test_end_to_end_even_pacing() {
        crate::logging::init_test();
        let config = Config::default();
        let result = project(&config, &marathon_request(0.0)).unwrap();

        let expected_finish = 6_000.0 * 2f64.powf(1.06);
        assert!((result.sustainable_pace - expected_finish / 26.2).abs() < 1e-9);
        assert!((result.goal_pace - 12_600.0 / 26.2).abs() < 1e-9);
        assert_eq!(result.start_pace, result.sustainable_pace);
        assert_eq!(result.segments.len(), 27);
        assert!((result.projected_finish - expected_finish).abs() < 1e-6);
        assert!((result.time_delta - (expected_finish - 12_600.0)).abs() < 1e-6);
        assert_eq!(result.risk.tier, RiskTier::Conservative);
    }

    #[test]
    fn test_end_to_end_aggressive_start() {
        let config = Config::default();
        let result = project(&config, &marathon_request(-20.0)).unwrap();

        assert!((result.deviation - 20.0).abs() < 1e-9);
        assert!(matches!(
            result.risk.tier,
            RiskTier::Moderate | RiskTier::High | RiskTier::VeryHigh
        ));
        assert!(result.segments.iter().any(|s| s.fade_penalty > 0.0));
    }

    #[test]
    fn test_risk_matches_schedule_fade() {
        let config = Config::default();
        for adjustment in [-40.0, -20.0, -12.0, -3.0, 0.0, 10.0] {
            let result = project(&config, &marathon_request(adjustment)).unwrap();
            let fades = result.segments.iter().any(|s| s.fade_penalty > 0.0);
            assert_eq!(fades, result.risk.tier > RiskTier::Conservative);
            assert_eq!(result.risk, config.risk.classify(-adjustment));
        }
    }

    #[test]
    fn test_projected_finish_equals_last_elapsed() {
        let result = project(&Config::default(), &marathon_request(-15.0)).unwrap();
        let last = result.segments.last().unwrap();
        assert!((result.projected_finish - last.elapsed).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_positive_goal_time() {
        let mut request = marathon_request(0.0);
        request.goal_seconds = 0.0;
        assert!(matches!(
            project(&Config::default(), &request),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_recent_time() {
        let mut request = marathon_request(0.0);
        request.recent_seconds = 0.0;
        assert!(project(&Config::default(), &request).is_err());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let config = Config::default();
        let a = project(&config, &marathon_request(-10.0)).unwrap();
        let b = project(&config, &marathon_request(-10.0)).unwrap();
        assert_eq!(a.segments, b.segments);
        assert_eq!(a.projected_finish, b.projected_finish);
    }

    #[test]
    fn test_compare_offsets_scenarios() {
        let config = Config::default();
        let comparison = compare(&config, &marathon_request(-5.0)).unwrap();

        assert_eq!(comparison.delta, 10.0);
        assert_eq!(comparison.aggressive.pacing_adjustment, -15.0);
        assert_eq!(comparison.current.pacing_adjustment, -5.0);
        assert_eq!(comparison.conservative.pacing_adjustment, 5.0);

        assert!(comparison.aggressive.risk.tier >= comparison.current.risk.tier);
        assert!(comparison.current.risk.tier >= comparison.conservative.risk.tier);
        assert_eq!(comparison.conservative.risk.tier, RiskTier::Conservative);
    }

    #[test]
    fn test_compare_matches_independent_projections() {
        let config = Config::default();
        let request = marathon_request(0.0);
        let comparison = compare(&config, &request).unwrap();
        let direct = project(&config, &request.with_adjustment(-10.0)).unwrap();
        assert_eq!(comparison.aggressive.projected_finish, direct.projected_finish);
    }
}
