/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the flock: population, domain size, per-boid limits,
 * perception radii and rule weights. Parameters can be loaded from JSON,
 * overridden from the command line and adjusted through the UI. It also
 * provides snapshot-based change detection so the viewer knows whether an
 * edit only retunes the rules or requires reseeding the flock.
 */

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::attractor::Attractor;
use crate::error::ConfigError;

/// Weights applied to the four steering contributions before they are summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub align: f32,
    pub cohere: f32,
    pub separate: f32,
    pub attract: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            align: 1.2,
            cohere: 1.0,
            separate: 1.5,
            attract: 0.8,
        }
    }
}

impl RuleWeights {
    pub fn is_finite(&self) -> bool {
        self.align.is_finite()
            && self.cohere.is_finite()
            && self.separate.is_finite()
            && self.attract.is_finite()
    }
}

/// Order in which boids read and write state during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Every boid scans the same pre-step state of the flock.
    #[default]
    Snapshot,
    /// Each boid integrates right after its own scan, so later boids see the
    /// already-moved earlier ones.
    Interleaved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParams {
    pub population_size: usize,
    /// Half-width of the cubic domain.
    pub bounds: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub align_radius: f32,
    pub cohere_radius: f32,
    pub separate_radius: f32,
    pub weights: RuleWeights,
    /// Half-width of the cube new boids are spawned in.
    pub spawn_extent: f32,
    /// Initial velocity is drawn from [-initial_speed, initial_speed] per axis.
    pub initial_speed: f32,
    pub attractor: Attractor,
    pub update_mode: UpdateMode,
    pub seed: Option<u64>,

    // Internal state for tracking changes
    #[serde(skip)]
    pub previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    population_size: usize,
    bounds: f32,
    max_speed: f32,
    max_force: f32,
    spawn_extent: f32,
    initial_speed: f32,
    update_mode: UpdateMode,
    seed: Option<u64>,
    align_radius: f32,
    cohere_radius: f32,
    separate_radius: f32,
    weights: RuleWeights,
    attractor: Attractor,
}

/// What kind of edit happened since the last snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamChanges {
    /// The flock must be rebuilt (population, limits or domain changed).
    pub reseed: bool,
    /// Only radii, weights or the attractor changed.
    pub retune: bool,
}

impl ParamChanges {
    pub fn any(&self) -> bool {
        self.reseed || self.retune
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            population_size: 300,
            bounds: 250.0,
            max_speed: 5.0,
            max_force: 0.2,
            align_radius: 60.0,
            cohere_radius: 60.0,
            separate_radius: 40.0,
            weights: RuleWeights::default(),
            spawn_extent: 200.0,
            initial_speed: 1.0,
            attractor: Attractor::default(),
            update_mode: UpdateMode::Snapshot,
            seed: None,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Parses parameters from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let params = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            population = params.population_size,
            bounds = params.bounds,
            "loaded simulation parameters"
        );
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values that would make the simulation produce NaNs or nonsense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(ConfigError::Invalid("maxSpeed must be positive"));
        }
        if !self.max_force.is_finite() || self.max_force < 0.0 {
            return Err(ConfigError::Invalid("maxForce must be non-negative"));
        }
        if !self.bounds.is_finite() || self.bounds <= 0.0 {
            return Err(ConfigError::Invalid("bounds must be positive"));
        }
        if !self.align_radius.is_finite()
            || !self.cohere_radius.is_finite()
            || !self.separate_radius.is_finite()
            || self.align_radius < 0.0
            || self.cohere_radius < 0.0
            || self.separate_radius < 0.0
        {
            return Err(ConfigError::Invalid(
                "perception radii must be finite and non-negative",
            ));
        }
        if !self.weights.is_finite() {
            return Err(ConfigError::Invalid("rule weights must be finite"));
        }
        if !self.spawn_extent.is_finite() || self.spawn_extent < 0.0 {
            return Err(ConfigError::Invalid("spawnExtent must be non-negative"));
        }
        if !self.initial_speed.is_finite() || self.initial_speed < 0.0 {
            return Err(ConfigError::Invalid("initialSpeed must be non-negative"));
        }
        if !self.attractor.is_finite() {
            return Err(ConfigError::Invalid("attractor parameters must be finite"));
        }
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; nothing has changed if there is none
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };
        let current = self.snapshot();

        let reseed = current.population_size != prev.population_size
            || current.bounds != prev.bounds
            || current.max_speed != prev.max_speed
            || current.max_force != prev.max_force
            || current.spawn_extent != prev.spawn_extent
            || current.initial_speed != prev.initial_speed
            || current.update_mode != prev.update_mode
            || current.seed != prev.seed;

        let retune = current.align_radius != prev.align_radius
            || current.cohere_radius != prev.cohere_radius
            || current.separate_radius != prev.separate_radius
            || current.weights != prev.weights
            || current.attractor != prev.attractor;

        ParamChanges { reseed, retune }
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            population_size: self.population_size,
            bounds: self.bounds,
            max_speed: self.max_speed,
            max_force: self.max_force,
            spawn_extent: self.spawn_extent,
            initial_speed: self.initial_speed,
            update_mode: self.update_mode,
            seed: self.seed,
            align_radius: self.align_radius,
            cohere_radius: self.cohere_radius,
            separate_radius: self.separate_radius,
            weights: self.weights,
            attractor: self.attractor,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_population_range() -> std::ops::RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn get_max_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }

    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.0..=150.0
    }

    pub fn get_bounds_range() -> std::ops::RangeInclusive<f32> {
        50.0..=1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.population_size, 300);
        assert_eq!(params.weights, RuleWeights::default());
    }

    #[test]
    fn rejects_non_positive_max_speed() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let params = SimulationParams {
                max_speed: bad,
                ..SimulationParams::default()
            };
            assert!(matches!(params.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn rejects_negative_radius_and_force() {
        let params = SimulationParams {
            separate_radius: -1.0,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParams {
            max_force: -0.1,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());

        let params = SimulationParams {
            bounds: 0.0,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn json_uses_camel_case_and_fills_defaults() {
        let params = SimulationParams::from_json_str(
            r#"{ "populationSize": 12, "maxSpeed": 3.5, "weights": { "separate": 2.0 } }"#,
        )
        .expect("params");
        assert_eq!(params.population_size, 12);
        assert_eq!(params.max_speed, 3.5);
        assert_eq!(params.weights.separate, 2.0);
        assert_eq!(params.weights.align, 1.2);
        assert_eq!(params.bounds, 250.0);
        assert_eq!(params.update_mode, UpdateMode::Snapshot);
    }

    #[test]
    fn json_with_negative_population_fails_to_parse() {
        let err = SimulationParams::from_json_str(r#"{ "populationSize": -5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn json_with_zero_speed_fails_validation() {
        let err = SimulationParams::from_json_str(r#"{ "maxSpeed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn json_round_trips_update_mode() {
        let params = SimulationParams {
            update_mode: UpdateMode::Interleaved,
            seed: Some(7),
            ..SimulationParams::default()
        };
        let json = params.to_json_string().expect("json");
        assert!(json.contains("\"interleaved\""));
        let parsed = SimulationParams::from_json_str(&json).expect("parsed");
        assert_eq!(parsed.update_mode, UpdateMode::Interleaved);
        assert_eq!(parsed.seed, Some(7));
    }

    #[test]
    fn change_detection_separates_reseed_from_retune() {
        let mut params = SimulationParams::default();
        assert!(!params.detect_changes().any());

        params.take_snapshot();
        params.weights.align = 2.0;
        let changes = params.detect_changes();
        assert!(changes.retune);
        assert!(!changes.reseed);

        params.take_snapshot();
        params.population_size = 10;
        let changes = params.detect_changes();
        assert!(changes.reseed);
        assert!(!changes.retune);

        params.take_snapshot();
        assert!(!params.detect_changes().any());
    }
}
