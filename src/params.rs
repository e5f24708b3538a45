/*
 * Simulation Parameters Module
 *
 * This module defines the FlockParams struct that holds every tunable value of
 * the simulation: world size, flock size, per-boid radii and speed, rule
 * factors and quadtree resolution. The struct is built once (defaults or a
 * JSON file) and handed to the simulation, which threads it into the index
 * and every boid. The UI edits a copy and ParamTracker tells the app when the
 * flock has to be respawned.
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// What happens when a boid leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Accelerate back towards the screen by `return_accel` per violated axis.
    BounceBack,
    /// Re-enter from the opposite edge.
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub screen_width: f32,
    pub screen_height: f32,
    pub num_boids: usize,
    pub boid_size: f32,
    pub view_radius: f32,
    pub avoid_radius: f32,
    // Compared against squared speed
    pub max_speed: f32,
    pub return_accel: f32,
    pub avoidance_factor: f32,
    pub alignment_factor: f32,
    pub cohesion_factor: f32,
    pub quad_min_width: f32,
    // Cap on neighbours in view per boid, half from each end of the list
    pub max_neighbors: Option<usize>,
    pub boundary: BoundaryPolicy,
    pub draw_quadtree: bool,
    pub parallel: bool,
    pub pause_simulation: bool,
    pub rng_seed: Option<u64>,
    pub boid_color: [u8; 3],
    pub background: [u8; 3],
}

// Remembers the values seen on the previous UI frame
#[derive(Debug, Default)]
pub struct ParamTracker {
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    num_boids: usize,
    view_radius: f32,
    avoid_radius: f32,
    max_speed: f32,
    return_accel: f32,
    avoidance_factor: f32,
    alignment_factor: f32,
    cohesion_factor: f32,
    quad_min_width: f32,
    boundary: BoundaryPolicy,
    draw_quadtree: bool,
    parallel: bool,
    pause_simulation: bool,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            num_boids: 150,
            boid_size: 10.0,
            view_radius: 100.0,
            avoid_radius: 22.0,
            max_speed: 20.0,
            return_accel: 0.15,
            avoidance_factor: 0.05,
            alignment_factor: 0.05,
            cohesion_factor: 0.0005,
            quad_min_width: 20.0,
            max_neighbors: Some(12),
            boundary: BoundaryPolicy::BounceBack,
            draw_quadtree: false,
            parallel: false,
            pause_simulation: false,
            rng_seed: None,
            boid_color: [220, 220, 220],
            background: [20, 20, 30],
        }
    }
}

impl FlockParams {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), boids = params.num_boids, "Loaded flock parameters");
        Ok(params)
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=5000
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=100.0
    }

    pub fn get_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.2
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=300.0
    }

    pub fn get_min_width_range() -> std::ops::RangeInclusive<f32> {
        2.0..=200.0
    }
}

impl ParamSnapshot {
    fn of(params: &FlockParams) -> Self {
        Self {
            num_boids: params.num_boids,
            view_radius: params.view_radius,
            avoid_radius: params.avoid_radius,
            max_speed: params.max_speed,
            return_accel: params.return_accel,
            avoidance_factor: params.avoidance_factor,
            alignment_factor: params.alignment_factor,
            cohesion_factor: params.cohesion_factor,
            quad_min_width: params.quad_min_width,
            boundary: params.boundary,
            draw_quadtree: params.draw_quadtree,
            parallel: params.parallel,
            pause_simulation: params.pause_simulation,
        }
    }
}

impl ParamTracker {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self, params: &FlockParams) {
        self.previous_values = Some(ParamSnapshot::of(params));
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (num_boids_changed, any_changed)
    pub fn detect_changes(&self, params: &FlockParams) -> (bool, bool) {
        match &self.previous_values {
            Some(prev) => {
                let current = ParamSnapshot::of(params);
                (current.num_boids != prev.num_boids, current != *prev)
            }
            None => (false, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params = FlockParams::from_json_str(
            r#"{ "num_boids": 40, "boundary": "wrap", "max_neighbors": null }"#,
        )
        .unwrap();

        assert_eq!(params.num_boids, 40);
        assert_eq!(params.boundary, BoundaryPolicy::Wrap);
        assert_eq!(params.max_neighbors, None);
        assert_eq!(params.screen_width, 1200.0);
        assert_eq!(params.view_radius, 100.0);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(FlockParams::from_json_str(r#"{ "boundary": "teleport" }"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FlockParams::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn change_detection() {
        let mut params = FlockParams::default();
        let mut tracker = ParamTracker::default();
        assert_eq!(tracker.detect_changes(&params), (false, false));

        tracker.take_snapshot(&params);
        assert_eq!(tracker.detect_changes(&params), (false, false));

        params.cohesion_factor = 0.01;
        assert_eq!(tracker.detect_changes(&params), (false, true));

        tracker.take_snapshot(&params);
        params.num_boids += 1;
        assert_eq!(tracker.detect_changes(&params), (true, true));
    }
}
