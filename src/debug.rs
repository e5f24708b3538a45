/*
 * Debug Information Module
 *
 * Frame timing from the window plus per-tick statistics from the simulation:
 * - FPS (frames per second) and frame time
 * - Quadtree size (nodes and leaves)
 * - Broad-phase candidates handed to the steering rule
 */

use std::time::Duration;

// What one call to Simulation::step produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u64,
    pub boids: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub candidates: usize,
}

impl TickStats {
    pub fn mean_candidates(&self) -> f32 {
        if self.boids == 0 {
            0.0
        } else {
            self.candidates as f32 / self.boids as f32
        }
    }
}

// Debug information to display
#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub last_tick: TickStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_candidates_handles_empty_flock() {
        assert_eq!(TickStats::default().mean_candidates(), 0.0);

        let stats = TickStats {
            boids: 4,
            candidates: 10,
            ..TickStats::default()
        };
        assert_eq!(stats.mean_candidates(), 2.5);
    }
}
