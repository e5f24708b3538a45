/*
 * Boid Module
 *
 * This module defines the Boid struct and its steering rule.
 * Each boid follows three main rules:
 * 1. Avoidance: Push away from neighbors inside the avoid radius
 * 2. Alignment: Ease towards the average velocity of neighbors
 * 3. Cohesion: Ease towards the average position of neighbors
 *
 * A tick has two stages. `update_acceleration` reads the neighbor candidates
 * returned by the quadtree together with the start-of-tick snapshot of the
 * flock, and `update` integrates the result into velocity and position.
 */

use std::f32::consts::PI;
use std::slice;

use rand::Rng;

use crate::params::{BoundaryPolicy, FlockParams};
use crate::quadtree::Point;
use crate::vector::Vector2;

// Angle between the tip and each base corner of the drawn triangle
const WING_ANGLE: f32 = 2.53;

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    pub heading: f32,
    pub max_speed: f32,
    pub view_radius: f32,
    pub avoid_radius: f32,
    pub return_accel: f32,
}

/// Read-only view of a boid taken at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidState {
    pub position: Vector2,
    pub velocity: Vector2,
}

impl Boid {
    pub fn new(position: Vector2, velocity: Vector2, heading: f32, params: &FlockParams) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::ZERO,
            heading,
            max_speed: params.max_speed,
            view_radius: params.view_radius,
            avoid_radius: params.avoid_radius,
            return_accel: params.return_accel,
        }
    }

    // Spawn somewhere on screen with a random integer velocity
    pub fn random<R: Rng>(rng: &mut R, params: &FlockParams) -> Self {
        // A negative screen size spawns everything on that axis at 0
        let x = rng.gen_range(0..=(params.screen_width as i32).max(0)) as f32;
        let y = rng.gen_range(0..=(params.screen_height as i32).max(0)) as f32;
        let vx = rng.gen_range(-20..=20) as f32;
        let vy = rng.gen_range(-20..=20) as f32;
        let heading = rng.gen_range(0..=355) as f32 * PI / 180.0;

        Self::new(Vector2::new(x, y), Vector2::new(vx, vy), heading, params)
    }

    pub fn state(&self) -> BoidState {
        BoidState {
            position: self.position,
            velocity: self.velocity,
        }
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    /// Accumulate the flocking rules into `acceleration`.
    ///
    /// `me` is this boid's index in `flock`; candidates carrying that index are
    /// skipped. Candidates come from a square broad-phase query, so each one
    /// is checked against the true view radius here. The neighbour cap applies
    /// to the boids that pass that check, never to the raw candidate list.
    pub fn update_acceleration(
        &mut self,
        me: usize,
        candidates: &[Point],
        flock: &[BoidState],
        params: &FlockParams,
    ) {
        // Narrow phase: the square query also returns corners outside the circle
        let in_view: Vec<(&BoidState, f32)> = candidates
            .iter()
            .filter_map(|point| {
                // Points without a boid behind them carry no velocity to align with
                let other = point.data.filter(|&other| other != me)?;
                let other = flock.get(other)?;
                let distance = self.position.distance(other.position);
                (distance < self.view_radius).then_some((other, distance))
            })
            .collect();

        let mut avoid = Vector2::ZERO;
        let mut align = Vector2::ZERO;
        let mut cohere = Vector2::ZERO;
        let mut neighbours = 0usize;

        for &(other, distance) in sample_ends(&in_view, params.max_neighbors) {
            if distance < self.avoid_radius {
                avoid += self.position - other.position;
            }
            align += other.velocity;
            cohere += other.position;
            neighbours += 1;
        }

        if neighbours > 0 {
            let count = neighbours as f32;
            let align = align / count;
            let cohere = cohere / count;

            self.apply_force(avoid * params.avoidance_factor);
            self.apply_force((align - self.acceleration) * params.alignment_factor);
            self.apply_force((cohere - self.position) * params.cohesion_factor);
        }

        if params.boundary == BoundaryPolicy::BounceBack {
            self.steer_inside(params.screen_width, params.screen_height);
        }
    }

    // Push back towards the screen on every axis that is out of bounds
    fn steer_inside(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.acceleration.x += self.return_accel;
        } else if self.position.x > width {
            self.acceleration.x -= self.return_accel;
        }

        if self.position.y < 0.0 {
            self.acceleration.y += self.return_accel;
        } else if self.position.y > height {
            self.acceleration.y -= self.return_accel;
        }
    }

    // Update the boid's position based on its velocity and acceleration
    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.acceleration = Vector2::ZERO;

        // Limit speed, both sides in squared units
        if self.velocity.magnitude() > self.max_speed {
            self.velocity = self.velocity.with_magnitude(self.max_speed);
        }

        self.heading = self.velocity.angle();
        self.position += self.velocity;
    }

    // Wrap the boid around the screen edges
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x > width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = width;
        }

        if self.position.y > height {
            self.position.y = 0.0;
        } else if self.position.y < 0.0 {
            self.position.y = height;
        }
    }

    /// Tip, left and right corners of the triangle drawn for this boid.
    pub fn triangle(&self, size: f32) -> [Vector2; 3] {
        let corner = |angle: f32| self.position + Vector2::new(angle.cos(), angle.sin()) * size;
        [
            corner(self.heading),
            corner(self.heading + WING_ANGLE),
            corner(self.heading - WING_ANGLE),
        ]
    }
}

/// Bound the neighbours a boid steers by: with a cap, keep the first `cap / 2`
/// and the last `cap - cap / 2` entries of a longer list.
pub fn sample_ends<T>(
    items: &[T],
    cap: Option<usize>,
) -> std::iter::Chain<slice::Iter<'_, T>, slice::Iter<'_, T>> {
    let len = items.len();
    let (head, tail_start) = match cap {
        Some(cap) if len > cap => (cap / 2, len - (cap - cap / 2)),
        _ => (len, len),
    };
    items[..head].iter().chain(items[tail_start..].iter())
}
