/*
 * Simulation Module
 *
 * This module owns the flock and runs one tick at a time:
 * 1. Snapshot every boid's position and velocity
 * 2. Build a fresh quadtree from the snapshot
 * 3. For each boid, query the tree and run its steering rule
 * 4. Integrate motion and apply the boundary policy
 *
 * The tree is complete before the first query and is never touched during
 * the update phase, so the outcome does not depend on iteration order. With
 * `parallel` enabled the update phase is spread over rayon's thread pool;
 * every boid reads the shared tree and snapshot and writes only itself.
 */

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::boid::{Boid, BoidState};
use crate::debug::TickStats;
use crate::params::{BoundaryPolicy, FlockParams};
use crate::quadtree::{Point, QuadTree, Rect};
use crate::vector::Vector2;

/// Build the quadtree for one tick. Each point carries the boid's index.
pub fn build_index(flock: &[BoidState], params: &FlockParams) -> QuadTree {
    let bounds = Rect::new(Vector2::ZERO, params.screen_width, params.screen_height);
    let mut index = QuadTree::new(bounds, params.quad_min_width);
    for (i, state) in flock.iter().enumerate() {
        index.insert_point(Point::new(state.position, Some(i)));
    }
    index
}

/// Broad-phase neighbor candidates around `position`.
pub fn query(index: &QuadTree, position: Vector2, radius: f32) -> Vec<Point> {
    index.search_area(position, radius)
}

// Steer and move a single boid, returning how many candidates it was offered
fn advance(
    me: usize,
    boid: &mut Boid,
    index: &QuadTree,
    flock: &[BoidState],
    params: &FlockParams,
) -> usize {
    let candidates = query(index, boid.position, boid.view_radius);
    boid.update_acceleration(me, &candidates, flock, params);
    boid.update();

    if params.boundary == BoundaryPolicy::Wrap {
        boid.wrap_edges(params.screen_width, params.screen_height);
    }

    candidates.len()
}

// Seeded runs are reproducible, unseeded ones differ every launch
fn spawn_rng(params: &FlockParams) -> SmallRng {
    match params.rng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

pub struct Simulation {
    params: FlockParams,
    boids: Vec<Boid>,
    // Last tree built, kept only so it can be drawn
    index: QuadTree,
    rng: SmallRng,
    tick: u64,
}

impl Simulation {
    pub fn new(params: FlockParams) -> Self {
        let mut rng = spawn_rng(&params);
        let boids = (0..params.num_boids)
            .map(|_| Boid::random(&mut rng, &params))
            .collect();

        info!(
            boids = params.num_boids,
            width = params.screen_width,
            height = params.screen_height,
            seed = ?params.rng_seed,
            "Spawned flock"
        );

        Self::from_parts(params, boids, rng)
    }

    /// Start from an explicit flock instead of a random one.
    pub fn with_boids(params: FlockParams, boids: Vec<Boid>) -> Self {
        let rng = spawn_rng(&params);
        Self::from_parts(params, boids, rng)
    }

    fn from_parts(params: FlockParams, boids: Vec<Boid>, rng: SmallRng) -> Self {
        let index = build_index(&[], &params);
        Self {
            params,
            boids,
            index,
            rng,
            tick: 0,
        }
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    /// Swap in edited parameters and push the per-boid values to every boid.
    pub fn set_params(&mut self, params: FlockParams) {
        for boid in &mut self.boids {
            boid.max_speed = params.max_speed;
            boid.view_radius = params.view_radius;
            boid.avoid_radius = params.avoid_radius;
            boid.return_accel = params.return_accel;
        }
        self.params = params;
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn index(&self) -> &QuadTree {
        &self.index
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    // Grow or shrink the flock to match num_boids
    pub fn resize(&mut self) {
        let Self { params, boids, rng, .. } = self;
        boids.resize_with(params.num_boids, || Boid::random(rng, params));
        debug!(boids = boids.len(), "Resized flock");
    }

    // Throw away the flock and spawn a new one
    pub fn reset(&mut self) {
        self.boids.clear();
        self.resize();
    }

    pub fn step(&mut self) -> TickStats {
        let flock: Vec<BoidState> = self.boids.iter().map(Boid::state).collect();
        let index = build_index(&flock, &self.params);

        let params = &self.params;
        let candidates: usize = if params.parallel {
            self.boids
                .par_iter_mut()
                .enumerate()
                .map(|(i, boid)| advance(i, boid, &index, &flock, params))
                .sum()
        } else {
            self.boids
                .iter_mut()
                .enumerate()
                .map(|(i, boid)| advance(i, boid, &index, &flock, params))
                .sum()
        };

        self.index = index;
        self.tick += 1;

        let stats = TickStats {
            tick: self.tick,
            boids: self.boids.len(),
            nodes: self.index.node_count(),
            leaves: self.index.leaf_count(),
            candidates,
        };
        debug!(
            tick = stats.tick,
            nodes = stats.nodes,
            leaves = stats.leaves,
            mean_candidates = stats.mean_candidates(),
            "Stepped flock"
        );
        stats
    }
}
