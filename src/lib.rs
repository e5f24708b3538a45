/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The flocking core (vector math, quadtree, boid steering, simulation driver)
 * has no graphics dependency. The nannou window, renderer and egui controls
 * are behind the `gui` feature.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidState};
pub use debug::{DebugInfo, TickStats};
pub use error::ConfigError;
pub use params::{BoundaryPolicy, FlockParams, ParamTracker};
pub use quadtree::{Point, QuadNode, QuadTree, Quadrant, Rect};
pub use simulation::{build_index, query, Simulation};
pub use vector::Vector2;

// Define modules
pub mod boid;
pub mod debug;
pub mod error;
pub mod params;
pub mod quadtree;
pub mod simulation;
pub mod vector;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod input;
#[cfg(feature = "gui")]
pub mod renderer;
#[cfg(feature = "gui")]
pub mod ui;
