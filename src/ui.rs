/*
 * UI Module
 *
 * This module contains the egui control panel. It edits the app's copy of
 * FlockParams and reports what changed so the app can push the new values
 * into the simulation.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{BoundaryPolicy, FlockParams, ParamTracker};

// Update the UI and return whether boids should be reset, number of boids changed, and if any UI changes occurred
pub fn update_ui(
    egui: &mut Egui,
    params: &mut FlockParams,
    tracker: &mut ParamTracker,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_reset_boids = false;

    // Take a snapshot of current parameter values for change detection
    tracker.take_snapshot(params);

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boids", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, FlockParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    should_reset_boids = true;
                }

                ui.add(egui::Slider::new(&mut params.max_speed, FlockParams::get_max_speed_range()).text("Max Speed (squared)"));
                ui.add(egui::Slider::new(&mut params.view_radius, FlockParams::get_radius_range()).text("View Radius"));
                ui.add(egui::Slider::new(&mut params.avoid_radius, FlockParams::get_radius_range()).text("Avoid Radius"));
            });

            ui.collapsing("Flocking Rules", |ui| {
                ui.add(egui::Slider::new(&mut params.avoidance_factor, FlockParams::get_factor_range()).logarithmic(true).text("Avoidance"));
                ui.add(egui::Slider::new(&mut params.alignment_factor, FlockParams::get_factor_range()).logarithmic(true).text("Alignment"));
                ui.add(egui::Slider::new(&mut params.cohesion_factor, FlockParams::get_factor_range()).logarithmic(true).text("Cohesion"));
            });

            ui.collapsing("Screen Edges", |ui| {
                ui.radio_value(&mut params.boundary, BoundaryPolicy::BounceBack, "Bounce back");
                ui.radio_value(&mut params.boundary, BoundaryPolicy::Wrap, "Wrap around");
                ui.add(egui::Slider::new(&mut params.return_accel, 0.0..=1.0).text("Return Acceleration"));
            });

            ui.collapsing("Quadtree", |ui| {
                ui.add(egui::Slider::new(&mut params.quad_min_width, FlockParams::get_min_width_range()).text("Min Cell Width"));
                ui.checkbox(&mut params.draw_quadtree, "Draw Quadtree");
                ui.checkbox(&mut params.parallel, "Parallel Update");

                ui.separator();

                let tick = &debug_info.last_tick;
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick: {}", tick.tick));
                ui.label(format!("Nodes: {} ({} leaves)", tick.nodes, tick.leaves));
                ui.label(format!("Candidates per boid: {:.1}", tick.mean_candidates()));
            });

            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    let (num_boids_changed, ui_changed) = tracker.detect_changes(params);

    (should_reset_boids, num_boids_changed, ui_changed)
}
