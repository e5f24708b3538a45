/*
 * Application Module
 *
 * This module defines the nannou model and per-frame update for the windowed
 * simulation. The window is sized to the simulation's screen so one world
 * unit is one pixel.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::info;

use crate::debug::DebugInfo;
use crate::input;
use crate::params::{FlockParams, ParamTracker};
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;

// nannou's model function takes no arguments, so the parameters chosen on the
// command line are handed over through here
static LAUNCH_PARAMS: OnceLock<FlockParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    // Copy edited by the UI and keyboard, pushed into the simulation on change
    pub params: FlockParams,
    pub tracker: ParamTracker,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

// Open the window and run until it is closed
pub fn run(params: FlockParams) {
    if LAUNCH_PARAMS.set(params).is_err() {
        tracing::warn!("Launch parameters already set, keeping the first ones");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = LAUNCH_PARAMS.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Boids")
        .size(params.screen_width as u32, params.screen_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during setup");
    let egui = Egui::from_window(&window);

    info!(
        width = params.screen_width,
        height = params.screen_height,
        "Opened simulation window"
    );

    Model {
        simulation: Simulation::new(params.clone()),
        params,
        tracker: ParamTracker::default(),
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (should_reset_boids, num_boids_changed, ui_changed) = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.tracker,
        &model.debug_info,
    );

    if ui_changed {
        model.simulation.set_params(model.params.clone());
    }

    if should_reset_boids {
        model.simulation.reset();
    } else if num_boids_changed {
        model.simulation.resize();
    }

    if !model.simulation.params().pause_simulation {
        model.debug_info.last_tick = model.simulation.step();
    }
}
