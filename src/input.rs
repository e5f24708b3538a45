/*
 * Input Module
 *
 * Keyboard shortcuts and raw event forwarding:
 * - Escape quits
 * - Space pauses and resumes
 * - Q toggles the quadtree overlay
 * - R respawns the flock
 */

use nannou::prelude::*;
use tracing::info;

use crate::app::Model;

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Escape => {
            info!(tick = model.simulation.tick(), "Escape pressed, quitting");
            app.quit();
        }
        Key::Space => {
            model.params.pause_simulation = !model.params.pause_simulation;
            model.simulation.set_params(model.params.clone());
        }
        Key::Q => {
            model.params.draw_quadtree = !model.params.draw_quadtree;
            model.simulation.set_params(model.params.clone());
        }
        Key::R => model.simulation.reset(),
        _ => {}
    }
}

// Pass window events through to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
