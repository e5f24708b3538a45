/*
 * Renderer Module
 *
 * This module draws the simulation with nannou: one oriented triangle per
 * boid and, when enabled, the outline of every quadtree node from the last
 * tick. Nothing is read back from the drawing surface.
 *
 * The simulation works in screen-style coordinates (origin top-left, y down)
 * while nannou's window is centered with y up, so every point goes through
 * `to_screen` on its way out.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::params::FlockParams;
use crate::quadtree::Rect as QuadRect;
use crate::vector::Vector2;

// Map a simulation position onto nannou's window coordinates
#[inline]
pub fn to_screen(position: Vector2, params: &FlockParams) -> Point2 {
    pt2(
        position.x - params.screen_width / 2.0,
        params.screen_height / 2.0 - position.y,
    )
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let params = model.simulation.params();

    let [r, g, b] = params.background;
    draw.background().color(rgb(r, g, b));

    if params.draw_quadtree {
        for rect in model.simulation.index().node_rects() {
            draw_quad(&draw, rect, params);
        }
    }

    let [r, g, b] = params.boid_color;
    let color = rgb(r, g, b);
    for boid in model.simulation.boids() {
        let points = boid.triangle(params.boid_size).map(|p| to_screen(p, params));
        draw.polygon().color(color).points(points);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

// Outline a single quadtree cell
fn draw_quad(draw: &Draw, rect: QuadRect, params: &FlockParams) {
    let center = rect.origin + Vector2::new(rect.width / 2.0, rect.height / 2.0);
    draw.rect()
        .xy(to_screen(center, params))
        .wh(vec2(rect.width, rect.height))
        .no_fill()
        .stroke_weight(1.0)
        .stroke(WHITE);
}
