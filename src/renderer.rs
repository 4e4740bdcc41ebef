/*
 * Renderer Module
 *
 * This module draws the flock as a point cloud. The simulation hands it
 * positions through the PointSink interface; each frame the points are
 * projected through the orbit camera, sorted back to front and drawn as small
 * discs that shrink and fade with distance. The domain cube is drawn as a
 * wireframe for orientation.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::buffer::PointSink;
use crate::ui;

/// Radius of a point, in world units.
pub const POINT_SIZE: f32 = 1.6;

/// The renderer's copy of the latest published frame.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    points: Vec<Vec3>,
    frames: u64,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of frames received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl PointSink for PointCloud {
    fn update_positions(&mut self, positions: &[f32]) {
        self.points.clear();
        self.points.extend(
            positions
                .chunks_exact(3)
                .map(|xyz| vec3(xyz[0], xyz[1], xyz[2])),
        );
        self.frames += 1;
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();

    draw_bounds(&draw, model, window_rect);

    // Project everything first so far points can be drawn before near ones
    let mut projected: Vec<_> = model
        .point_cloud
        .points()
        .iter()
        .filter_map(|&p| model.camera.project(p, window_rect))
        .collect();
    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let far = model.camera.distance + model.flock.params().bounds * 1.8;
    for p in &projected {
        let fade = (1.0 - p.depth / far).clamp(0.15, 1.0);
        draw.ellipse()
            .xy(p.screen)
            .radius((POINT_SIZE * p.scale).max(0.75))
            .color(rgba(0.85, 0.9, 1.0, fade));
    }

    if model.show_debug {
        let target = model.flock.params().attractor.target(model.debug_info.sim_time);
        if let Some(p) = model.camera.project(target, window_rect) {
            draw.ellipse()
                .xy(p.screen)
                .radius((POINT_SIZE * 3.0 * p.scale).max(2.0))
                .no_fill()
                .stroke(YELLOW)
                .stroke_weight(1.5);
        }

        ui::draw_debug_info(
            &draw,
            &model.debug_info,
            window_rect,
            model.flock.len(),
            projected.len(),
            model.camera.zoom,
        );
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw UI");
    }
}

// Draw the twelve edges of the wrap cube
fn draw_bounds(draw: &Draw, model: &Model, window_rect: Rect) {
    let b = model.flock.params().bounds;
    let corners = [
        vec3(-b, -b, -b),
        vec3(b, -b, -b),
        vec3(b, b, -b),
        vec3(-b, b, -b),
        vec3(-b, -b, b),
        vec3(b, -b, b),
        vec3(b, b, b),
        vec3(-b, b, b),
    ];
    #[rustfmt::skip]
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];

    for &(a, c) in EDGES.iter() {
        let start = model.camera.project(corners[a], window_rect);
        let end = model.camera.project(corners[c], window_rect);
        if let (Some(start), Some(end)) = (start, end) {
            draw.line()
                .start(start.screen)
                .end(end.screen)
                .weight(1.0)
                .color(rgba(0.3, 0.3, 0.3, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_cloud_unpacks_triples() {
        let mut cloud = PointCloud::new();
        cloud.update_positions(&[1.0, 2.0, 3.0, -4.0, -5.0, -6.0]);
        assert_eq!(cloud.points(), &[vec3(1.0, 2.0, 3.0), vec3(-4.0, -5.0, -6.0)]);
        assert_eq!(cloud.frames(), 1);

        cloud.update_positions(&[]);
        assert!(cloud.points().is_empty());
        assert_eq!(cloud.frames(), 2);
    }
}
