/*
 * Camera Module
 *
 * This module defines an orbit Camera that looks at the origin of the
 * simulation volume. It projects world-space points onto the window with a
 * perspective divide, and handles zooming, drag-to-rotate and a slow idle spin.
 */

use nannou::prelude::*;

// Closest distance in front of the camera a point may be and still be drawn
const NEAR_PLANE: f32 = 1.0;

/// A point projected onto the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Distance along the view direction; larger is further away.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Idle rotation speed in radians per second.
    pub spin: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
    field_of_view: f32,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.6,
            pitch: -0.35,
            distance,
            zoom: 1.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            spin: 0.05,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
            field_of_view: 60.0_f32.to_radians(),
        }
    }

    // Rotate a world point into camera space (camera looks down +z)
    fn to_view(&self, point: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x = point.x * cos_yaw - point.z * sin_yaw;
        let z = point.x * sin_yaw + point.z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y = point.y * cos_pitch - z * sin_pitch;
        let z = point.y * sin_pitch + z * cos_pitch;

        vec3(x, y, z + self.distance)
    }

    /// Projects a world point to screen space, or `None` if it is behind the
    /// near plane.
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Option<Projected> {
        let view = self.to_view(point);
        if view.z < NEAR_PLANE {
            return None;
        }

        let focal = window_rect.h() * 0.5 * self.zoom / (self.field_of_view * 0.5).tan();
        let scale = focal / view.z;
        Some(Projected {
            screen: window_rect.xy() + vec2(view.x, view.y) * scale,
            depth: view.z,
            scale,
        })
    }

    // Idle spin while nobody is dragging
    pub fn advance(&mut self, dt: f32) {
        if !self.is_dragging {
            self.yaw = (self.yaw + self.spin * dt) % std::f32::consts::TAU;
        }
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
    }

    // Start rotating the camera
    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.yaw -= delta.x * 0.005;
                self.pitch = (self.pitch + delta.y * 0.005).clamp(-1.5, 1.5);
                self.last_cursor_pos = position;
            }
        }
    }

    // End dragging
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn reset(&mut self) {
        let distance = self.distance;
        *self = Self::new(distance);
    }
}
