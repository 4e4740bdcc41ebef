/*
 * UI Module
 *
 * This module contains functions for creating and updating the control panel
 * using nannou_egui, and for drawing the debug overlay. Parameter change
 * detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams, UpdateMode};

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiResponse {
    pub changes: ParamChanges,
    pub reseed_clicked: bool,
    pub reset_camera_clicked: bool,
}

// Update the UI and report parameter edits and button clicks
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    paused: &mut bool,
    show_debug: &mut bool,
) -> UiResponse {
    let mut response = UiResponse::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.population_size, SimulationParams::get_population_range())
                        .text("Boids"),
                );
                ui.add(egui::Slider::new(&mut params.bounds, SimulationParams::get_bounds_range()).text("Bounds"));
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.max_force, SimulationParams::get_max_force_range()).text("Max Force"));

                ui.horizontal(|ui| {
                    ui.label("Update order");
                    ui.radio_value(&mut params.update_mode, UpdateMode::Snapshot, "Snapshot");
                    ui.radio_value(&mut params.update_mode, UpdateMode::Interleaved, "Interleaved");
                });

                if ui.button("Reseed Flock").clicked() {
                    response.reseed_clicked = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.weights.align, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.weights.cohere, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.weights.separate, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.weights.attract, SimulationParams::get_weight_range()).text("Attraction Weight"));

                ui.add(egui::Slider::new(&mut params.align_radius, SimulationParams::get_radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohere_radius, SimulationParams::get_radius_range()).text("Cohesion Radius"));
                ui.add(egui::Slider::new(&mut params.separate_radius, SimulationParams::get_radius_range()).text("Separation Radius"));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Rotate: click and drag");
                ui.label("Zoom: mouse wheel or trackpad pinch");
                ui.label("Keys: Space pause, R reseed, D debug, C camera");
                if ui.button("Reset Camera").clicked() {
                    response.reset_camera_clicked = true;
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));

            ui.checkbox(show_debug, "Show Debug Info");
            ui.checkbox(paused, "Pause Simulation");
        });

    response.changes = params.detect_changes();
    response
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    boids_len: usize,
    visible_points: usize,
    camera_zoom: f32,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 7.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0),
        format!("Steps: {}", debug_info.steps),
        format!("Sim time: {:.1} s", debug_info.sim_time),
        format!("Boids: {} ({} visible)", boids_len, visible_points),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
