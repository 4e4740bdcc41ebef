/*
 * Application Module
 *
 * This module defines the viewer's model and its update loop. It is the
 * rendering collaborator of the flock: one flock step per display tick, then
 * the fresh positions are published into the renderer's point cloud.
 *
 * The simulation clock only advances while the simulation is running, so the
 * attractor does not jump ahead after a pause.
 */

use std::sync::OnceLock;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::clock::{Clock, ManualClock};
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer::{self, PointCloud};
use crate::ui;

// Parameters handed over from main before the event loop starts
static LAUNCH_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub flock: Flock,
    /// Parameters as edited in the UI; the flock keeps its own copy.
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub clock: ManualClock,
    pub point_cloud: PointCloud,
    pub mouse_position: Vec2,
    pub show_debug: bool,
    pub paused: bool,
}

/// Opens the viewer window and runs the flock until the window closes.
pub fn launch(params: SimulationParams) {
    if LAUNCH_PARAMS.set(params).is_err() {
        warn!("viewer already launched, ignoring new parameters");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = LAUNCH_PARAMS.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Boids 3D")
        .size(1280, 800)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    // Parameters were validated in main before the event loop started
    let flock = Flock::new(params.clone()).expect("launch parameters are valid");
    let mut point_cloud = PointCloud::new();
    flock.publish(&mut point_cloud);

    info!(boids = flock.len(), bounds = params.bounds, "viewer started");

    Model {
        camera: Camera::new(params.bounds * 3.2),
        flock,
        params,
        egui,
        debug_info: DebugInfo::default(),
        clock: ManualClock::default(),
        point_cloud,
        mouse_position: Vec2::ZERO,
        show_debug: false,
        paused: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &model.debug_info,
        &mut model.paused,
        &mut model.show_debug,
    );

    if response.reset_camera_clicked {
        model.camera.reset();
    }

    if response.reseed_clicked || response.changes.reseed {
        reseed(model);
    } else if response.changes.retune {
        retune(model);
    }

    let dt = update.since_last.as_secs_f32();
    model.camera.advance(dt);

    if !model.paused {
        let started = Instant::now();
        model.flock.tick(&model.clock);
        model.debug_info.step_time = started.elapsed();

        model.flock.publish(&mut model.point_cloud);
        model.clock.advance(dt);
    }

    model.debug_info.steps = model.flock.steps();
    model.debug_info.sim_time = model.clock.elapsed_secs();
}

// Rebuild the flock from the edited parameters
pub fn reseed(model: &mut Model) {
    match Flock::new(model.params.clone()) {
        Ok(flock) => {
            debug!(boids = flock.len(), "reseeded flock");
            model.flock = flock;
            model.flock.publish(&mut model.point_cloud);
            model.clock.reset();
        }
        Err(err) => {
            warn!(%err, "rejected parameters, keeping current flock");
            model.params = model.flock.params().clone();
        }
    }
}

// Push rule tuning into the running flock without reseeding
fn retune(model: &mut Model) {
    let params = &model.params;
    model.flock.set_weights(params.weights);
    model
        .flock
        .set_radii(params.align_radius, params.cohere_radius, params.separate_radius);
    model.flock.set_attractor(params.attractor);
}
