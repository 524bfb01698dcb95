//! First-person walking controller
//!
//! Held keys turn and walk the camera once per simulation step. Walking is
//! checked against the collision map with an avatar box around the
//! candidate position; a blocked move leaves the camera where it was.
//! Dragging with the pointer turns and tilts the view without any check.

use super::state::{CameraState, Directions};
use crate::core::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::foundation::Aabb;
use crate::physics::CollisionMap;

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// The view direction changed
    pub turned: bool,
    /// At least one move was committed
    pub moved: bool,
    /// At least one move was rejected by an obstacle
    pub blocked: bool,
}

/// Drives a [`CameraState`] from held directions and pointer input
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    config: CameraConfig,
    held: Directions,
    dragging: bool,
    last_pointer: (f32, f32),
}

impl CameraController {
    /// Controller starting at the configured pose
    pub fn new(config: CameraConfig) -> Self {
        let state = CameraState::new(config.start_position, config.start_forward);
        Self {
            state,
            config,
            held: Directions::empty(),
            dragging: false,
            last_pointer: (0.0, 0.0),
        }
    }

    /// Current pose
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Controller configuration
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Directions currently held
    pub fn held(&self) -> Directions {
        self.held
    }

    /// Start holding `directions`
    pub fn press(&mut self, directions: Directions) {
        self.held.insert(directions);
    }

    /// Stop holding `directions`
    pub fn release(&mut self, directions: Directions) {
        self.held.remove(directions);
    }

    /// World-to-view matrix of the current pose
    pub fn view_matrix(&self) -> Mat4 {
        self.state.view_matrix()
    }

    /// Perspective projection for a viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.config.projection_matrix(aspect)
    }

    /// Obstacle volume the avatar would occupy standing at `position`
    pub fn avatar_box(&self, position: Vec3) -> Aabb {
        let size = Vec3::new(self.config.avatar_width, self.config.avatar_height, self.config.avatar_width);
        Aabb::from_center_size(position, size)
    }

    /// Apply one step of the held directions.
    ///
    /// Order within a step is yaw left, yaw right, forward, backward. Turns
    /// always succeed; each move is committed only if the avatar box at the
    /// candidate position is free.
    pub fn step(&mut self, obstacles: &CollisionMap) -> StepReport {
        let mut report = StepReport::default();

        if self.held.contains(Directions::YAW_LEFT) {
            self.yaw(self.config.rotate_step);
            report.turned = true;
        }
        if self.held.contains(Directions::YAW_RIGHT) {
            self.yaw(-self.config.rotate_step);
            report.turned = true;
        }
        if self.held.contains(Directions::FORWARD) {
            self.try_move(self.config.move_step, obstacles, &mut report);
        }
        if self.held.contains(Directions::BACKWARD) {
            self.try_move(-self.config.move_step, obstacles, &mut report);
        }

        report
    }

    fn yaw(&mut self, angle: f32) {
        let turned = Mat4::rotation_y(angle).transform_vector(&self.state.forward);
        if let Some(forward) = turned.try_normalize(f32::EPSILON) {
            self.state.forward = forward;
        }
    }

    fn try_move(&mut self, distance: f32, obstacles: &CollisionMap, report: &mut StepReport) {
        let Some(heading) = Vec3::new(self.state.forward.x, 0.0, self.state.forward.z).try_normalize(f32::EPSILON)
        else {
            return;
        };

        let candidate = self.state.position + heading * distance;
        if obstacles.collides(&self.avatar_box(candidate)) {
            log::trace!("Move to {:?} blocked", candidate);
            report.blocked = true;
        } else {
            log::trace!("Camera moved to {:?}", candidate);
            self.state.position = candidate;
            report.moved = true;
        }
    }

    /// Turn and tilt by a pointer delta in screen pixels (y grows downward).
    ///
    /// Moving right turns right; moving down tilts the view down. Pitch is
    /// clamped to the configured limit.
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.config.pointer_sensitivity;
        self.yaw(-dx * sensitivity);

        let limit = self.config.pitch_limit;
        self.state.pitch = utils::clamp(self.state.pitch + dy * sensitivity, -limit, limit);
    }

    /// Primary button state at a pointer position; dragging turns the view
    pub fn pointer_button(&mut self, pressed: bool, x: f32, y: f32) {
        self.dragging = pressed;
        self.last_pointer = (x, y);
    }

    /// Pointer moved to `(x, y)`; turns the view while the button is held
    pub fn pointer_motion(&mut self, x: f32, y: f32) {
        if self.dragging {
            let (last_x, last_y) = self.last_pointer;
            self.pointer_moved(x - last_x, y - last_y);
        }
        self.last_pointer = (x, y);
    }
}
