//! Camera pose and held movement intents

use bitflags::bitflags;

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

bitflags! {
    /// Movement intents held down during a step
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Directions: u8 {
        /// Walk along the view direction
        const FORWARD = 1 << 0;
        /// Walk against the view direction
        const BACKWARD = 1 << 1;
        /// Turn left around world up
        const YAW_LEFT = 1 << 2;
        /// Turn right around world up
        const YAW_RIGHT = 1 << 3;
    }
}

/// Walking camera pose.
///
/// `forward` stays horizontal and unit length; looking up and down is the
/// separate `pitch` angle applied on top of the look-at view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal view direction
    pub forward: Vec3,
    /// World up
    pub up: Vec3,
    /// Pitch in radians, positive tilts the view down
    pub pitch: f32,
}

impl CameraState {
    /// Pose at `position` looking along the horizontal part of `forward`.
    ///
    /// A vertical or zero `forward` falls back to looking down -Z.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        let forward = Vec3::new(forward.x, 0.0, forward.z)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
        Self {
            position,
            forward,
            up: Vec3::y(),
            pitch: 0.0,
        }
    }

    /// World-to-view matrix: the look-at view tilted by pitch
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.pitch) * Mat4::look_at(self.position, self.position + self.forward, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_is_flattened() {
        let state = CameraState::new(Vec3::zeros(), Vec3::new(3.0, 5.0, 4.0));
        assert_relative_eq!(state.forward, Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);

        let straight_up = CameraState::new(Vec3::zeros(), Vec3::y());
        assert_eq!(straight_up.forward, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_view_matrix_puts_target_ahead() {
        let state = CameraState::new(Vec3::new(10.0, 1000.0, -20.0), Vec3::new(1.0, 0.0, 0.0));
        let view = state.view_matrix();
        let ahead = view.transform_point(&Point3::new(110.0, 1000.0, -20.0));
        // Right-handed view space looks down -Z
        assert_relative_eq!(ahead.coords, Vec3::new(0.0, 0.0, -100.0), epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_tilts_view() {
        let mut state = CameraState::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        state.pitch = 0.5;
        let ahead = state.view_matrix().transform_point(&Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(ahead.coords, Mat4::rotation_x(0.5).transform_vector(&-Vec3::z()), epsilon = 1e-6);
    }
}
