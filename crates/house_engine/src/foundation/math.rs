//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix builders the
//! placement and camera code compose. Matrices are column-major and act on
//! column vectors, so `a * b` applies `b` first.

pub use nalgebra::{Matrix4, Unit, Vector2, Vector3};

/// 2D vector type, used for texture coordinates
pub type Vec2 = Vector2<f32>;

/// 3D vector type, used for positions, normals and colors
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 3, the default vertical field of view
    pub const THIRD_PI: f32 = PI / 3.0;
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Largest of the three components
    pub fn max_component(v: &Vec3) -> f32 {
        v.x.max(v.y).max(v.z)
    }
}

/// Extension trait for Mat4 with the transform builders used across the crate
pub trait Mat4Ext {
    /// Rotation around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Rotation around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Rotation around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Rotation of `angle` radians around an arbitrary axis.
    ///
    /// The axis is normalized here; a zero-length axis yields identity.
    fn rotation_axis_angle(axis: Vec3, angle: f32) -> Mat4;

    /// Right-handed perspective projection (OpenGL clip space)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_axis_angle(axis: Vec3, angle: f32) -> Mat4 {
        match Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Mat4::from_axis_angle(&axis, angle),
            None => Mat4::identity(),
        }
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_y_quarter_turn() {
        // Rotating +X a quarter turn around +Y lands on -Z (right-handed)
        let rotated = Mat4::rotation_y(constants::HALF_PI).transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, -Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_axis_angle_matches_axis_rotation() {
        let a = Mat4::rotation_axis_angle(Vec3::new(0.0, 2.0, 0.0), 0.7);
        let b = Mat4::rotation_y(0.7);
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Mat4::rotation_axis_angle(Vec3::zeros(), 1.0), Mat4::identity());
    }

    #[test]
    fn test_clamp_and_max_component() {
        assert_eq!(utils::clamp(2.0, -1.0, 1.0), 1.0);
        assert_eq!(utils::clamp(-2.0, -1.0, 1.0), -1.0);
        assert_eq!(utils::clamp(0.5, -1.0, 1.0), 0.5);
        assert_eq!(utils::max_component(&Vec3::new(1.0, 7.0, 3.0)), 7.0);
    }
}
