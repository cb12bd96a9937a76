/// 3D transformation matrices in the row-vector convention (`point * M`)
use nalgebra::Matrix4;

/// Coordinate axis used for rotations and axis conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Column of this axis in a homogeneous vertex
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Transform builder for homogeneous 4x4 matrices
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Translation matrix with the offset in the last row, so that
    /// `point * M` adds `(dx, dy, dz)` to the point.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        let mut matrix = Matrix4::identity();
        matrix[(3, 0)] = dx;
        matrix[(3, 1)] = dy;
        matrix[(3, 2)] = dz;
        matrix
    }

    /// Translation of `amount` along a single axis
    pub fn translation_along(axis: Axis, amount: f64) -> Matrix4<f64> {
        let mut offset = [0.0; 3];
        offset[axis.index()] = amount;
        Self::translation(offset[0], offset[1], offset[2])
    }

    /// Rotation by `radians` about `axis`
    pub fn rotation(radians: f64, axis: Axis) -> Matrix4<f64> {
        let (sin, cos) = radians.sin_cos();
        let mut matrix = Matrix4::identity();
        match axis {
            Axis::X => {
                matrix[(1, 1)] = cos;
                matrix[(1, 2)] = -sin;
                matrix[(2, 1)] = sin;
                matrix[(2, 2)] = cos;
            }
            Axis::Y => {
                matrix[(0, 0)] = cos;
                matrix[(0, 2)] = sin;
                matrix[(2, 0)] = -sin;
                matrix[(2, 2)] = cos;
            }
            Axis::Z => {
                matrix[(0, 0)] = cos;
                matrix[(0, 1)] = -sin;
                matrix[(1, 0)] = sin;
                matrix[(1, 1)] = cos;
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{vertex, Edge, Model};

    fn line_model() -> Model {
        Model::new(
            vec![vertex(1.0, 2.0, 3.0), vertex(-4.0, 5.5, 600.0)],
            vec![Edge::new(0, 1)],
        )
        .unwrap()
    }

    #[test]
    fn test_translation_layout() {
        let m = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(m[(3, 0)], 1.0);
        assert_eq!(m[(3, 1)], 2.0);
        assert_eq!(m[(3, 2)], 3.0);
        assert_eq!(m[(3, 3)], 1.0);
        // The translation column of the column-vector convention stays empty
        assert_eq!(m[(0, 3)], 0.0);

        let p = vertex(10.0, 20.0, 30.0) * m;
        assert!((p - vertex(11.0, 22.0, 33.0)).norm() < 1e-12);
    }

    #[test]
    fn test_translation_round_trip() {
        let mut model = line_model();
        let before = model.clone();
        model.transform(&Transform::translation(50.0, -25.0, 7.5));
        model.transform(&Transform::translation(-50.0, 25.0, -7.5));
        for (a, b) in model.vertices().iter().zip(before.vertices()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_translation_along_axis() {
        let m = Transform::translation_along(Axis::Y, -50.0);
        assert!((m - Transform::translation(0.0, -50.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let m = Transform::rotation(0.0, axis);
            assert!((m - Matrix4::identity()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_about_z() {
        // Row vector times the block [[cos, -sin], [sin, cos]]
        let m = Transform::rotation(std::f64::consts::FRAC_PI_2, Axis::Z);
        let p = vertex(1.0, 0.0, 5.0) * m;
        assert!((p - vertex(0.0, -1.0, 5.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_about_x_and_y() {
        let half_pi = std::f64::consts::FRAC_PI_2;

        let p = vertex(7.0, 1.0, 0.0) * Transform::rotation(half_pi, Axis::X);
        assert!((p - vertex(7.0, 0.0, -1.0)).norm() < 1e-12);

        let p = vertex(1.0, 7.0, 0.0) * Transform::rotation(half_pi, Axis::Y);
        assert!((p - vertex(0.0, 7.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        let mut model = line_model();
        let before = model.clone();
        let step = 5f64.to_radians();
        model.transform(&Transform::rotation(step, Axis::Y));
        model.transform(&Transform::rotation(-step, Axis::Y));
        for (a, b) in model.vertices().iter().zip(before.vertices()) {
            assert!((a - b).norm() < 1e-9);
        }
    }
}
