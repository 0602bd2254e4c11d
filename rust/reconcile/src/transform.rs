// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local-to-assembly transforms
//!
//! The reconciler only needs to map a point from a component's own frame into
//! the assembly frame, so transforms are consumed through [`PointTransform`].
//! The constructors here turn the raw double arrays that CAD automation APIs
//! hand out into `Matrix4<f64>`.

use crate::error::{Error, Result};
use nalgebra::{Affine3, Isometry3, Matrix4, Point3};

/// Maps points from a local frame into a target frame
pub trait PointTransform {
    /// Map one point, leaving the input untouched
    fn apply_point(&self, point: &Point3<f64>) -> Point3<f64>;
}

impl PointTransform for Matrix4<f64> {
    #[inline]
    fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.transform_point(point)
    }
}

impl PointTransform for Isometry3<f64> {
    #[inline]
    fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.transform_point(point)
    }
}

impl PointTransform for Affine3<f64> {
    #[inline]
    fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.transform_point(point)
    }
}

impl<T: PointTransform + ?Sized> PointTransform for &T {
    #[inline]
    fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        (**self).apply_point(point)
    }
}

/// Apply a transform to every point, preserving order
pub fn transform_points<T>(transform: &T, points: &[Point3<f64>]) -> Vec<Point3<f64>>
where
    T: PointTransform + ?Sized,
{
    points.iter().map(|p| transform.apply_point(p)).collect()
}

/// Build a matrix from the CAD transform array layout
///
/// Layout (13 values, optionally padded to 16):
/// - 0..9: 3x3 rotation, row-vector convention (`p' = p · R`)
/// - 9..12: translation
/// - 12: uniform scale
/// - 13..16: unused
///
/// The resulting matrix computes `p' = scale · (p · R) + t` for column vectors.
pub fn matrix_from_rotation_translation_scale(data: &[f64]) -> Result<Matrix4<f64>> {
    if data.len() < 13 || data.len() > 16 {
        return Err(Error::InvalidTransform(format!(
            "expected 13 to 16 values, got {}",
            data.len()
        )));
    }

    let r = &data[0..9];
    let (tx, ty, tz) = (data[9], data[10], data[11]);
    let s = data[12];

    // Row i of the column-vector matrix is column i of R
    Ok(Matrix4::new(
        s * r[0], s * r[3], s * r[6], tx,
        s * r[1], s * r[4], s * r[7], ty,
        s * r[2], s * r[5], s * r[8], tz,
        0.0, 0.0, 0.0, 1.0,
    ))
}

/// Build a matrix from 16 values in column-major order
pub fn matrix_from_column_major(data: &[f64]) -> Result<Matrix4<f64>> {
    if data.len() != 16 {
        return Err(Error::InvalidTransform(format!(
            "expected 16 column-major values, got {}",
            data.len()
        )));
    }
    Ok(Matrix4::from_column_slice(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Translation3, Vector3};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_transform_points_preserves_order() {
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)];
        let moved = transform_points(&matrix, &points);

        assert_eq!(moved, vec![Point3::new(1.0, 2.0, 3.0), Point3::new(11.0, 2.0, 3.0)]);
        // Input untouched
        assert_eq!(points[1], Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_isometry_and_matrix_agree() {
        let iso = Isometry3::new(Vector3::new(5.0, -1.0, 2.0), Vector3::z() * FRAC_PI_2);
        let matrix = iso.to_homogeneous();
        let p = Point3::new(1.0, 2.0, 3.0);

        let a = iso.apply_point(&p);
        let b = matrix.apply_point(&p);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
        // (1,2,3) rotated 90° about Z is (-2,1,3), then translated
        assert_relative_eq!(a.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(a.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(a.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_forwards() {
        let matrix = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 1.0));
        let by_ref: &dyn PointTransform = &matrix;
        assert_eq!(by_ref.apply_point(&Point3::origin()), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_cad_layout_identity() {
        let data = [
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, // rotation
            0.0, 0.0, 0.0, // translation
            1.0, // scale
            0.0, 0.0, 0.0, // unused
        ];
        let matrix = matrix_from_rotation_translation_scale(&data).unwrap();
        assert_eq!(matrix, Matrix4::identity());
    }

    #[test]
    fn test_cad_layout_row_vector_rotation() {
        // Row-vector R for +90° about Z: x axis maps to y
        let data = [
            0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0, // rotation
            10.0, 20.0, 30.0, // translation
            2.0, // scale
        ];
        let matrix = matrix_from_rotation_translation_scale(&data).unwrap();
        let p = matrix.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_eq!(p, Point3::new(10.0, 22.0, 30.0));

        let expected = Translation3::new(10.0, 20.0, 30.0).to_homogeneous()
            * Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2).to_homogeneous()
            * Matrix4::new_scaling(2.0);
        let q = Point3::new(0.5, -3.0, 4.0);
        let (a, b) = (matrix.apply_point(&q), expected.apply_point(&q));
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_cad_layout_length_checked() {
        assert!(matches!(
            matrix_from_rotation_translation_scale(&[0.0; 12]),
            Err(Error::InvalidTransform(_))
        ));
        assert!(matrix_from_rotation_translation_scale(&[0.0; 17]).is_err());
    }

    #[test]
    fn test_column_major() {
        let expected = Matrix4::new_translation(&Vector3::new(7.0, 8.0, 9.0));
        let matrix = matrix_from_column_major(expected.as_slice()).unwrap();
        assert_eq!(matrix, expected);
        assert!(matrix_from_column_major(&[1.0; 15]).is_err());
    }
}
