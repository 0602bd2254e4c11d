// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-box reconciliation
//!
//! Decides whether a component, given by its local-frame bounding box and its
//! local-to-assembly transform, owns a known corner coordinate in assembly
//! space.
//!
//! All eight local corners go through the transform, not just the min/max
//! pair: under rotation any corner can become an extremum, and the box spanned
//! by two transformed corners is wrong. The transformed corners are then
//! re-bounded so the result is axis-aligned in the assembly frame again.

use crate::bounds::AxisAlignedBox;
use crate::config::ReconcileConfig;
use crate::rounding::round_point;
use crate::transform::PointTransform;
use nalgebra::Point3;

/// Axis-aligned box of `local_box` after moving it into the assembly frame
pub fn rebound_in_assembly<T>(local_box: &AxisAlignedBox, local_to_assembly: &T) -> AxisAlignedBox
where
    T: PointTransform + ?Sized,
{
    let corners = local_box.corners().map(|c| local_to_assembly.apply_point(&c));
    let mut bounds = AxisAlignedBox::from_point(corners[0]);
    for corner in &corners[1..] {
        bounds.expand(corner);
    }
    bounds
}

/// Corners of the re-bounded box, rounded per `config`
pub fn assembly_corners<T>(
    local_box: &AxisAlignedBox,
    local_to_assembly: &T,
    config: &ReconcileConfig,
) -> [Point3<f64>; 8]
where
    T: PointTransform + ?Sized,
{
    let corners = rebound_in_assembly(local_box, local_to_assembly).corners();
    match config.decimals {
        Some(decimals) => corners.map(|c| round_point(&c, decimals, config.rounding)),
        None => corners,
    }
}

/// Per-axis tolerance test.
///
/// Strictly less-than on every axis independently; this is a box test, not a
/// Euclidean distance.
#[inline]
pub fn corner_matches(corner: &Point3<f64>, target: &Point3<f64>, tolerance: f64) -> bool {
    (corner.x - target.x).abs() < tolerance
        && (corner.y - target.y).abs() < tolerance
        && (corner.z - target.z).abs() < tolerance
}

/// First rounded assembly corner within tolerance of `target`, if any
pub fn find_matching_corner<T>(
    local_box: &AxisAlignedBox,
    local_to_assembly: &T,
    target: &Point3<f64>,
    config: &ReconcileConfig,
) -> Option<Point3<f64>>
where
    T: PointTransform + ?Sized,
{
    assembly_corners(local_box, local_to_assembly, config)
        .into_iter()
        .enumerate()
        .find(|(index, corner)| {
            tracing::trace!(
                index,
                dx = (corner.x - target.x).abs(),
                dy = (corner.y - target.y).abs(),
                dz = (corner.z - target.z).abs(),
                "corner delta"
            );
            corner_matches(corner, target, config.tolerance)
        })
        .map(|(_, corner)| corner)
}

/// True if any corner of the re-bounded assembly box matches `target`
pub fn reconcile_component<T>(
    local_box: &AxisAlignedBox,
    local_to_assembly: &T,
    target: &Point3<f64>,
    config: &ReconcileConfig,
) -> bool
where
    T: PointTransform + ?Sized,
{
    find_matching_corner(local_box, local_to_assembly, target, config).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Rotation3, Vector3};
    use std::f64::consts::FRAC_PI_4;

    fn unit_cube() -> AxisAlignedBox {
        AxisAlignedBox::from_extents([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
    }

    #[test]
    fn test_identity_rebound_is_noop() {
        let local = AxisAlignedBox::from_extents([-2.0, 0.5, 1.0, 3.0, 4.5, 8.0]);
        let rebound = rebound_in_assembly(&local, &Matrix4::identity());
        assert_eq!(rebound, local);
    }

    #[test]
    fn test_rotation_uses_all_corners() {
        // 45° about Z: the rotated min/max pair alone would give a zero-width X
        // extent; all eight corners give the full diamond width.
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_4).to_homogeneous();
        let rebound = rebound_in_assembly(&unit_cube(), &rotation);

        let half_diag = std::f64::consts::SQRT_2 / 2.0;
        assert_relative_eq!(rebound.min_x, -half_diag, epsilon = 1e-12);
        assert_relative_eq!(rebound.max_x, half_diag, epsilon = 1e-12);
        assert_relative_eq!(rebound.min_y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rebound.max_y, 2.0 * half_diag, epsilon = 1e-12);
        assert_relative_eq!(rebound.min_z, 0.0);
        assert_relative_eq!(rebound.max_z, 1.0);

        let two_corner = AxisAlignedBox::from_points([
            rotation.apply_point(&unit_cube().min()),
            rotation.apply_point(&unit_cube().max()),
        ])
        .unwrap();
        assert!(two_corner.max_x - two_corner.min_x < 1e-12);
    }

    #[test]
    fn test_per_axis_not_euclidean() {
        // Each axis is 0.004 off: Euclidean distance ~0.0069 exceeds 0.005,
        // the per-axis test still accepts it.
        let corner = Point3::new(1.0, 1.0, 1.0);
        let target = Point3::new(1.004, 0.996, 1.004);
        assert!(corner_matches(&corner, &target, 0.005));
        assert!((corner - target).norm() > 0.005);
    }

    #[test]
    fn test_one_axis_out_rejects() {
        let corner = Point3::new(0.0, 0.0, 0.0);
        assert!(!corner_matches(&corner, &Point3::new(0.0, 0.0, 0.01), 0.005));
    }

    #[test]
    fn test_first_match_returned() {
        let config = ReconcileConfig::default().with_tolerance(2.0);
        // Everything within 2.0 of (0.5,0.5,0.5): corner order decides
        let found = find_matching_corner(
            &unit_cube(),
            &Matrix4::identity(),
            &Point3::new(0.5, 0.5, 0.5),
            &config,
        );
        assert_eq!(found, Some(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rounding_disabled_keeps_noise() {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::PI)
            .to_homogeneous();
        let config = ReconcileConfig::default().with_decimals(None);
        let corners = assembly_corners(&unit_cube(), &rotation, &config);
        // (-1,-1,0) is still a corner, up to float residue
        assert!(corners
            .iter()
            .any(|c| corner_matches(c, &Point3::new(-1.0, -1.0, 0.0), 1e-12)));
    }

    #[test]
    fn test_unvalidated_huge_decimals_still_match() {
        let config = ReconcileConfig::default().with_decimals(Some(u32::MAX));
        let corners = assembly_corners(&unit_cube(), &Matrix4::identity(), &config);
        assert_eq!(corners, unit_cube().corners());
        assert!(reconcile_component(
            &unit_cube(),
            &Matrix4::identity(),
            &Point3::new(1.0, 1.0, 1.0),
            &config
        ));
    }
}
