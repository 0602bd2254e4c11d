// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Handler Reconcile
//!
//! Checks that a component selected in a CAD assembly is the same object as an
//! element of an exported IFC model by comparing bounding-box corners.
//!
//! ## Overview
//!
//! - **Bounds**: [`AxisAlignedBox`] reduction from points and corner expansion
//! - **Transforms**: [`PointTransform`] over nalgebra matrices, plus
//!   constructors for raw CAD transform arrays
//! - **Reconciliation**: [`reconcile_component`], which re-bounds all eight
//!   transformed corners and runs a per-axis tolerance test
//! - **Verification**: [`verify_component`], the fail-safe boundary that turns
//!   provider faults into a negative verdict
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_handler_reconcile::{
//!     reconcile_component, AxisAlignedBox, Matrix4, Point3, ReconcileConfig,
//! };
//!
//! let local = AxisAlignedBox::from_extents([0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
//! let target = Point3::new(10.0, 10.0, 10.0);
//! assert!(reconcile_component(&local, &Matrix4::identity(), &target, &ReconcileConfig::default()));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization for config, boxes and captured inputs

pub mod bounds;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod rounding;
pub mod transform;
pub mod verify;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3};

pub use bounds::AxisAlignedBox;
pub use config::{ReconcileConfig, DEFAULT_DECIMALS, DEFAULT_TOLERANCE};
pub use error::{Error, Result};
pub use reconcile::{
    assembly_corners, corner_matches, find_matching_corner, rebound_in_assembly,
    reconcile_component,
};
pub use rounding::{round_point, round_to, RoundingMode};
pub use transform::{
    matrix_from_column_major, matrix_from_rotation_translation_scale, transform_points,
    PointTransform,
};
pub use verify::{
    matching_targets, verify_component, AnnotationProvider, ComponentSnapshot, DocumentKind,
    GeometryProvider, IfcTarget,
};
