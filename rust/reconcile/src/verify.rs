// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fail-safe verification boundary
//!
//! Geometry comes from a CAD automation layer and target corners from an IFC
//! reader. Either can fail (wrong document type, nothing selected, element
//! without a bounding box). Those faults never reach the caller: they are
//! logged and the verdict is `false`.

use std::time::Instant;

use nalgebra::{Matrix4, Point3};

use crate::bounds::AxisAlignedBox;
use crate::config::ReconcileConfig;
use crate::error::{Error, Result};
use crate::reconcile::find_matching_corner;
use crate::transform::matrix_from_rotation_translation_scale;

/// Supplies a component's local bounding box and its placement in the assembly
pub trait GeometryProvider {
    /// Bounding box in the component's own frame
    fn local_box(&self) -> Result<AxisAlignedBox>;
    /// Placement of the component's frame in the assembly frame
    fn local_to_assembly(&self) -> Result<Matrix4<f64>>;
}

/// Supplies the assembly-space corner a component is expected to own
pub trait AnnotationProvider {
    /// Name of the annotated element, reported by [`matching_targets`]
    fn target_name(&self) -> &str;
    /// Corner to compare against the component's re-bounded box
    fn target_corner(&self) -> Result<Point3<f64>>;
}

/// Kind of CAD document behind a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentKind {
    Part,
    Assembly,
    /// Drawings and anything else without a usable box
    Other,
}

/// Raw data captured from a CAD session for one component.
///
/// Parts report a tight part box; sub-assemblies report a box that includes
/// their reference planes. Arrays are kept raw so malformed captures surface
/// as faults at verification time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentSnapshot {
    pub name: String,
    pub kind: DocumentKind,
    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`, used for parts
    pub part_box: Option<Vec<f64>>,
    /// Same layout, used for assemblies
    pub assembly_box: Option<Vec<f64>>,
    /// CAD transform array, see [`matrix_from_rotation_translation_scale`]
    pub transform: Option<Vec<f64>>,
}

impl ComponentSnapshot {
    /// Empty capture; every missing array is a fault until set
    pub fn new(name: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            part_box: None,
            assembly_box: None,
            transform: None,
        }
    }

    /// Set the tight part box in CAD extent order
    pub fn with_part_box(mut self, extents: impl Into<Vec<f64>>) -> Self {
        self.part_box = Some(extents.into());
        self
    }

    /// Set the assembly box, reference planes included
    pub fn with_assembly_box(mut self, extents: impl Into<Vec<f64>>) -> Self {
        self.assembly_box = Some(extents.into());
        self
    }

    /// Set the raw CAD transform array
    pub fn with_transform(mut self, data: impl Into<Vec<f64>>) -> Self {
        self.transform = Some(data.into());
        self
    }
}

impl GeometryProvider for ComponentSnapshot {
    fn local_box(&self) -> Result<AxisAlignedBox> {
        let extents = match self.kind {
            DocumentKind::Part => self.part_box.as_deref(),
            DocumentKind::Assembly => self.assembly_box.as_deref(),
            DocumentKind::Other => return Err(Error::UnsupportedDocument(self.name.clone())),
        };
        AxisAlignedBox::from_slice(extents.ok_or(Error::MissingBoundingBox)?)
    }

    fn local_to_assembly(&self) -> Result<Matrix4<f64>> {
        let data = self.transform.as_deref().ok_or(Error::MissingTransform)?;
        matrix_from_rotation_translation_scale(data)
    }
}

/// A named IFC element and one corner of its bounding box in world space
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfcTarget {
    pub name: String,
    pub corner: Option<[f64; 3]>,
}

impl IfcTarget {
    /// Element with a readable corner
    pub fn new(name: impl Into<String>, corner: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            corner: Some(corner),
        }
    }

    /// Element whose bounding-box annotation could not be read
    pub fn without_corner(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            corner: None,
        }
    }
}

impl AnnotationProvider for IfcTarget {
    fn target_name(&self) -> &str {
        &self.name
    }

    fn target_corner(&self) -> Result<Point3<f64>> {
        self.corner
            .map(Point3::from)
            .ok_or_else(|| Error::MissingTarget(self.name.clone()))
    }
}

/// Check a component against a target corner, reporting any fault as `false`
pub fn verify_component<G, A>(geometry: &G, annotation: &A, config: &ReconcileConfig) -> bool
where
    G: GeometryProvider + ?Sized,
    A: AnnotationProvider + ?Sized,
{
    let start = Instant::now();
    let verdict = match try_verify(geometry, annotation, config) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!(error = %err, "Component verification failed, reporting no match");
            false
        }
    };
    tracing::debug!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        matched = verdict,
        "Verified component"
    );
    verdict
}

fn try_verify<G, A>(geometry: &G, annotation: &A, config: &ReconcileConfig) -> Result<bool>
where
    G: GeometryProvider + ?Sized,
    A: AnnotationProvider + ?Sized,
{
    let (local_box, transform) = resolve_geometry(geometry, config)?;
    let target = annotation.target_corner()?;
    Ok(find_matching_corner(&local_box, &transform, &target, config).is_some())
}

fn resolve_geometry<G>(
    geometry: &G,
    config: &ReconcileConfig,
) -> Result<(AxisAlignedBox, Matrix4<f64>)>
where
    G: GeometryProvider + ?Sized,
{
    config.validate()?;
    Ok((geometry.local_box()?, geometry.local_to_assembly()?))
}

/// Names of every target the component matches, in input order.
///
/// Accepts any [`AnnotationProvider`], so callers can pass their own IFC
/// element type instead of converting to [`IfcTarget`]. Geometry is read
/// once. A geometry fault yields no matches; a faulty target is skipped.
pub fn matching_targets<'a, G, A>(
    geometry: &G,
    targets: &'a [A],
    config: &ReconcileConfig,
) -> Vec<&'a str>
where
    G: GeometryProvider + ?Sized,
    A: AnnotationProvider,
{
    let (local_box, transform) = match resolve_geometry(geometry, config) {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(error = %err, "Component geometry unavailable, no targets matched");
            return Vec::new();
        }
    };

    let matched: Vec<&str> = targets
        .iter()
        .filter(|target| match target.target_corner() {
            Ok(corner) => find_matching_corner(&local_box, &transform, &corner, config).is_some(),
            Err(err) => {
                tracing::warn!(
                    target_name = target.target_name(),
                    error = %err,
                    "Skipping IFC target"
                );
                false
            }
        })
        .map(|target| target.target_name())
        .collect();

    tracing::debug!(
        candidates = targets.len(),
        matched = matched.len(),
        "Matched component against IFC targets"
    );
    matched
}
