// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for reconciliation.
//!
//! None of these reach the caller of [`crate::verify_component`], which
//! reports every fault as a negative verdict. They exist so the boundary can
//! log what went wrong.

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while gathering or reducing reconciliation input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A bounding box was requested from zero points.
    #[error("cannot bound an empty point set")]
    EmptyPointSet,

    /// Raw box extents did not contain exactly six values.
    #[error("bounding box must have 6 extents, got {0}")]
    InvalidBoundingBox(usize),

    /// The geometry provider had no bounding box for the component.
    #[error("component has no bounding box")]
    MissingBoundingBox,

    /// The component's document is neither a part nor an assembly.
    #[error("unsupported document type for component '{0}'")]
    UnsupportedDocument(String),

    /// The geometry provider had no local-to-assembly transform.
    #[error("component has no local-to-assembly transform")]
    MissingTransform,

    /// Raw transform data could not be turned into a matrix.
    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    /// The annotation provider had no corner for the named element.
    #[error("IFC element '{0}' has no bounding-box corner")]
    MissingTarget(String),

    /// Reconciliation settings are unusable.
    #[error("invalid reconcile config: {0}")]
    InvalidConfig(String),
}
