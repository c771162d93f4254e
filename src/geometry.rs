//! Visual and collision geometry attached to links.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::material::Material;
use crate::mesh::MeshData;

/// Shape of a single visual or collision element.
///
/// Primitive shapes carry their URDF dimensions directly; meshes carry
/// the data returned by the mesh callback together with the path it
/// was resolved from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// Axis-aligned box with full side lengths `size`.
    Box {
        /// Extent along x, y and z.
        size: Vector3<f64>,
    },
    /// Sphere centered on the attachment frame.
    Sphere {
        /// Sphere radius.
        radius: f64,
    },
    /// Cylinder aligned with the attachment frame's z axis.
    Cylinder {
        /// Cylinder radius.
        radius: f64,
        /// Full length along z.
        length: f64,
    },
    /// Triangle mesh loaded through the mesh callback.
    Mesh {
        /// Resolved path the mesh was loaded from.
        path: String,
        /// The loaded mesh payload.
        data: MeshData,
    },
}

/// A piece of geometry posed relative to its owning link.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attachment {
    /// Pose (and scale) relative to the link frame.
    pub frame: Frame,
    /// The shape itself.
    pub geometry: Geometry,
    /// Accumulated material; all fields unset when the element declared none.
    pub material: Material,
}
