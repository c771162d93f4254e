//! Mesh data and the injected mesh-loading seam.
//!
//! The parser never decodes mesh files. Every `<mesh>` visual becomes a
//! [`MeshRequest`], and the loader settles each request through a
//! user-supplied [`MeshCallback`]:
//!
//! - `Arc<dyn Fn>` keeps the loader cheap to clone and share
//! - `Fn` (not `FnMut`) with `Send + Sync` bounds allows loading for
//!   several documents from different threads
//! - `Option<MeshCallback>`: `None` settles every request as failed,
//!   with a warning

use std::fmt;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::geometry::{Attachment, Geometry};
use crate::link::LinkId;
use crate::material::Material;
use crate::robot::Robot;

/// Triangle mesh payload produced by a mesh callback.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshData {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Triangles as indexes into `vertices`.
    pub indices: Vec<[u32; 3]>,
    /// Optional per-vertex normals.
    pub normals: Option<Vec<Vector3<f64>>>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// Thread-safe callback wrapper that implements Debug.
///
/// Wraps `Arc<dyn Fn(...) + Send + Sync>` and provides a Debug impl
/// (since `dyn Fn` doesn't implement Debug).
pub struct Callback<F: ?Sized>(pub Arc<F>);

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(<fn>)")
    }
}

/// Error type mesh callbacks may return.
pub type MeshError = Box<dyn std::error::Error + Send + Sync>;

/// Mesh loading callback.
///
/// Arguments are the resolved path and the lowercased extension tail
/// (`""` when the path has none). The callback decides how to fetch and
/// decode the bytes.
pub type MeshCallback = Callback<dyn Fn(&str, &str) -> Result<MeshData, MeshError> + Send + Sync>;

/// One pending mesh visual, recorded during parsing and settled later.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshRequest {
    /// Link the mesh belongs to.
    pub link: LinkId,
    /// Resolved path to hand to the callback.
    pub path: String,
    /// Lowercased extension tail of `path`.
    pub extension: String,
    /// Visual origin pose; `scale` carries the `<mesh scale>` attribute.
    pub frame: Frame,
    /// Material accumulated from the visual's `<material>` elements.
    pub material: Material,
}

impl MeshRequest {
    /// Attaches loaded mesh data to the request's link.
    ///
    /// Returns whether the link still exists in the robot.
    pub fn attach_to(self, robot: &mut Robot, data: MeshData) -> bool {
        let Some(link) = robot.link_by_id_mut(self.link) else {
            return false;
        };
        link.attachments.push(Attachment {
            frame: self.frame,
            geometry: Geometry::Mesh {
                path: self.path,
                data,
            },
            material: self.material,
        });
        true
    }
}

/// Outcome tally of a mesh-resolution phase.
///
/// `requested` always equals `attached + failed` once resolution has
/// finished; a zero-mesh document reports all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshReport {
    /// Requests issued by the parser.
    pub requested: usize,
    /// Requests that produced an attachment.
    pub attached: usize,
    /// Requests that settled without one.
    pub failed: usize,
}

/// Lowercased extension tail of a path's final component.
///
/// `""` when the final component has no dot.
#[must_use]
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
