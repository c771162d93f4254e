//! High-level loading facade.
//!
//! [`UrdfLoader`] bundles the knobs that influence parsing (package
//! resolution, visual versus collision geometry, name strictness) with
//! an optional mesh loading callback. Parsing and mesh resolution are
//! separate phases: `parse_str` returns the wired tree plus a list of
//! pending mesh requests, and `resolve_meshes` runs the callback over
//! that list. `load_str` and `load_file` chain the two.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::mesh::{Callback, MeshCallback, MeshData, MeshError, MeshReport};
use crate::package::PackageContext;
use crate::parser::{self, ParsedRobot};
use crate::robot::Robot;

/// Which link child element supplies geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkSource {
    /// Read geometry from each link's `<visual>` elements.
    #[default]
    Visual,
    /// Read geometry from each link's `<collision>` elements.
    Collision,
}

impl LinkSource {
    /// The link child element this source reads.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Collision => "collision",
        }
    }
}

/// A robot with mesh resolution settled.
#[derive(Debug, Clone)]
pub struct LoadedRobot {
    /// The kinematic tree, world transforms up to date.
    pub robot: Robot,
    /// Accounting for every mesh request the document produced.
    pub meshes: MeshReport,
}

/// Configurable URDF loader.
///
/// ```
/// use urdf_scene::UrdfLoader;
///
/// let loader = UrdfLoader::new().with_packages("/opt/ros/share");
/// let loaded = loader.load_str(r#"
///     <robot name="minimal">
///         <link name="base"/>
///     </robot>
/// "#)?;
/// assert_eq!(loaded.robot.name, "minimal");
/// # Ok::<(), urdf_scene::UrdfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrdfLoader {
    /// How `package://` URIs map to directories.
    pub packages: PackageContext,
    /// Prefix for plain relative mesh and texture paths. Applied by
    /// string concatenation, so include a trailing separator. Filled
    /// from the document's parent directory by [`UrdfLoader::load_file`]
    /// when left empty.
    pub working_path: String,
    /// Whether links contribute their visual or collision geometry.
    pub link_source: LinkSource,
    /// Fail on repeated link or joint names instead of overwriting.
    pub strict_names: bool,
    mesh_callback: Option<MeshCallback>,
}

impl UrdfLoader {
    /// Create a loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package resolution context.
    #[must_use]
    pub fn with_packages(mut self, packages: impl Into<PackageContext>) -> Self {
        self.packages = packages.into();
        self
    }

    /// Set the prefix for plain relative paths.
    #[must_use]
    pub fn with_working_path(mut self, path: impl Into<String>) -> Self {
        self.working_path = path.into();
        self
    }

    /// Choose visual or collision geometry.
    #[must_use]
    pub fn with_link_source(mut self, source: LinkSource) -> Self {
        self.link_source = source;
        self
    }

    /// Turn repeated link or joint names into hard errors.
    #[must_use]
    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }

    /// Install a mesh loading callback.
    ///
    /// The callback receives the resolved path and the lowercased file
    /// extension and returns the mesh data, or an error to count the
    /// request as failed without aborting the load.
    #[must_use]
    pub fn with_mesh_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&str, &str) -> std::result::Result<MeshData, MeshError> + Send + Sync + 'static,
    {
        self.mesh_callback = Some(Callback(Arc::new(loader)));
        self
    }

    /// Parse a URDF document into a tree and pending mesh requests.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed XML, missing required elements or
    /// attributes, unknown joint types, joints referencing undefined
    /// links, and repeated names when `strict_names` is set.
    pub fn parse_str(&self, xml: &str) -> Result<ParsedRobot> {
        parser::parse_document(xml, self)
    }

    /// Run the mesh callback over every pending request.
    ///
    /// Mesh failures never abort: each request either attaches or is
    /// counted as failed, and the report always satisfies
    /// `requested == attached + failed`. Without a callback every
    /// request fails. Returns once all requests have settled, including
    /// immediately when there are none.
    pub fn resolve_meshes(&self, parsed: ParsedRobot) -> LoadedRobot {
        let ParsedRobot {
            mut robot,
            mesh_requests,
        } = parsed;
        let mut meshes = MeshReport {
            requested: mesh_requests.len(),
            ..MeshReport::default()
        };

        match &self.mesh_callback {
            Some(callback) => {
                for request in mesh_requests {
                    match (callback.0)(&request.path, &request.extension) {
                        Ok(data) => {
                            if request.attach_to(&mut robot, data) {
                                meshes.attached += 1;
                            } else {
                                meshes.failed += 1;
                            }
                        }
                        Err(e) => {
                            warn!("failed to load mesh '{}': {}", request.path, e);
                            meshes.failed += 1;
                        }
                    }
                }
            }
            None => {
                if !mesh_requests.is_empty() {
                    warn!(
                        "no mesh loader configured, dropping {} mesh request(s)",
                        mesh_requests.len()
                    );
                    meshes.failed = mesh_requests.len();
                }
            }
        }

        robot.update_world_transforms();
        LoadedRobot { robot, meshes }
    }

    /// Parse a document and resolve its meshes in one step.
    ///
    /// # Errors
    ///
    /// Fails only for parse errors; mesh problems are reported through
    /// [`LoadedRobot::meshes`].
    pub fn load_str(&self, xml: &str) -> Result<LoadedRobot> {
        let parsed = self.parse_str(xml)?;
        Ok(self.resolve_meshes(parsed))
    }

    /// Load a URDF file from disk.
    ///
    /// When no working path is configured, the file's parent directory
    /// becomes the prefix for plain relative mesh and texture paths.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or the document does not parse.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadedRobot> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)?;

        let loader = if self.working_path.is_empty() {
            let working_path = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => format!("{}/", dir.display()),
                _ => String::new(),
            };
            Self {
                working_path,
                ..self.clone()
            }
        } else {
            self.clone()
        };

        loader.load_str(&xml)
    }
}

/// Load a URDF document with default settings.
///
/// # Errors
///
/// Fails when the document does not parse; see [`UrdfLoader::load_str`].
pub fn load_urdf_str(xml: &str) -> Result<LoadedRobot> {
    UrdfLoader::new().load_str(xml)
}

/// Load a URDF file with default settings.
///
/// # Errors
///
/// Fails when the file cannot be read or does not parse; see
/// [`UrdfLoader::load_file`].
pub fn load_urdf_file(path: impl AsRef<Path>) -> Result<LoadedRobot> {
    UrdfLoader::new().load_file(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use nalgebra::Point3;
    use std::sync::Mutex;

    const MESH_ROBOT: &str = r#"
        <robot name="m">
            <link name="base">
                <visual>
                    <geometry><mesh filename="package://pkg/meshes/arm.STL"/></geometry>
                </visual>
            </link>
        </robot>
    "#;

    fn triangle() -> MeshData {
        MeshData {
            vertices: vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![[0, 1, 2]],
            normals: None,
        }
    }

    #[test]
    fn test_defaults() {
        let loader = UrdfLoader::new();
        assert_eq!(loader.packages, PackageContext::None);
        assert_eq!(loader.working_path, "");
        assert_eq!(loader.link_source, LinkSource::Visual);
        assert!(!loader.strict_names);
        assert!(loader.mesh_callback.is_none());
    }

    #[test]
    fn test_load_str_without_meshes_settles_immediately() {
        let loaded = load_urdf_str(
            r#"
            <robot name="r">
                <link name="base"/>
            </robot>
        "#,
        )
        .expect("should load");
        assert_eq!(loaded.robot.name, "r");
        assert_eq!(loaded.meshes, MeshReport::default());
    }

    #[test]
    fn test_mesh_callback_attaches_geometry() {
        let loader = UrdfLoader::new()
            .with_packages("/data")
            .with_mesh_loader(|_, _| Ok(triangle()));
        let loaded = loader.load_str(MESH_ROBOT).expect("should load");

        assert_eq!(loaded.meshes.requested, 1);
        assert_eq!(loaded.meshes.attached, 1);
        assert_eq!(loaded.meshes.failed, 0);

        let link = loaded.robot.link("base").expect("base should exist");
        assert_eq!(link.attachments.len(), 1);
        match &link.attachments[0].geometry {
            Geometry::Mesh { path, data } => {
                assert_eq!(path, "/data/pkg/meshes/arm.STL");
                assert_eq!(data.vertex_count(), 3);
                assert_eq!(data.triangle_count(), 1);
            }
            other => panic!("expected mesh geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_callback_receives_resolved_path_and_extension() {
        let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::default();
        let record = Arc::clone(&seen);
        let loader = UrdfLoader::new()
            .with_packages("/data")
            .with_mesh_loader(move |path, ext| {
                record
                    .lock()
                    .unwrap()
                    .push((path.to_owned(), ext.to_owned()));
                Ok(triangle())
            });
        loader.load_str(MESH_ROBOT).expect("should load");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("/data/pkg/meshes/arm.STL".to_owned(), "stl".to_owned())]
        );
    }

    #[test]
    fn test_mesh_failure_is_not_fatal() {
        let loader = UrdfLoader::new()
            .with_packages("/data")
            .with_mesh_loader(|_, _| Err("corrupt file".into()));
        let loaded = loader.load_str(MESH_ROBOT).expect("load should succeed");

        assert_eq!(loaded.meshes.requested, 1);
        assert_eq!(loaded.meshes.attached, 0);
        assert_eq!(loaded.meshes.failed, 1);
        assert!(loaded.robot.link("base").unwrap().attachments.is_empty());
    }

    #[test]
    fn test_missing_callback_counts_failures() {
        let loader = UrdfLoader::new().with_packages("/data");
        let loaded = loader.load_str(MESH_ROBOT).expect("load should succeed");
        assert_eq!(loaded.meshes.requested, 1);
        assert_eq!(loaded.meshes.failed, 1);
    }

    #[test]
    fn test_loaded_robot_has_world_transforms() {
        let loaded = load_urdf_str(
            r#"
            <robot name="r">
                <link name="base"/>
                <link name="tip"/>
                <joint name="j" type="fixed">
                    <origin xyz="0 0 2"/>
                    <parent link="base"/>
                    <child link="tip"/>
                </joint>
            </robot>
        "#,
        )
        .expect("should load");

        let tip = loaded.robot.link("tip").unwrap();
        assert!(!tip.frame.is_world_stale());
        approx::assert_relative_eq!(
            tip.frame.world_isometry().translation.vector.z,
            2.0,
            epsilon = 1e-10
        );
    }
}
