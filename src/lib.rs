//! URDF robot description parser and poseable kinematic scene tree.
//!
//! This crate parses [URDF](http://wiki.ros.org/urdf) (Unified Robot
//! Description Format) XML and builds a kinematic tree of links and
//! joints that can be posed by setting joint offsets. Mesh geometry is
//! never decoded here: every mesh visual is resolved to a path and
//! handed to a caller-supplied callback, so any mesh format can be
//! plugged in.
//!
//! # Features
//!
//! - Parse URDF XML from files or strings
//! - `package://` URI resolution against a base path or a package map
//! - Robot-scope material table with inline material merging
//! - Pose revolute, continuous, and prismatic joints with limit clamping
//! - Pluggable mesh loading through a callback
//! - World transform propagation over the whole tree
//!
//! # Example
//!
//! ```
//! use urdf_scene::load_urdf_str;
//!
//! let urdf = r#"
//!     <robot name="two_link">
//!         <link name="base"/>
//!         <link name="arm"/>
//!         <joint name="shoulder" type="revolute">
//!             <origin xyz="0 0 0.5"/>
//!             <parent link="base"/>
//!             <child link="arm"/>
//!             <axis xyz="0 0 1"/>
//!             <limit lower="-1.57" upper="1.57"/>
//!         </joint>
//!     </robot>
//! "#;
//!
//! let mut loaded = load_urdf_str(urdf).expect("should parse");
//! assert_eq!(loaded.robot.name, "two_link");
//!
//! // Pose the shoulder and refresh world transforms.
//! let applied = loaded.robot.set_joint_offset("shoulder", &[0.8]);
//! assert!(applied.is_some());
//! loaded.robot.update_world_transforms();
//!
//! let arm = loaded.robot.link("arm").expect("arm should exist");
//! let world = arm.frame.world_isometry();
//! assert!((world.translation.vector.z - 0.5).abs() < 1e-10);
//! ```
//!
//! # Supported URDF Elements
//!
//! ## Links
//!
//! - `<link name="...">` - Tree node definition
//! - `<visual>` - Geometry, origin, and material (default source)
//! - `<collision>` - Used instead of `<visual>` when selected
//! - `<inertial>` - Ignored
//!
//! ## Joints
//!
//! - `<joint name="..." type="...">` - Tree edge definition
//! - Supported types: `fixed`, `revolute`, `continuous`, `prismatic`,
//!   `floating`, `planar`
//! - `<parent>`, `<child>` - Connected links (must resolve)
//! - `<origin>` - Joint frame relative to parent
//! - `<axis>` - Required for revolute/continuous/prismatic
//! - `<limit>` - Position limits, default zero
//!
//! ## Geometry
//!
//! - `<box size="x y z"/>`, `<sphere radius="r"/>`,
//!   `<cylinder radius="r" length="l"/>` - Attached immediately
//! - `<mesh filename="..." scale="..."/>` - Resolved to a path and
//!   loaded through the mesh callback
//!
//! # Limitations
//!
//! - Mass, inertia, dynamics, and mimic data are ignored
//! - Planar and floating joints parse but cannot be posed
//! - Kinematic loops are not rejected; the last joint claiming a child
//!   link wins
//! - `<gazebo>` and other vendor extensions are skipped

#![doc(html_root_url = "https://docs.rs/urdf-scene/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::unnested_or_patterns,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_wraps,
    clippy::redundant_closure_for_method_calls,
    clippy::should_implement_trait,
    clippy::items_after_statements,
    clippy::unnecessary_lazy_evaluations,
    clippy::needless_pass_by_value,
    clippy::map_unwrap_or,
    clippy::option_if_let_else,
    clippy::unused_self,
    clippy::redundant_pattern_matching
)]

mod error;
mod frame;
mod geometry;
mod joint;
mod link;
mod loader;
mod material;
mod mesh;
mod package;
mod parser;
mod robot;

// Re-export main types
pub use error::{Result, UrdfError};
pub use frame::{Frame, quaternion_from_rpy};
pub use geometry::{Attachment, Geometry};
pub use joint::{Joint, JointLimit, JointType, JointValue};
pub use link::{JointId, Link, LinkId};
pub use loader::{LinkSource, LoadedRobot, UrdfLoader, load_urdf_file, load_urdf_str};
pub use material::{Material, MaterialLibrary};
pub use mesh::{Callback, MeshCallback, MeshData, MeshError, MeshReport, MeshRequest, extension_of};
pub use package::{PackageContext, resolve_mesh_path};
pub use parser::ParsedRobot;
pub use robot::Robot;
