//! Local pose of a scene node and its cached world transform.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Converts a URDF `rpy` triple into a rotation.
///
/// URDF specifies fixed-axis roll/pitch/yaw, which composes as
/// `Rz(yaw) * Ry(pitch) * Rx(roll)`. That is exactly nalgebra's
/// Euler-angle convention.
#[must_use]
pub fn quaternion_from_rpy(rpy: Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(rpy.x, rpy.y, rpy.z)
}

/// Pose of a node relative to its parent, plus a cached world-space
/// transform maintained by [`Robot::update_world_transforms`].
///
/// `scale` is carried for mesh attachments only; it does not
/// participate in kinematics.
///
/// [`Robot::update_world_transforms`]: crate::Robot::update_world_transforms
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Translation relative to the parent node.
    pub position: Vector3<f64>,
    /// Rotation relative to the parent node.
    pub rotation: UnitQuaternion<f64>,
    /// Non-uniform scale, applied to attached geometry only.
    pub scale: Vector3<f64>,
    world: Isometry3<f64>,
    world_stale: bool,
}

impl Frame {
    /// Identity pose with unit scale.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
            world: Isometry3::identity(),
            world_stale: true,
        }
    }

    /// Builds a frame from a URDF `<origin xyz=".." rpy="..">` pair.
    #[must_use]
    pub fn from_origin(xyz: Vector3<f64>, rpy: Vector3<f64>) -> Self {
        Self {
            position: xyz,
            rotation: quaternion_from_rpy(rpy),
            ..Self::identity()
        }
    }

    /// The parent-relative transform as an isometry (scale excluded).
    #[must_use]
    pub fn local_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// Replaces the rotation with one built from a roll/pitch/yaw triple.
    pub fn set_rpy(&mut self, rpy: Vector3<f64>) {
        self.rotation = quaternion_from_rpy(rpy);
        self.world_stale = true;
    }

    /// The rotation expressed as roll/pitch/yaw.
    #[must_use]
    pub fn rpy(&self) -> Vector3<f64> {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        Vector3::new(roll, pitch, yaw)
    }

    /// Last world transform computed for this node.
    ///
    /// Stale until the owning [`Robot`](crate::Robot) has run
    /// `update_world_transforms` after the most recent pose change.
    #[must_use]
    pub fn world_isometry(&self) -> Isometry3<f64> {
        self.world
    }

    /// Whether the cached world transform predates the latest pose change.
    #[must_use]
    pub fn is_world_stale(&self) -> bool {
        self.world_stale
    }

    /// Flags the cached world transform as out of date.
    pub fn mark_world_stale(&mut self) {
        self.world_stale = true;
    }

    pub(crate) fn set_world(&mut self, world: Isometry3<f64>) {
        self.world = world;
        self.world_stale = false;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}
