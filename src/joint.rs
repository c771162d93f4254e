//! Joints and the joint-value transform engine.
//!
//! A [`Joint`] owns the frame between its parent and child link. Its pose
//! is the `<origin>` rest pose composed with a contribution derived from
//! the current joint value: a rotation about the joint axis for revolute
//! and continuous joints, a translation along it for prismatic joints.

use nalgebra::{Unit, UnitQuaternion, Vector3};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::link::LinkId;

/// The six URDF joint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointType {
    /// No relative motion between parent and child.
    Fixed,
    /// Unbounded rotation around the joint axis.
    Continuous,
    /// Limited rotation around the joint axis.
    Revolute,
    /// Limited translation along the joint axis.
    Prismatic,
    /// Motion in a plane (2 DOF; posing unsupported).
    Planar,
    /// Free motion (6 DOF; posing unsupported).
    Floating,
}

impl JointType {
    /// Parse a joint type from its URDF `type` attribute value.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(Self::Fixed),
            "continuous" => Some(Self::Continuous),
            "revolute" => Some(Self::Revolute),
            "prismatic" => Some(Self::Prismatic),
            "planar" => Some(Self::Planar),
            "floating" => Some(Self::Floating),
            _ => None,
        }
    }

    /// Get the number of degrees of freedom for this joint type.
    #[must_use]
    pub const fn dof(self) -> usize {
        match self {
            Self::Fixed => 0,
            Self::Continuous | Self::Revolute | Self::Prismatic => 1,
            Self::Planar => 2,
            Self::Floating => 6,
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Continuous => write!(f, "continuous"),
            Self::Revolute => write!(f, "revolute"),
            Self::Prismatic => write!(f, "prismatic"),
            Self::Planar => write!(f, "planar"),
            Self::Floating => write!(f, "floating"),
        }
    }
}

/// Current joint value, shaped by the joint's degrees of freedom.
///
/// Fixed joints report a constant zero scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointValue {
    /// Single-DOF value (angle in radians or displacement in meters).
    Scalar(f64),
    /// Two-DOF planar value.
    Planar([f64; 2]),
    /// Six-DOF floating value.
    Floating([f64; 6]),
}

impl JointValue {
    /// The zero element with the shape a joint of `kind` carries.
    #[must_use]
    pub const fn zero_for(kind: JointType) -> Self {
        match kind {
            JointType::Planar => Self::Planar([0.0; 2]),
            JointType::Floating => Self::Floating([0.0; 6]),
            _ => Self::Scalar(0.0),
        }
    }

    /// The scalar value, for single-DOF shapes.
    #[must_use]
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Number of components in this value.
    #[must_use]
    pub const fn dof(self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Planar(_) => 2,
            Self::Floating(_) => 6,
        }
    }
}

/// Position bounds for a single-DOF joint.
///
/// URDF defaults each bound to 0 when the attribute is absent, so a
/// joint declared without a `<limit>` element carries the degenerate
/// range `[0, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointLimit {
    /// Minimum position (radians or meters).
    pub lower: f64,
    /// Maximum position (radians or meters).
    pub upper: f64,
}

impl JointLimit {
    /// Create limits with the given bounds.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Clamp a value into `[lower, upper]`.
    ///
    /// Uses `min(upper, max(lower, value))`, which stays total even for
    /// an inverted range (it then always yields `upper`).
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        self.upper.min(self.lower.max(value))
    }

    /// Whether the range has collapsed to a single point.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.lower == self.upper
    }
}

/// A connection between two links, owning the transform between them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name from the `name` attribute.
    pub name: String,
    kind: JointType,
    /// Unit-length motion axis, present for moving joints.
    pub axis: Option<Vector3<f64>>,
    /// Position bounds applied by [`set_offset`](Self::set_offset).
    pub limit: JointLimit,
    /// When set, [`set_offset`](Self::set_offset) skips clamping.
    pub ignore_limits: bool,
    /// Pose of the child link relative to the parent link.
    ///
    /// Holds the `<origin>` rest pose until the first offset is applied.
    pub frame: Frame,
    value: JointValue,
    rest_pose: Option<(Vector3<f64>, UnitQuaternion<f64>)>,
    /// Link named by `<parent>`.
    pub parent: LinkId,
    /// Link named by `<child>`.
    pub child: LinkId,
    /// Byte offset of the `<joint>` element in the source document.
    pub source_offset: usize,
}

impl Joint {
    /// Creates a joint at its rest pose with a zero value.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: JointType, parent: LinkId, child: LinkId) -> Self {
        Self {
            name: name.into(),
            kind,
            axis: None,
            limit: JointLimit::default(),
            ignore_limits: false,
            frame: Frame::identity(),
            value: JointValue::zero_for(kind),
            rest_pose: None,
            parent,
            child,
            source_offset: 0,
        }
    }

    /// The joint kind.
    #[must_use]
    pub fn kind(&self) -> JointType {
        self.kind
    }

    /// Changes the joint kind, resetting the value to the zero element of
    /// the new shape. A previously captured rest pose is retained.
    pub fn set_kind(&mut self, kind: JointType) {
        self.kind = kind;
        self.value = JointValue::zero_for(kind);
    }

    /// The current joint value.
    #[must_use]
    pub fn angle(&self) -> JointValue {
        self.value
    }

    /// Applies a joint value, returning the value actually stored.
    ///
    /// The first call snapshots the frame's current pose as the rest
    /// pose; every later pose is recomputed from that snapshot, so
    /// repeated calls never accumulate drift. Out-of-range values are
    /// clamped into the joint limits unless `ignore_limits` is set (a
    /// continuous joint with the degenerate default range is also left
    /// unclamped). Fixed joints ignore the call; planar and floating
    /// joints warn and stay at their rest pose.
    ///
    /// An empty `values` slice, or a value equal to the one already
    /// stored, leaves the joint untouched.
    pub fn set_offset(&mut self, values: &[f64]) -> JointValue {
        let (rest_position, rest_rotation) = *self
            .rest_pose
            .get_or_insert((self.frame.position, self.frame.rotation));

        match self.kind {
            JointType::Fixed => {}
            JointType::Continuous | JointType::Revolute => {
                self.apply_rotation(values, rest_rotation);
            }
            JointType::Prismatic => {
                self.apply_translation(values, rest_position);
            }
            JointType::Planar | JointType::Floating => {
                warn!("'{}' joint '{}' cannot be posed", self.kind, self.name);
            }
        }

        self.value
    }

    /// Alias for [`set_offset`](Self::set_offset).
    pub fn set_angle(&mut self, values: &[f64]) -> JointValue {
        self.set_offset(values)
    }

    fn apply_rotation(&mut self, values: &[f64], rest_rotation: UnitQuaternion<f64>) {
        let Some(&requested) = values.first() else {
            return;
        };
        let JointValue::Scalar(current) = self.value else {
            return;
        };
        if requested == current {
            return;
        }

        let skip_clamp =
            self.ignore_limits || (self.kind == JointType::Continuous && self.limit.is_degenerate());
        let applied = if skip_clamp {
            requested
        } else {
            self.limit.clamp(requested)
        };

        let Some(axis) = self.unit_axis() else {
            warn!("joint '{}' has no usable axis, ignoring offset", self.name);
            return;
        };

        self.frame.rotation = rest_rotation * UnitQuaternion::from_axis_angle(&axis, applied);
        self.value = JointValue::Scalar(applied);
        self.frame.mark_world_stale();
    }

    fn apply_translation(&mut self, values: &[f64], rest_position: Vector3<f64>) {
        let Some(&requested) = values.first() else {
            return;
        };
        let JointValue::Scalar(current) = self.value else {
            return;
        };
        if requested == current {
            return;
        }

        let applied = if self.ignore_limits {
            requested
        } else {
            self.limit.clamp(requested)
        };

        let Some(axis) = self.unit_axis() else {
            warn!("joint '{}' has no usable axis, ignoring offset", self.name);
            return;
        };

        self.frame.position = rest_position + axis.into_inner() * applied;
        self.value = JointValue::Scalar(applied);
        self.frame.mark_world_stale();
    }

    fn unit_axis(&self) -> Option<Unit<Vector3<f64>>> {
        self.axis.and_then(|axis| Unit::try_new(axis, 1e-12))
    }
}
