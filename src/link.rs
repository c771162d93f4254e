//! Links (rigid bodies) and the id newtypes used to cross-reference them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::geometry::Attachment;

/// Index of a link in its robot's link arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkId(pub usize);

impl LinkId {
    /// Create a new link id.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for LinkId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Link({})", self.0)
    }
}

/// Index of a joint in its robot's joint arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointId(pub usize);

impl JointId {
    /// Create a new joint id.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for JointId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Joint({})", self.0)
    }
}

/// A rigid body in the kinematic tree.
///
/// Links own their geometry attachments; connectivity to other links goes
/// through joint ids so the robot arena stays the single owner of both.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    /// Link name from the `name` attribute.
    pub name: String,
    /// Pose relative to the parent joint (identity for roots).
    pub frame: Frame,
    /// Visual or collision geometry attached to this link.
    pub attachments: Vec<Attachment>,
    /// Joint whose `<child>` names this link, if any.
    pub parent_joint: Option<JointId>,
    /// Joints whose `<parent>` names this link.
    pub children: Vec<JointId>,
    /// Byte offset of the `<link>` element in the source document.
    pub source_offset: usize,
}

impl Link {
    /// Creates an empty link with an identity frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: Frame::identity(),
            attachments: Vec::new(),
            parent_joint: None,
            children: Vec::new(),
            source_offset: 0,
        }
    }

    /// Whether no joint claims this link as its child.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_joint.is_none()
    }
}
