//! The assembled kinematic tree.

use std::collections::HashMap;

use nalgebra::Isometry3;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::joint::{Joint, JointValue};
use crate::link::{JointId, Link, LinkId};

/// A robot: links and joints in arena storage, cross-referenced by id,
/// with name indexes for lookup.
///
/// The robot owns every link and joint. Duplicate names are tolerated:
/// the name index keeps the last instance under that name while earlier
/// instances stay in the arena (and in the structural tree). A document
/// is normally a single rooted tree, but a forest of several roots is
/// representable.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Robot {
    /// Robot name from the `name` attribute (empty when absent).
    pub name: String,
    /// Pose of the whole robot in world space.
    pub frame: Frame,
    links: Vec<Link>,
    joints: Vec<Joint>,
    link_index: HashMap<String, LinkId>,
    joint_index: HashMap<String, JointId>,
    roots: Vec<LinkId>,
}

impl Robot {
    /// Create an empty robot with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a link to the arena and indexes it by name.
    ///
    /// A repeated name logs a warning and re-points the index at the new
    /// link; the earlier link stays in the arena.
    pub fn insert_link(&mut self, link: Link) -> LinkId {
        let id = LinkId::new(self.links.len());
        if self.link_index.contains_key(&link.name) {
            warn!("duplicate link name '{}', keeping the last one", link.name);
        }
        self.link_index.insert(link.name.clone(), id);
        self.links.push(link);
        id
    }

    /// Adds a joint to the arena and indexes it by name.
    ///
    /// Same duplicate-name policy as [`insert_link`](Self::insert_link).
    pub fn insert_joint(&mut self, joint: Joint) -> JointId {
        let id = JointId::new(self.joints.len());
        if self.joint_index.contains_key(&joint.name) {
            warn!("duplicate joint name '{}', keeping the last one", joint.name);
        }
        self.joint_index.insert(joint.name.clone(), id);
        self.joints.push(joint);
        id
    }

    /// Get a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.link_by_id(*self.link_index.get(name)?)
    }

    /// Get a link by name, mutably.
    pub fn link_mut(&mut self, name: &str) -> Option<&mut Link> {
        let id = *self.link_index.get(name)?;
        self.links.get_mut(id.index())
    }

    /// Get a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joint_by_id(*self.joint_index.get(name)?)
    }

    /// Get a joint by name, mutably.
    pub fn joint_mut(&mut self, name: &str) -> Option<&mut Joint> {
        let id = *self.joint_index.get(name)?;
        self.joints.get_mut(id.index())
    }

    /// Get a link by arena id.
    #[must_use]
    pub fn link_by_id(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.index())
    }

    /// Get a link by arena id, mutably.
    pub fn link_by_id_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(id.index())
    }

    /// Get a joint by arena id.
    #[must_use]
    pub fn joint_by_id(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.index())
    }

    /// Get a joint by arena id, mutably.
    pub fn joint_by_id_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        self.joints.get_mut(id.index())
    }

    /// The id currently indexed under a link name.
    #[must_use]
    pub fn link_id(&self, name: &str) -> Option<LinkId> {
        self.link_index.get(name).copied()
    }

    /// The id currently indexed under a joint name.
    #[must_use]
    pub fn joint_id(&self, name: &str) -> Option<JointId> {
        self.joint_index.get(name).copied()
    }

    /// All links in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All joints in insertion order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Number of links in the arena (duplicates included).
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of joints in the arena (duplicates included).
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// All distinct link names.
    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.link_index.keys().map(String::as_str)
    }

    /// All distinct joint names.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joint_index.keys().map(String::as_str)
    }

    /// Links with no parent joint, in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[LinkId] {
        &self.roots
    }

    /// The first root link, if any link exists at all.
    #[must_use]
    pub fn root(&self) -> Option<&Link> {
        self.link_by_id(*self.roots.first()?)
    }

    /// Recomputes the root list from the links' parent joints.
    pub fn rebuild_roots(&mut self) {
        self.roots = self
            .links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.is_root())
            .map(|(index, _)| LinkId::new(index))
            .collect();
    }

    /// Applies a joint value by joint name.
    ///
    /// Returns the value actually stored, or `None` when no joint is
    /// indexed under that name. Call
    /// [`update_world_transforms`](Self::update_world_transforms)
    /// afterwards to refresh world poses.
    pub fn set_joint_offset(&mut self, name: &str, values: &[f64]) -> Option<JointValue> {
        Some(self.joint_mut(name)?.set_offset(values))
    }

    /// Recomputes world transforms for every frame reachable from a root.
    ///
    /// Propagation runs root-down: robot frame, then link frames, then
    /// each child joint frame, then the joint's child link. A joint edge
    /// is descended only while the child still records that joint as its
    /// parent, so an edge orphaned by a re-parenting duplicate is posed
    /// but not followed. Links not reachable from any root keep their
    /// previous world pose.
    pub fn update_world_transforms(&mut self) {
        let robot_world = self.frame.local_isometry();
        self.frame.set_world(robot_world);

        let mut visited = vec![false; self.links.len()];
        let mut stack: Vec<(LinkId, Isometry3<f64>)> =
            self.roots.iter().map(|&id| (id, robot_world)).collect();

        while let Some((link_id, parent_world)) = stack.pop() {
            let index = link_id.index();
            if index >= self.links.len() || visited[index] {
                continue;
            }
            visited[index] = true;

            let link = &mut self.links[index];
            let link_world = parent_world * link.frame.local_isometry();
            link.frame.set_world(link_world);
            let child_joints = link.children.clone();

            for joint_id in child_joints {
                let Some(joint) = self.joints.get_mut(joint_id.index()) else {
                    continue;
                };
                let joint_world = link_world * joint.frame.local_isometry();
                joint.frame.set_world(joint_world);

                let child_id = joint.child;
                if let Some(child) = self.links.get(child_id.index()) {
                    if child.parent_joint == Some(joint_id) {
                        stack.push((child_id, joint_world));
                    }
                }
            }
        }
    }
}
