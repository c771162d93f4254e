//! Material descriptions and the robot-scope material table.
//!
//! Materials are pure value types: a color and/or a texture path. Texture
//! bytes are never loaded here; consumers resolve the stored path lazily.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A partial material description accumulated from `<color>` and
/// `<texture>` elements.
///
/// Unset fields mean "not specified"; merging never clears a field.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Name attribute, when the material was declared with one.
    pub name: Option<String>,
    /// RGBA color, each channel in `[0, 1]`.
    pub color: Option<[f64; 4]>,
    /// Resolved texture path (loaded lazily by consumers).
    pub texture: Option<String>,
}

impl Material {
    /// Opacity derived from the color's alpha channel (1.0 when no color
    /// is set).
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.color.map_or(1.0, |c| c[3])
    }

    /// Whether the material is anything less than fully opaque.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }

    /// Copies the set fields of `other` onto `self`, overwriting what they
    /// cover.
    ///
    /// Color (including its alpha) moves as a unit, texture moves as a
    /// unit and the name is left alone. Applying several sources in
    /// sequence therefore gives last-applied-wins semantics per field.
    pub fn merge_from(&mut self, other: &Material) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.texture.is_some() {
            self.texture = other.texture.clone();
        }
    }
}

/// Robot-scope table of named materials.
///
/// The first definition of each name wins; later definitions with the
/// same name are ignored rather than merged.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a named material unless that name is already taken.
    ///
    /// Returns whether the material was stored. Unnamed materials are
    /// never stored (nothing could reference them).
    pub fn insert(&mut self, material: Material) -> bool {
        let Some(name) = material.name.clone() else {
            return false;
        };
        if self.materials.contains_key(&name) {
            return false;
        }
        self.materials.insert(name, material);
        true
    }

    /// Looks up a material by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Number of named materials in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterates over `(name, material)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn named(name: &str, color: [f64; 4]) -> Material {
        Material {
            name: Some(name.to_string()),
            color: Some(color),
            texture: None,
        }
    }

    #[test]
    fn test_first_definition_wins() {
        let mut lib = MaterialLibrary::new();
        assert!(lib.insert(named("metal", [1.0, 0.0, 0.0, 1.0])));
        assert!(!lib.insert(named("metal", [0.0, 0.0, 1.0, 1.0])));
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("metal").unwrap().color, Some([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_unnamed_materials_are_not_stored() {
        let mut lib = MaterialLibrary::new();
        assert!(!lib.insert(Material {
            color: Some([0.5, 0.5, 0.5, 1.0]),
            ..Material::default()
        }));
        assert!(lib.is_empty());
    }

    #[test]
    fn test_merge_copies_set_fields_only() {
        let mut target = Material {
            color: Some([1.0, 0.0, 0.0, 1.0]),
            texture: Some("old.png".to_string()),
            ..Material::default()
        };
        target.merge_from(&Material {
            texture: Some("new.png".to_string()),
            ..Material::default()
        });
        // Color untouched, texture overwritten.
        assert_eq!(target.color, Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(target.texture.as_deref(), Some("new.png"));
    }

    #[test]
    fn test_merge_is_last_applied_wins() {
        let mut target = Material::default();
        target.merge_from(&named("a", [1.0, 0.0, 0.0, 1.0]));
        target.merge_from(&named("b", [0.0, 1.0, 0.0, 0.25]));
        assert_eq!(target.color, Some([0.0, 1.0, 0.0, 0.25]));
        assert_eq!(target.name, None);
    }

    #[test]
    fn test_opacity_follows_alpha() {
        let mut material = Material::default();
        assert_eq!(material.opacity(), 1.0);
        assert!(!material.is_transparent());

        material.color = Some([0.2, 0.2, 0.2, 0.5]);
        assert_eq!(material.opacity(), 0.5);
        assert!(material.is_transparent());
    }
}
