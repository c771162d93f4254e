//! Resolution of `package://` mesh and texture references.

use std::collections::HashMap;

use tracing::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `package://<name>/<path>` references map onto real locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackageContext {
    /// No mapping configured; package references cannot be resolved.
    #[default]
    None,
    /// A single base location shared by every package.
    ///
    /// When the base already ends with the package name it is used as
    /// the package root directly; otherwise the package name is appended.
    /// Both spellings of "point me at my ROS share tree" therefore work.
    Base(String),
    /// An explicit package-name to location table.
    Map(HashMap<String, String>),
}

impl From<String> for PackageContext {
    fn from(base: String) -> Self {
        Self::Base(base)
    }
}

impl From<&str> for PackageContext {
    fn from(base: &str) -> Self {
        Self::Base(base.to_string())
    }
}

impl From<HashMap<String, String>> for PackageContext {
    fn from(map: HashMap<String, String>) -> Self {
        Self::Map(map)
    }
}

/// Resolves a raw mesh or texture reference to a loadable path.
///
/// References without the `package://` scheme are concatenated onto
/// `working_path` as-is (no separator is inserted; pass a trailing `/`
/// on the working path if one is needed). Scheme references split at
/// the first `/` into a package name and a relative path, then resolve
/// through the context. An unresolvable reference logs a diagnostic and
/// returns `None`; callers treat that as "mesh unavailable", never as a
/// hard error.
#[must_use]
pub fn resolve_mesh_path(
    context: &PackageContext,
    raw: &str,
    working_path: &str,
) -> Option<String> {
    let Some(rest) = raw.strip_prefix("package://") else {
        return Some(format!("{working_path}{raw}"));
    };

    let (package, rel) = match rest.split_once('/') {
        Some((package, rel)) => (package, rel),
        None => (rest, ""),
    };

    match context {
        PackageContext::None => {
            error!(
                "cannot resolve 'package://{}': no package context configured",
                rest
            );
            None
        }
        PackageContext::Base(base) => {
            if base.ends_with(package) {
                Some(format!("{base}/{rel}"))
            } else {
                Some(format!("{base}/{package}/{rel}"))
            }
        }
        PackageContext::Map(map) => match map.get(package) {
            Some(root) => Some(format!("{root}/{rel}")),
            None => {
                error!("package '{}' not found in the package map", package);
                None
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_ending_with_package_name() {
        let context = PackageContext::from("/opt/ros/share/mypkg");
        assert_eq!(
            resolve_mesh_path(&context, "package://mypkg/meshes/a.stl", "").unwrap(),
            "/opt/ros/share/mypkg/meshes/a.stl"
        );
    }

    #[test]
    fn test_base_without_package_name() {
        let context = PackageContext::from("/opt/ros/share");
        assert_eq!(
            resolve_mesh_path(&context, "package://mypkg/meshes/a.stl", "").unwrap(),
            "/opt/ros/share/mypkg/meshes/a.stl"
        );
    }

    #[test]
    fn test_map_lookup() {
        let mut map = HashMap::new();
        map.insert("mypkg".to_string(), "/data/pkgs/mypkg".to_string());
        let context = PackageContext::from(map);
        assert_eq!(
            resolve_mesh_path(&context, "package://mypkg/meshes/a.stl", "").unwrap(),
            "/data/pkgs/mypkg/meshes/a.stl"
        );
    }

    #[test]
    fn test_map_miss_is_none() {
        let context = PackageContext::Map(HashMap::new());
        assert!(resolve_mesh_path(&context, "package://mypkg/meshes/a.stl", "").is_none());
    }

    #[test]
    fn test_no_scheme_concatenates_working_path() {
        let context = PackageContext::None;
        assert_eq!(
            resolve_mesh_path(&context, "meshes/a.stl", "/robots/").unwrap(),
            "/robots/meshes/a.stl"
        );
        // No separator is inserted.
        assert_eq!(
            resolve_mesh_path(&context, "a.stl", "/robots").unwrap(),
            "/robotsa.stl"
        );
    }

    #[test]
    fn test_no_context_package_reference_is_none() {
        assert!(resolve_mesh_path(&PackageContext::None, "package://p/a.stl", "").is_none());
    }

    #[test]
    fn test_package_without_relative_path() {
        let context = PackageContext::from("/opt/ros/share");
        assert_eq!(
            resolve_mesh_path(&context, "package://mypkg", "").unwrap(),
            "/opt/ros/share/mypkg/"
        );
    }
}
