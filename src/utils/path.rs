//! Path manipulation and validation utilities

use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip '.' components
            }
            Component::ParentDir => {
                // Handle '..' by popping the last component if possible
                match components.last() {
                    None | Some(&Component::ParentDir) => components.push(component),
                    Some(&Component::RootDir) => {}
                    Some(_) => {
                        components.pop();
                    }
                }
            }
            _ => {
                components.push(component);
            }
        }
    }

    components.iter().collect()
}

/// Resolve a path from a build file relative to the file's directory
///
/// Absolute paths pass through unchanged. The result is normalized but not
/// required to exist.
#[must_use]
pub fn resolve_from(path: &str, base_dir: &Path) -> PathBuf {
    let path_obj = Path::new(path);

    if path_obj.is_absolute() {
        return path_obj.to_path_buf();
    }

    normalize_path(&base_dir.join(path_obj))
}

/// Check whether `path` is `ancestor` or one of its descendants
///
/// Both sides are canonicalized first, so symlinks and relative segments are
/// handled by real path identity rather than string prefix matching.
pub fn is_descendant_of(system: &dyn System, path: &Path, ancestor: &Path) -> Result<bool> {
    let canonical_path = system
        .canonicalize(path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let Ok(canonical_ancestor) = system.canonicalize(ancestor) else {
        // A missing ancestor has no descendants
        return Ok(false);
    };

    return Ok(canonical_path.starts_with(&canonical_ancestor));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("./a/../b/./c")),
            PathBuf::from("b/c")
        );

        assert_eq!(normalize_path(Path::new("../a/b")), PathBuf::from("../a/b"));

        assert_eq!(normalize_path(Path::new("a/b/../..")), PathBuf::from(""));

        // '..' at the root stays at the root
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_from() {
        assert_eq!(
            resolve_from("sub/file.sv", Path::new("/proj/tb")),
            PathBuf::from("/proj/tb/sub/file.sv")
        );
        assert_eq!(
            resolve_from("../common/pkg.sv", Path::new("/proj/tb")),
            PathBuf::from("/proj/common/pkg.sv")
        );
        assert_eq!(
            resolve_from("/abs/file.sv", Path::new("/proj/tb")),
            PathBuf::from("/abs/file.sv")
        );
    }

    #[test]
    fn test_is_descendant_of() {
        let system = MockSystem::new()
            .with_dir("/proj/run/sub")
            .unwrap()
            .with_dir("/elsewhere")
            .unwrap();

        assert!(is_descendant_of(&system, Path::new("/proj/run/sub"), Path::new("/proj/run")).unwrap());
        assert!(is_descendant_of(&system, Path::new("/proj/run"), Path::new("/proj/run")).unwrap());
        assert!(
            !is_descendant_of(&system, Path::new("/elsewhere"), Path::new("/proj/run")).unwrap()
        );
        // Missing ancestor directory
        assert!(!is_descendant_of(&system, Path::new("/elsewhere"), Path::new("/proj/missing"))
            .unwrap());
    }
}
