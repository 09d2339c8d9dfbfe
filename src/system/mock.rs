//! Mock system implementation for testing

use super::System;
use crate::utils::path::normalize_path;
use std::collections::{HashMap, HashSet};
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides an in-memory filesystem and environment,
/// perfect for fast, isolated unit tests without side effects.
///
/// # Example
/// ```
/// use rbuild::system::{MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_env("RBUILD_ROOT", "/proj").unwrap()
///     .with_file("/proj/tb/tb_top.bld", b"src: [tb_top.sv]").unwrap()
///     .with_dir("/proj/run").unwrap();
///
/// assert_eq!(system.env_var("RBUILD_ROOT").unwrap(), "/proj");
/// assert!(system.exists(Path::new("/proj/tb/tb_top.bld")));
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    current_dir: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                current_dir: PathBuf::from("/"),
                files: HashMap::new(),
                dirs: HashSet::from([PathBuf::from("/")]),
            })),
        }
    }

    /// Set an environment variable (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> io::Result<Self> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.env_vars.insert(key.to_owned(), value.to_owned());
        drop(state);
        Ok(self)
    }

    /// Set the current working directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        let path_buf = dir.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        state.dirs.insert(path_buf.clone());
        state.current_dir = path_buf;
        drop(state);
        Ok(self)
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        // Ensure parent directories exist
        if let Some(parent) = path_buf.parent() {
            Self::ensure_parent_dirs(&mut state.dirs, parent);
            state.dirs.insert(parent.to_path_buf());
        }

        state.files.insert(path_buf, contents.to_vec());
        drop(state);
        Ok(self)
    }

    /// Add a directory (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the state lock is poisoned
    #[inline]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &path_buf);
        state.dirs.insert(path_buf);
        drop(state);
        Ok(self)
    }

    #[inline]
    fn ensure_parent_dirs(dirs: &mut HashSet<PathBuf>, path: &Path) {
        let mut current = path;

        while let Some(parent) = current.parent() {
            dirs.insert(parent.to_path_buf());
            current = parent;
            if parent == Path::new("") || parent == Path::new("/") {
                break;
            }
        }

        dirs.insert(path.to_path_buf());
    }

    /// Resolve a path against the mock current directory and normalize it
    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(normalize_path(path));
        }

        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(normalize_path(&state.current_dir.join(path)))
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    #[expect(clippy::map_err_ignore, reason = "This is for VarError")]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let state = self.state.read().map_err(|_| VarError::NotPresent)?;
        state.env_vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[inline]
    fn current_dir(&self) -> io::Result<PathBuf> {
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(state.current_dir.clone())
    }

    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let abs = self.absolute(path)?;
        let state = self
            .state
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = state.files.get(&abs).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        let result = bytes.clone();
        drop(state);
        String::from_utf8(result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let abs = self.absolute(path)?;
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        Self::ensure_parent_dirs(&mut state.dirs, &abs);
        state.dirs.insert(abs);
        drop(state);
        Ok(())
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    #[inline]
    fn is_file(&self, path: &Path) -> bool {
        let Ok(abs) = self.absolute(path) else {
            return false;
        };
        self.state
            .read()
            .is_ok_and(|state| state.files.contains_key(&abs))
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        let Ok(abs) = self.absolute(path) else {
            return false;
        };
        self.state
            .read()
            .is_ok_and(|state| state.dirs.contains(&abs))
    }

    #[inline]
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let abs = self.absolute(path)?;

        if !self.exists(&abs) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file or directory: {}", path.display()),
            ));
        }

        Ok(abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_roundtrip() {
        let system = MockSystem::new().with_env("RBUILD_ROOT", "/proj").unwrap();
        assert_eq!(system.env_var("RBUILD_ROOT").unwrap(), "/proj");
        assert!(system.env_var("MISSING").is_err());
    }

    #[test]
    fn test_with_file_creates_parents() {
        let system = MockSystem::new()
            .with_file("/a/b/c.txt", b"contents")
            .unwrap();

        assert!(system.is_file(Path::new("/a/b/c.txt")));
        assert!(system.is_dir(Path::new("/a/b")));
        assert!(system.is_dir(Path::new("/a")));
        assert_eq!(
            system.read_to_string(Path::new("/a/b/c.txt")).unwrap(),
            "contents"
        );
    }

    #[test]
    fn test_create_dir_all_creates_parents() {
        let system = MockSystem::new().with_current_dir("/proj/run").unwrap();

        system.create_dir_all(Path::new("logs/archive")).unwrap();

        assert!(system.is_dir(Path::new("/proj/run/logs/archive")));
        assert!(system.is_dir(Path::new("/proj/run/logs")));
    }

    #[test]
    fn test_canonicalize_resolves_relative() {
        let system = MockSystem::new()
            .with_file("/proj/run/file.txt", b"")
            .unwrap()
            .with_current_dir("/proj/run")
            .unwrap();

        assert_eq!(
            system.canonicalize(Path::new("file.txt")).unwrap(),
            PathBuf::from("/proj/run/file.txt")
        );
        assert_eq!(
            system.canonicalize(Path::new("../run/file.txt")).unwrap(),
            PathBuf::from("/proj/run/file.txt")
        );
        assert!(system.canonicalize(Path::new("missing.txt")).is_err());
    }
}
