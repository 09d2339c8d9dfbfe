//! Build tree construction from `.bld` files
//!
//! A `.bld` file is a small YAML document with three optional keys, each a
//! list of strings:
//!
//! ```yaml
//! src:
//!   - tb_top.sv
//! include:
//!   - ../include
//! needs:
//!   - ../common/common.bld
//! ```
//!
//! Paths are resolved relative to the directory of the `.bld` file that
//! names them; absolute paths pass through unchanged.

use crate::build::tree::{BuildNode, BuildTree};
use crate::error::RbuildError;
use crate::system::System;
use crate::utils::path::resolve_from;
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, warn};

/// On-disk shape of a `.bld` file
#[derive(Debug, Deserialize, Default)]
struct BldFile {
    #[serde(default, deserialize_with = "string_list")]
    src: Vec<String>,

    #[serde(default, deserialize_with = "string_list")]
    include: Vec<String>,

    #[serde(default, deserialize_with = "string_list")]
    needs: Vec<String>,
}

/// Deserialize a list accepting only string entries
///
/// YAML happily coerces bare scalars like `42` into strings; a numeric
/// entry in a `.bld` list is a typo, not a path, so reject it.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_yaml::Value>::deserialize(deserializer)?;

    values
        .into_iter()
        .map(|value| match value {
            serde_yaml::Value::String(s) => Ok(s),
            other => Err(serde::de::Error::custom(format!(
                "expected a string, found: {other:?}"
            ))),
        })
        .collect()
}

/// Create the build tree using the provided files as the roots
///
/// A missing or malformed root file is an error. Inside a `needs` list a
/// missing file, non-file path, or dependency loop is logged and that need
/// is skipped, so one absent dependency doesn't hide the rest of the tree.
/// A needed file that exists but cannot be read or parsed is still an
/// error: a malformed `.bld` must not silently drop its subtree.
pub fn build_tree<P: AsRef<Path>>(system: &dyn System, roots: &[P]) -> Result<BuildTree> {
    let mut builder = TreeBuilder::new(system);
    let mut tree = BuildTree::default();

    for root in roots {
        let root = root.as_ref();

        if !system.exists(root) {
            error!("Root build file ({}) does not exist", root.display());
        }

        let mut nstack = Vec::new();
        tree.roots.push(builder.build_node(root, &mut nstack)?);
    }

    Ok(tree)
}

/// Recursive `.bld` loader with per-path memoization
struct TreeBuilder<'a> {
    system: &'a dyn System,
    nodes: HashMap<PathBuf, Rc<BuildNode>>,
}

impl<'a> TreeBuilder<'a> {
    fn new(system: &'a dyn System) -> Self {
        Self {
            system,
            nodes: HashMap::new(),
        }
    }

    /// Create a node and all its dependency nodes
    ///
    /// `nstack` is the chain of `.bld` files currently being loaded, used
    /// to detect dependency loops.
    fn build_node(
        &mut self,
        node_path: &Path,
        nstack: &mut Vec<PathBuf>,
    ) -> Result<Rc<BuildNode>, RbuildError> {
        if !self.system.exists(node_path) {
            let msg = format!("Path to build node ({}) does not exist", node_path.display());
            error!("{msg}");
            return Err(RbuildError::node_not_found(msg));
        }

        if !self.system.is_file(node_path) {
            let msg = format!("Path to build node ({}) is not a file", node_path.display());
            error!("{msg}");
            return Err(RbuildError::node_not_found(msg));
        }

        if nstack.iter().any(|p| p == node_path) {
            let msg = format!(
                "Loop in build dependencies ({} from {})",
                node_path.display(),
                nstack
                    .last()
                    .map_or_else(|| "<root>".to_owned(), |p| p.display().to_string())
            );
            error!("{msg}");
            return Err(RbuildError::dependency_loop(msg));
        }

        if let Some(node) = self.nodes.get(node_path) {
            return Ok(Rc::clone(node));
        }

        let content = self.system.read_to_string(node_path).map_err(|e| {
            let msg = format!("Failed to read build node ({}): {e}", node_path.display());
            error!("{msg}");
            RbuildError::build_file(msg)
        })?;

        // An empty document deserializes to None
        let bld: Option<BldFile> = serde_yaml::from_str(&content).map_err(|e| {
            let msg = format!("Failed to parse build node ({}): {e}", node_path.display());
            error!("{msg}");
            RbuildError::build_file(msg)
        })?;

        let node_dir = node_path.parent().unwrap_or_else(|| Path::new(""));
        let mut node = BuildNode {
            path: node_path.to_path_buf(),
            ..BuildNode::default()
        };

        let Some(bld) = bld else {
            warn!("Build node is empty ({})", node_path.display());
            let node = Rc::new(node);
            self.nodes.insert(node_path.to_path_buf(), Rc::clone(&node));
            return Ok(node);
        };

        for src in &bld.src {
            node.src.push(resolve_from(src, node_dir));
        }

        for inc in &bld.include {
            node.includes.push(resolve_from(inc, node_dir));
        }

        nstack.push(node_path.to_path_buf());

        for need in &bld.needs {
            let need_path = resolve_from(need, node_dir);

            match self.build_node(&need_path, nstack) {
                Ok(need_node) => node.needs.push(need_node),
                // Already logged; a missing, non-file, or looping need
                // doesn't fail the whole tree. Anything else (unreadable
                // or malformed file) does.
                Err(RbuildError::NodeNotFound { .. } | RbuildError::DependencyLoop { .. }) => {}
                Err(other) => {
                    nstack.pop();
                    return Err(other);
                }
            }
        }

        nstack.pop();

        let node = Rc::new(node);
        self.nodes.insert(node_path.to_path_buf(), Rc::clone(&node));

        Ok(node)
    }
}
