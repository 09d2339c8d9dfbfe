//! Build tree types and traversal

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

/// The top-level build tree for a compile
#[derive(Debug, Default)]
pub struct BuildTree {
    /// The root nodes the tree was built from
    pub roots: Vec<Rc<BuildNode>>,
}

/// A node in the build tree, loaded from one `.bld` file
///
/// Nodes are shared: two `.bld` files needing the same dependency refer to
/// a single node, so the tree is really a DAG.
#[derive(Debug, Default)]
pub struct BuildNode {
    /// Path of the `.bld` file this node was loaded from
    pub path: PathBuf,

    /// Source files to compile, resolved to absolute paths
    pub src: Vec<PathBuf>,

    /// Include directories, resolved to absolute paths
    pub includes: Vec<PathBuf>,

    /// Dependencies that must compile before this node's sources
    pub needs: Vec<Rc<BuildNode>>,
}

impl BuildTree {
    /// Post-order traversal of the tree
    ///
    /// Dependencies come before their dependents, and each shared node
    /// appears exactly once.
    #[must_use]
    pub fn traverse(&self) -> Vec<Rc<BuildNode>> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();

        for root in &self.roots {
            visit(root, &mut visited, &mut order);
        }

        return order;
    }

    /// All include directories in the tree, in traversal order, deduplicated
    #[must_use]
    pub fn include_dirs(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut dirs = Vec::new();

        for node in self.traverse() {
            for inc in &node.includes {
                if seen.insert(inc.clone()) {
                    dirs.push(inc.clone());
                }
            }
        }

        dirs
    }

    /// Create a nicely human-readable representation of the tree
    #[must_use]
    pub fn stringify(&self) -> String {
        let mut out = String::new();

        for root in &self.roots {
            root.stringify_into(&mut out, 0);
        }

        out
    }
}

impl BuildNode {
    fn stringify_into(&self, out: &mut String, depth: usize) {
        // String formatting is infallible
        let _ = writeln!(out, "{}- {}", "  ".repeat(depth), self.path.display());

        for need in &self.needs {
            need.stringify_into(out, depth + 1);
        }
    }
}

fn visit(node: &Rc<BuildNode>, visited: &mut HashSet<PathBuf>, order: &mut Vec<Rc<BuildNode>>) {
    if !visited.insert(node.path.clone()) {
        return;
    }

    for need in &node.needs {
        visit(need, visited, order);
    }

    order.push(Rc::clone(node));
}
