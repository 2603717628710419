//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{BranchNode, SearchTree};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Label shown for one node in renderings and listings:
/// id, bound value, and the feature payload.
pub fn node_label(node: &BranchNode) -> String {
    if node.features.is_empty() {
        return node.to_string();
    }
    let features = node
        .features
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .join(", ");
    format!("{} [{}]", node, features)
}

/// Render the subtree rooted at `root` for terminal display.
///
/// Only call this on indices reachable from [`SearchTree::roots`]; that
/// subgraph is cycle-free even when the table contained a self-parenting
/// row.
pub fn render_tree(tree: &SearchTree, root: Index) -> Tree<String> {
    let label = tree
        .node(root)
        .map(node_label)
        .unwrap_or_else(|| "?".to_string());

    let leaves: Vec<_> = tree
        .node(root)
        .map(|node| {
            node.children
                .iter()
                .map(|&child| render_tree(tree, child))
                .collect()
        })
        .unwrap_or_default();

    Tree::new(label).with_leaves(leaves)
}

/// Number of nodes reachable from `root`, itself included.
pub fn reachable_count(tree: &SearchTree, root: Index) -> usize {
    tree.node(root)
        .map(|node| {
            1 + node
                .children
                .iter()
                .map(|&child| reachable_count(tree, child))
                .sum::<usize>()
        })
        .unwrap_or(0)
}
