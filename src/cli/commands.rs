use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::domain::{SearchTree, TreeBuilder};
use crate::infrastructure::{load_table, InfraError};
use crate::load_forests;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Summary { source_dir }) => _summary(source_dir),
        Some(Commands::Tree { source_path }) => _tree(source_path),
        Some(Commands::Branching { source_path }) => _branching(source_path),
        Some(Commands::Completion { shell }) => {
            generate(*shell, &mut Cli::command(), "bbforest", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument]
fn _summary(source_dir: &Path) -> CliResult<()> {
    debug!("source_dir: {:?}", source_dir);
    let forests = load_forests(source_dir)?;
    if forests.is_empty() {
        output::warning("no node tables found");
        return Ok(());
    }

    for (name, nodes) in &forests {
        output::info(&format!(
            "{}: {} nodes, {} branching",
            name,
            nodes.tree().len(),
            nodes.len()
        ));
    }
    Ok(())
}

#[instrument]
fn _tree(source_path: &Path) -> CliResult<()> {
    debug!("source_path: {:?}", source_path);
    let (name, tree) = build_single(source_path)?;
    output::header(&name);

    let roots = tree.roots();
    let mut reachable = 0;
    for root in &roots {
        print!("{}", output::render_tree(&tree, *root));
        reachable += output::reachable_count(&tree, *root);
    }

    if reachable < tree.len() {
        output::warning(&format!(
            "{} nodes not reachable from any root (self-parenting rows?)",
            tree.len() - reachable
        ));
    }
    Ok(())
}

#[instrument]
fn _branching(source_path: &Path) -> CliResult<()> {
    debug!("source_path: {:?}", source_path);
    let (name, tree) = build_single(source_path)?;
    let builder = TreeBuilder::new();
    let internal = builder.filter_internal(&tree, &tree.entries());

    output::header(&format!("{}: {} branching nodes", name, internal.len()));
    for (_, idx) in internal {
        if let Some(node) = tree.node(idx) {
            output::detail(&format!(
                "{} children={}",
                output::node_label(node),
                node.children.len()
            ));
        }
    }
    Ok(())
}

fn build_single(source_path: &Path) -> CliResult<(String, SearchTree)> {
    let name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidArgs(format!("not a file: {}", source_path.display())))?;

    let rows = load_table(source_path)?;
    let tree = TreeBuilder::new()
        .build(&rows, &name)
        .map_err(InfraError::Domain)?;
    Ok((name, tree))
}
