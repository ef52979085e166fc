//! Writing compile logs to disk.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::editor::EditorGraph;

use super::{CompileResult, CompilerConfig};

/// Write the logs of `result` to the configured log directory.
///
/// Verbose configs also get a dump of the graph and, when given, the
/// resource timeline. I/O errors are logged and otherwise ignored.
pub(crate) fn write(
    config: &CompilerConfig,
    strategy: &str,
    graph: &EditorGraph,
    result: &CompileResult,
    timelines: &[String],
) {
    let Some(dir) = config.log_dir.as_deref() else {
        return;
    };
    if let Err(err) = write_files(dir, config.verbose, strategy, graph, result, timelines) {
        log::warn!("Failed to write compile log to {}: {}", dir.display(), err);
    }
}

fn write_files(
    dir: &Path,
    verbose: bool,
    strategy: &str,
    graph: &EditorGraph,
    result: &CompileResult,
    timelines: &[String],
) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{strategy}-compile.log"));
    fs::write(&path, result.logs.join("\n") + "\n")?;
    log::debug!("Compile log written to {}", path.display());

    if verbose {
        fs::write(dir.join("graph-state.txt"), graph_state(graph))?;
        if !timelines.is_empty() {
            fs::write(dir.join("resource-timeline.txt"), timelines.join("\n") + "\n")?;
        }
    }
    Ok(())
}

fn graph_state(graph: &EditorGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "nodes: {}", graph.node_count());
    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "  {} in={} out={:?}",
            node.label(),
            graph.in_degree(node.id),
            graph.adjacency(node.id)
        );
        for resource in &node.resources {
            let _ = writeln!(
                out,
                "    {} {} {}{}",
                resource.role(),
                resource.resource_type(),
                resource.name(),
                if resource.input_is_connected { " (connected)" } else { "" }
            );
        }
    }
    let _ = writeln!(out, "edges: {}", graph.edges().len());
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  {} {}.{} -> {}.{} ({})",
            edge.id, edge.from.node, edge.from.name, edge.to.node, edge.to.name, edge.resource_type
        );
    }
    out
}
