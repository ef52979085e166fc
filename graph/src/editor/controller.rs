use std::sync::Arc;

use crate::backend::FrameContext;
use crate::compiler::{CompileResult, CompilerConfig, GraphCompileStrategy};
use crate::context::GraphContext;
use crate::error::RenderPathError;

use super::EditorGraph;

/// Owns an editor graph and compiles it into the shared context.
///
/// A successful compile replaces the context's render path. A failed one
/// leaves the previous render path installed, so the host keeps rendering
/// the last good graph.
pub struct GraphEditor {
    graph: EditorGraph,
    context: Arc<GraphContext>,
    config: CompilerConfig,
    strategy: Box<dyn GraphCompileStrategy>,
}

impl GraphEditor {
    /// Create an editor starting from the default nodes.
    pub fn new(context: Arc<GraphContext>, config: CompilerConfig) -> Self {
        Self::with_graph(EditorGraph::with_default_nodes(), context, config)
    }

    pub fn with_graph(graph: EditorGraph, context: Arc<GraphContext>, config: CompilerConfig) -> Self {
        let strategy = config.create_strategy();
        Self {
            graph,
            context,
            config,
            strategy,
        }
    }

    pub fn graph(&self) -> &EditorGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut EditorGraph {
        &mut self.graph
    }

    pub fn context(&self) -> &Arc<GraphContext> {
        &self.context
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Switch compile strategy; takes effect on the next compile.
    pub fn set_config(&mut self, config: CompilerConfig) {
        self.strategy = config.create_strategy();
        self.config = config;
    }

    /// Reset the graph to the default nodes. The installed render path stays,
    /// and the ids in its order never name one of the new nodes.
    pub fn reset(&mut self) {
        self.graph.reset();
    }

    /// Compile the graph and install the render path on success.
    ///
    /// The returned result no longer holds the render path when it was
    /// installed into the context.
    pub fn compile(&mut self) -> CompileResult {
        let mut result = self.strategy.compile(&self.graph, &self.context);
        match result.render_path.take() {
            Some(path) => {
                log::info!(
                    "Installing render path with {} nodes ({} compiler)",
                    path.len(),
                    self.strategy.name()
                );
                self.context.set_render_path(path);
            }
            None => log::error!(
                "Compilation failed: {}; keeping the previous render path",
                result.failure_message
            ),
        }
        result
    }

    /// Execute the installed render path. `Ok(false)` when there is none.
    pub fn render_frame(&self, frame: &mut FrameContext) -> Result<bool, RenderPathError> {
        self.context.execute_frame(frame)
    }
}
