use crate::context::GraphContext;
use crate::editor::EditorGraph;

use super::pipeline::{self, CompileSession};
use super::{dump, CompileResult, CompilerConfig, GraphCompileStrategy};

/// Compiles every output slot into its own resource.
#[derive(Debug, Clone, Default)]
pub struct DefaultCompileStrategy {
    config: CompilerConfig,
}

impl DefaultCompileStrategy {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }
}

impl GraphCompileStrategy for DefaultCompileStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn compile(&self, graph: &EditorGraph, context: &GraphContext) -> CompileResult {
        let mut session = CompileSession::new(self.name(), self.config.verbose);
        let outcome = pipeline::run(graph, context, &mut session, |slots, _| {
            pipeline::unaliased_plan(slots)
        });
        let result = session.finish(outcome);
        dump::write(&self.config, self.name(), graph, &result, &[]);
        result
    }
}
