use crate::context::GraphContext;
use crate::editor::EditorGraph;

use super::pipeline::{self, CompileSession};
use super::{dump, CompileResult, CompilerConfig, GraphCompileStrategy, ResourceOptimizer};

/// Compiles with image aliasing through the [`ResourceOptimizer`].
#[derive(Debug, Clone, Default)]
pub struct OptimizedCompileStrategy {
    config: CompilerConfig,
    optimizer: ResourceOptimizer,
}

impl OptimizedCompileStrategy {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            optimizer: ResourceOptimizer::new(),
        }
    }
}

impl GraphCompileStrategy for OptimizedCompileStrategy {
    fn name(&self) -> &'static str {
        "optimized"
    }

    fn compile(&self, graph: &EditorGraph, context: &GraphContext) -> CompileResult {
        let mut session = CompileSession::new(self.name(), self.config.verbose);
        let mut timelines = Vec::new();

        let outcome = pipeline::run(graph, context, &mut session, |slots, session| {
            let report = self.optimizer.optimize(slots);
            session.info(format!(
                "Resource optimisation: {} outputs, {} not optimisable, {} resources after aliasing",
                report.original_count, report.non_optimizable_count, report.optimized_count
            ));
            for line in &report.timelines {
                session.verbose(format!("Timeline {line}"));
            }
            timelines = report.timelines;
            report.groups
        });

        let result = session.finish(outcome);
        dump::write(&self.config, self.name(), graph, &result, &timelines);
        result
    }
}
