//! Compilation of an editor graph into a render path.
//!
//! # Stages
//!
//! ```text
//! Uncompiled ─► Validating ─► Sorting ─► Sorted ─► Built ─► Ready
//!                   │            │          │
//!                   └────────────┴──────────┴────► Failed
//! ```
//!
//! | Stage | Work |
//! |-------|------|
//! | Validating | Edge direction, types and producers; scene root; reachability |
//! | Sorting | Kahn sort of the nodes reachable from the scene root |
//! | Sorted | Required inputs, resource creation, runtime nodes, bindings |
//! | Built | Every slot bound |
//! | Ready | Render path assembled |
//!
//! Failures never panic. They come back as a [`CompileResult`] with
//! `success == false`, and no render path is produced.
//!
//! Two strategies share these stages and differ only in how resources are
//! created: [`DefaultCompileStrategy`] creates one resource per output slot,
//! [`OptimizedCompileStrategy`] lets outputs with disjoint lifetimes share
//! one image through the [`ResourceOptimizer`].

mod default;
mod dump;
mod optimized;
mod optimizer;
mod pipeline;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::context::GraphContext;
use crate::editor::EditorGraph;
use crate::error::GraphError;
use crate::id::NodeId;
use crate::render_path::RenderPath;

pub use default::DefaultCompileStrategy;
pub use optimized::OptimizedCompileStrategy;
pub use optimizer::{OptimizationReport, ResourceOptimizer};
pub use pipeline::OutputSlot;

/// Stage of a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileState {
    Uncompiled,
    Validating,
    Sorting,
    Sorted,
    Built,
    Ready,
    Failed,
}

/// Outcome of one compilation.
#[derive(Debug)]
pub struct CompileResult {
    pub success: bool,
    /// Empty on success.
    pub failure_message: String,
    /// `[Info]`, `[Verbose]` and `[Error]` prefixed log lines.
    pub logs: Vec<String>,
    /// `Ready` on success, `Failed` otherwise.
    pub stage: CompileState,
    /// Last stage entered before a failure.
    pub failed_stage: Option<CompileState>,
    pub error: Option<GraphError>,
    pub compile_time: Duration,
    /// Execution order of the compiled nodes.
    pub order: Vec<NodeId>,
    pub render_path: Option<RenderPath>,
}

/// A way of turning an editor graph into a render path.
pub trait GraphCompileStrategy {
    fn name(&self) -> &'static str;

    fn compile(&self, graph: &EditorGraph, context: &GraphContext) -> CompileResult;
}

/// Available compile strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompilerType {
    /// One resource per output slot.
    #[default]
    Naive,
    /// Alias images whose lifetimes do not overlap.
    Optimized,
}

impl fmt::Display for CompilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => write!(f, "naive"),
            Self::Optimized => write!(f, "optimized"),
        }
    }
}

/// Compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilerConfig {
    pub kind: CompilerType,
    /// Keep `[Verbose]` lines and write the graph and timeline dumps.
    pub verbose: bool,
    /// Directory compile logs are written to.
    pub log_dir: Option<PathBuf>,
}

impl CompilerConfig {
    pub fn new(kind: CompilerType) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Build the strategy this config selects.
    pub fn create_strategy(&self) -> Box<dyn GraphCompileStrategy> {
        match self.kind {
            CompilerType::Naive => Box::new(DefaultCompileStrategy::new(self.clone())),
            CompilerType::Optimized => Box::new(OptimizedCompileStrategy::new(self.clone())),
        }
    }
}
