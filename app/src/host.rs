//! Headless frame loop: build, compile, record.

use std::sync::Arc;

use nebula_graph::backend::Command;
use nebula_graph::{
    profile_scope, BackendError, CompilerConfig, DummyDevice, FrameContext, GraphContext, GraphContextDescriptor,
    GraphEditor, GraphError, GraphPreset, RenderPathError, Scene,
};
use thiserror::Error;

use crate::args::Args;

/// Failure of a host run.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to create graph context: {0}")]
    Context(#[from] BackendError),

    #[error("Failed to build the {preset} preset: {source}")]
    Preset {
        preset: GraphPreset,
        #[source]
        source: GraphError,
    },

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Frame {frame} failed: {source}")]
    Frame {
        frame: u64,
        #[source]
        source: RenderPathError,
    },
}

/// Totals over every recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub commands: usize,
    pub barriers: usize,
    pub images: u64,
    pub pipelines: u64,
}

/// Build the selected preset, compile it and record `args.frames` frames.
pub fn run(args: &Args) -> Result<RunSummary, HostError> {
    let device = Arc::new(DummyDevice::new());
    let descriptor = GraphContextDescriptor::default()
        .with_render_resolution(args.extent())
        .with_target_resolution(args.extent())
        .with_frames_in_flight(usize::from(args.frames_in_flight));
    let context = Arc::new(GraphContext::new(device.clone(), descriptor)?);
    context.set_scene(Arc::new(Scene::demo()));

    let preset = GraphPreset::from(args.preset);
    let graph = preset
        .build()
        .map_err(|source| HostError::Preset { preset, source })?;

    let mut config = CompilerConfig::new(args.compiler.into()).with_verbose(args.verbose);
    if let Some(dir) = &args.log_dir {
        config = config.with_log_dir(dir);
    }
    log::info!("Compiling {} preset with the {} compiler", preset, config.kind);

    let mut editor = GraphEditor::with_graph(graph, context.clone(), config);
    let result = editor.compile();
    for line in &result.logs {
        log::debug!("{}", line);
    }
    if !result.success {
        return Err(HostError::Compile(result.failure_message));
    }

    let mut summary = RunSummary::default();
    for index in 0..args.frames {
        let mut frame = FrameContext::new(index, context.frames_in_flight());
        {
            profile_scope!("record_frame");
            editor
                .render_frame(&mut frame)
                .map_err(|source| HostError::Frame { frame: index, source })?;
        }
        nebula_graph::frame_mark!();

        let commands = frame.cmd.take();
        let barriers = commands
            .iter()
            .filter(|c| matches!(c, Command::ImageBarrier { .. }))
            .count();
        log::info!(
            "Frame {} (slot {}): {} commands, {} barriers",
            index,
            frame.frame_in_flight,
            commands.len(),
            barriers
        );
        summary.frames += 1;
        summary.commands += commands.len();
        summary.barriers += barriers;
    }

    summary.images = device.image_count();
    summary.pipelines = device.pipeline_count();
    Ok(summary)
}
