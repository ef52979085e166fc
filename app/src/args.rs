//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nebula_graph::{CompilerType, Extent2d, GraphPreset};

/// Graph preset selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliPreset {
    /// Scene provider, ray tracing, present.
    #[default]
    RayTracing,
    /// G-buffer, ambient occlusion, lighting and anti-aliasing.
    Deferred,
    /// Ray tracing followed by bloom, blur and anti-aliasing.
    PostProcess,
}

impl From<CliPreset> for GraphPreset {
    fn from(preset: CliPreset) -> Self {
        match preset {
            CliPreset::RayTracing => GraphPreset::RayTracing,
            CliPreset::Deferred => GraphPreset::Deferred,
            CliPreset::PostProcess => GraphPreset::PostProcess,
        }
    }
}

/// Compile strategy selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliCompiler {
    /// One resource per output slot.
    #[default]
    Naive,
    /// Alias images whose lifetimes do not overlap.
    Optimized,
}

impl From<CliCompiler> for CompilerType {
    fn from(compiler: CliCompiler) -> Self {
        match compiler {
            CliCompiler::Naive => CompilerType::Naive,
            CliCompiler::Optimized => CompilerType::Optimized,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "nebula-app",
    about = "Nebula render graph host",
    long_about = "Builds a preset render graph, compiles it and records frames on the dummy device.\n\n\
        EXAMPLES:\n\
          # Ray tracing preset, 10 frames\n\
          ./nebula-app --frames 10\n\
        \n\
          # Deferred preset with image aliasing and compile logs on disk\n\
          ./nebula-app --preset deferred --compiler optimized --verbose --log-dir logs",
    version
)]
pub struct Args {
    /// Graph to build.
    #[arg(long, default_value = "ray-tracing", value_enum)]
    pub preset: CliPreset,

    /// Compile strategy.
    #[arg(long, default_value = "naive", value_enum)]
    pub compiler: CliCompiler,

    /// Number of frames to record.
    #[arg(long, default_value = "3")]
    pub frames: u64,

    /// Render width in pixels.
    #[arg(long, default_value = "1920")]
    pub width: u32,

    /// Render height in pixels.
    #[arg(long, default_value = "1080")]
    pub height: u32,

    /// Frames recorded ahead of the GPU.
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u16).range(1..=8))]
    pub frames_in_flight: u16,

    /// Keep verbose compile logs and write graph dumps.
    #[arg(long)]
    pub verbose: bool,

    /// Directory compile logs are written to.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    pub fn extent(&self) -> Extent2d {
        Extent2d::new(self.width.max(1), self.height.max(1))
    }
}
