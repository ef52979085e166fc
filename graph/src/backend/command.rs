//! Recorded command streams.

use super::{BufferHandle, GpuBuffer, GpuImage, GpuPipeline, ImageHandle, ImageLayout, PipelineHandle, PipelineKind};

/// A single recorded GPU command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ImageBarrier {
        image: ImageHandle,
        old: ImageLayout,
        new: ImageLayout,
    },
    BindPipeline {
        pipeline: PipelineHandle,
        kind: PipelineKind,
    },
    UpdateDescriptor {
        binding: u32,
        resource: String,
    },
    PushConstants {
        data: Vec<u8>,
    },
    UpdateBuffer {
        buffer: BufferHandle,
        data: Vec<u8>,
    },
    Draw {
        vertex_count: u32,
        instance_count: u32,
    },
    Dispatch {
        x: u32,
        y: u32,
        z: u32,
    },
    TraceRays {
        width: u32,
        height: u32,
    },
    CopyImage {
        src: ImageHandle,
        dst: ImageHandle,
    },
}

/// Commands recorded for one frame.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw command.
    pub fn record(&mut self, command: Command) {
        log::trace!("Recording {:?}", command);
        self.commands.push(command);
    }

    /// Transition `image` to `layout`.
    ///
    /// Nothing is recorded when the image is already in that layout.
    pub fn image_barrier(&mut self, image: &GpuImage, layout: ImageLayout) {
        let old = image.set_layout(layout);
        if old != layout {
            self.record(Command::ImageBarrier {
                image: image.handle(),
                old,
                new: layout,
            });
        }
    }

    pub fn bind_pipeline(&mut self, pipeline: &GpuPipeline) {
        self.record(Command::BindPipeline {
            pipeline: pipeline.handle(),
            kind: pipeline.kind(),
        });
    }

    pub fn update_descriptor(&mut self, binding: u32, resource: impl Into<String>) {
        self.record(Command::UpdateDescriptor {
            binding,
            resource: resource.into(),
        });
    }

    pub fn push_constants(&mut self, data: &[u8]) {
        self.record(Command::PushConstants {
            data: data.to_vec(),
        });
    }

    pub fn update_buffer(&mut self, buffer: &GpuBuffer, data: &[u8]) {
        self.record(Command::UpdateBuffer {
            buffer: buffer.handle(),
            data: data.to_vec(),
        });
    }

    pub fn draw(&mut self, vertex_count: u32, instance_count: u32) {
        self.record(Command::Draw {
            vertex_count,
            instance_count,
        });
    }

    pub fn dispatch(&mut self, [x, y, z]: [u32; 3]) {
        self.record(Command::Dispatch { x, y, z });
    }

    pub fn trace_rays(&mut self, width: u32, height: u32) {
        self.record(Command::TraceRays { width, height });
    }

    pub fn copy_image(&mut self, src: &GpuImage, dst: &GpuImage) {
        self.record(Command::CopyImage {
            src: src.handle(),
            dst: dst.handle(),
        });
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Remove and return the recorded commands.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Per-frame recording state handed to every node.
#[derive(Debug)]
pub struct FrameContext {
    /// Command stream for this frame.
    pub cmd: CommandBuffer,
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Slot in the frames-in-flight ring, also the swapchain image index.
    pub frame_in_flight: usize,
}

impl FrameContext {
    /// Create the context for frame `frame_index` of a ring of `frames_in_flight`.
    pub fn new(frame_index: u64, frames_in_flight: usize) -> Self {
        Self {
            cmd: CommandBuffer::new(),
            frame_index,
            frame_in_flight: (frame_index % frames_in_flight.max(1) as u64) as usize,
        }
    }
}
