//! Ready-made graphs used by the host application, tests and benchmarks.

use std::fmt;

use crate::error::GraphResult;
use crate::id::NodeId;
use crate::node::NodeType;

use super::EditorGraph;

/// Shape of a ready-made graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphPreset {
    /// Scene provider, ray tracing, present.
    RayTracing,
    /// G-buffer, ambient occlusion and lighting, anti-aliased and presented.
    Deferred,
    /// Ray tracing followed by bloom, blur and anti-aliasing.
    PostProcess,
}

impl GraphPreset {
    pub const ALL: [GraphPreset; 3] = [Self::RayTracing, Self::Deferred, Self::PostProcess];

    pub fn name(self) -> &'static str {
        match self {
            Self::RayTracing => "ray-tracing",
            Self::Deferred => "deferred",
            Self::PostProcess => "post-process",
        }
    }

    /// Build the preset on an empty graph.
    pub fn build(self) -> GraphResult<EditorGraph> {
        let mut graph = EditorGraph::new();
        let scene = graph.add_node(NodeType::SceneProvider)?;
        let present = graph.add_node(NodeType::Present)?;

        match self {
            Self::RayTracing => {
                let rt = ray_tracing(&mut graph, scene)?;
                graph.link(rt, "Output", present, "Final Image")?;
            }
            Self::Deferred => {
                let gbuffer = graph.add_node(NodeType::GBufferPass)?;
                let ao = graph.add_node(NodeType::AmbientOcclusion)?;
                let lighting = graph.add_node(NodeType::LightingPass)?;
                let aa = graph.add_node(NodeType::AntiAliasing)?;

                graph.link(scene, "Scene", gbuffer, "Scene Data")?;
                graph.link(gbuffer, "Position", ao, "Position Buffer")?;
                graph.link(gbuffer, "Normal", ao, "Normal Buffer")?;
                for (from, to) in [
                    ("Position", "Position"),
                    ("Normal", "Normal"),
                    ("Albedo", "Albedo"),
                    ("Depth", "Depth Image"),
                ] {
                    graph.link(gbuffer, from, lighting, to)?;
                }
                for consumer in [ao, lighting] {
                    graph.link(scene, "Camera", consumer, "Camera")?;
                    graph.link(scene, "TLAS", consumer, "TLAS")?;
                }
                graph.link(ao, "AO Image", lighting, "AO Image")?;
                graph.link(lighting, "Lighting Result", aa, "Anti-Aliasing Input")?;
                graph.link(aa, "Anti-Aliasing Output", present, "Final Image")?;
            }
            Self::PostProcess => {
                let rt = ray_tracing(&mut graph, scene)?;
                let bloom = graph.add_node(NodeType::Bloom)?;
                let blur = graph.add_node(NodeType::GaussianBlur)?;
                let aa = graph.add_node(NodeType::AntiAliasing)?;

                graph.link(rt, "Output", bloom, "Bloom Input")?;
                graph.link(bloom, "Bloom Output", blur, "Blur Input")?;
                graph.link(blur, "Blur Output", aa, "Anti-Aliasing Input")?;
                graph.link(aa, "Anti-Aliasing Output", present, "Final Image")?;
            }
        }
        Ok(graph)
    }
}

impl fmt::Display for GraphPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn ray_tracing(graph: &mut EditorGraph, scene: NodeId) -> GraphResult<NodeId> {
    let rt = graph.add_node(NodeType::RayTracing)?;
    for slot in ["Objects", "Camera", "TLAS"] {
        graph.link(scene, slot, rt, slot)?;
    }
    Ok(rt)
}
