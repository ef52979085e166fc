//! Aliasing of graph images with disjoint lifetimes.
//!
//! Every output slot is live from the position of its producer to the
//! position of its last consumer in the execution order. Two image outputs
//! may share one GPU image when their live ranges do not overlap and their
//! type, format, usage, extent and sample count are identical.
//!
//! ```text
//! order:      0     1     2     3     4
//! A.Output    ●─────●                      resource 0
//! B.Output                ●─────●          resource 0 (aliased)
//! C.Output          ●───────────●          resource 1
//! ```

use std::fmt::Write;

use crate::resource::ResourceType;
use crate::types::{Extent2d, TextureFormat, TextureUsage};

use super::pipeline::OutputSlot;

/// Properties that must match for two slots to share an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AliasKey {
    resource_type: ResourceType,
    format: TextureFormat,
    usage: TextureUsage,
    extent: Option<Extent2d>,
    sample_count: u32,
}

impl AliasKey {
    fn of(slot: &OutputSlot) -> Self {
        let spec = &slot.description.spec;
        Self {
            resource_type: spec.resource_type,
            format: spec.format,
            usage: spec.usage,
            extent: spec.extent,
            sample_count: spec.sample_count,
        }
    }
}

struct AliasGroup {
    key: AliasKey,
    members: Vec<usize>,
    last_use: usize,
}

/// Result of an optimisation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationReport {
    /// Slot indices grouped by shared resource, ordered by first member.
    pub groups: Vec<Vec<usize>>,
    /// Number of output slots.
    pub original_count: usize,
    /// Slots that can never be aliased (scene data, buffers, image arrays).
    pub non_optimizable_count: usize,
    /// Number of resources after aliasing.
    pub optimized_count: usize,
    /// One line per resource showing the live range of each member.
    pub timelines: Vec<String>,
}

/// Greedy interval packing of image outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceOptimizer;

impl ResourceOptimizer {
    pub fn new() -> Self {
        Self
    }

    fn is_aliasable(slot: &OutputSlot) -> bool {
        matches!(slot.resource_type(), ResourceType::Image | ResourceType::DepthImage)
    }

    /// Group `slots` so that members of a group never overlap.
    ///
    /// Slots are visited by producer position and each one joins the first
    /// compatible group whose last use lies strictly before it.
    pub fn optimize(&self, slots: &[OutputSlot]) -> OptimizationReport {
        let mut fixed: Vec<Vec<usize>> = Vec::new();
        let mut groups: Vec<AliasGroup> = Vec::new();

        let mut visit: Vec<usize> = (0..slots.len()).collect();
        visit.sort_by_key(|&i| (slots[i].first_use, i));

        for index in visit {
            let slot = &slots[index];
            if !Self::is_aliasable(slot) {
                fixed.push(vec![index]);
                continue;
            }
            let key = AliasKey::of(slot);
            match groups
                .iter_mut()
                .find(|group| group.key == key && group.last_use < slot.first_use)
            {
                Some(group) => {
                    group.members.push(index);
                    group.last_use = slot.last_use;
                }
                None => groups.push(AliasGroup {
                    key,
                    members: vec![index],
                    last_use: slot.last_use,
                }),
            }
        }

        let non_optimizable_count = fixed.len();
        let mut all: Vec<Vec<usize>> = fixed
            .into_iter()
            .chain(groups.into_iter().map(|group| group.members))
            .collect();
        all.sort_by_key(|group| group[0]);

        let timelines = all
            .iter()
            .map(|group| {
                let mut line = format!("{}:", slots[group[0]].key);
                for &member in group {
                    let slot = &slots[member];
                    let _ = write!(line, " {}[{}..{}]", slot.key, slot.first_use, slot.last_use);
                }
                line
            })
            .collect();

        OptimizationReport {
            original_count: slots.len(),
            non_optimizable_count,
            optimized_count: all.len(),
            groups: all,
            timelines,
        }
    }
}
