use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::GpuImage;
use crate::error::NodeError;
use crate::resource::{Resource, ResourceRole};

use super::NodeType;

/// Resources bound to the declared slots of one runtime node.
#[derive(Debug)]
pub struct NodeBindings {
    node: String,
    node_type: NodeType,
    bound: BTreeMap<&'static str, Arc<Resource>>,
}

impl NodeBindings {
    pub fn new(node: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            node: node.into(),
            node_type,
            bound: BTreeMap::new(),
        }
    }

    /// Bind `resource` to slot `key` after checking the declaration.
    pub fn bind(&mut self, key: &str, resource: Arc<Resource>) -> bool {
        let Some(spec) = self.node_type.spec(key) else {
            log::warn!("{} has no slot named '{}'", self.node, key);
            return false;
        };
        if spec.resource_type != resource.resource_type() {
            log::warn!(
                "{}: slot '{}' expects {}, got {} ({})",
                self.node,
                key,
                spec.resource_type,
                resource.resource_type(),
                resource.name()
            );
            return false;
        }
        log::debug!("{}: bound '{}' to {}", self.node, key, resource.name());
        self.bound.insert(spec.name, resource);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Resource>> {
        self.bound.get(key)
    }

    pub fn is_bound(&self, key: &str) -> bool {
        self.bound.contains_key(key)
    }

    /// Bound resource of slot `key`.
    ///
    /// # Panics
    ///
    /// Panics if nothing is bound to `key`; nodes only ask for slots the
    /// compiler is required to bind.
    pub fn resource(&self, key: &str) -> &Arc<Resource> {
        match self.bound.get(key) {
            Some(resource) => resource,
            None => panic!("{} has no resource bound to '{}'", self.node, key),
        }
    }

    /// Bound resource of an optional slot, as an error when absent.
    pub fn require(&self, key: &str) -> Result<&Arc<Resource>, NodeError> {
        self.bound.get(key).ok_or_else(|| NodeError::MissingBinding {
            node: self.node.clone(),
            resource: key.to_string(),
        })
    }

    /// Image bound to slot `key`. Panics like [`resource`](Self::resource).
    pub fn image(&self, key: &str) -> &Arc<GpuImage> {
        self.resource(key).image()
    }

    /// Bound slots with the given role, in slot name order.
    pub fn with_role(&self, role: ResourceRole) -> impl Iterator<Item = (&'static str, &Arc<Resource>)> + '_ {
        let node_type = self.node_type;
        self.bound
            .iter()
            .filter(move |(key, _)| node_type.spec(key).is_some_and(|spec| spec.role == role))
            .map(|(key, resource)| (*key, resource))
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
