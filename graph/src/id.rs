//! Stable identifiers for nodes, resources and edges.
//!
//! Identifiers come from a per-graph [`IdGenerator`]. The counter is
//! monotonic and starts at 1, so ascending id order equals insertion order
//! and two graphs built the same way get the same ids.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Create an id from a raw value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            pub const fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a node in an editor graph.
    NodeId,
    "node#"
);
define_id!(
    /// Identifier of a resource description on an editor node.
    ResourceId,
    "resource#"
);
define_id!(
    /// Identifier of an edge in an editor graph.
    EdgeId,
    "edge#"
);

/// Monotonic id allocator owned by a graph.
///
/// Nodes, resources and edges draw from one counter so that no two objects
/// in the same graph share a raw id.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose first id is 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Allocate a node id.
    pub fn next_node_id(&mut self) -> NodeId {
        NodeId(self.bump())
    }

    /// Allocate a resource id.
    pub fn next_resource_id(&mut self) -> ResourceId {
        ResourceId(self.bump())
    }

    /// Allocate an edge id.
    pub fn next_edge_id(&mut self) -> EdgeId {
        EdgeId(self.bump())
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
