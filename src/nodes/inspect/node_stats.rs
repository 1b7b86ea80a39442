use crate::ChildMap;
use std::{fmt, mem};

/// Collects statistics over one or more nodes, like how many children they
/// hold and how much memory they occupy.
#[derive(Debug, Default)]
pub struct NodeStatsCollector {
    stats: NodeStats,
}

impl NodeStatsCollector {
    /// Create a collector with no nodes recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the stats of a single node.
    pub fn collect<C, V>(node: &ChildMap<C, V>) -> NodeStats {
        let mut collector = NodeStatsCollector::new();
        collector.add(node);
        collector.finish()
    }

    /// Record another node.
    pub fn add<C, V>(&mut self, node: &ChildMap<C, V>) {
        let stats = &mut self.stats;
        let num_children = node.len();

        stats.num_nodes += 1;
        stats.num_children += num_children;
        stats.num_terminals += usize::from(node.is_end_of_string());
        stats.num_values += usize::from(node.header.value().is_some());
        stats.max_fan_out = stats.max_fan_out.max(num_children);
        stats.fan_out_dist[num_children] += 1;

        let key_capacity = node.keys.capacity();
        let child_capacity = node.children.capacity();
        stats.inline_bytes += mem::size_of::<ChildMap<C, V>>();
        stats.heap_bytes += key_capacity * mem::size_of::<u8>();
        // Zero sized children report a capacity of `usize::MAX`
        if mem::size_of::<C>() != 0 {
            stats.heap_bytes += child_capacity * mem::size_of::<C>();
            stats.empty_capacity += child_capacity - num_children;
        }
        stats.empty_capacity += key_capacity - num_children;
    }

    /// Return the accumulated stats.
    pub fn finish(self) -> NodeStats {
        self.stats
    }
}

/// Statistics about a set of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStats {
    num_nodes: usize,
    num_children: usize,
    num_terminals: usize,
    num_values: usize,
    max_fan_out: usize,
    /// `fan_out_dist[n]` is the number of nodes with exactly `n` children
    fan_out_dist: [usize; 257],
    inline_bytes: usize,
    heap_bytes: usize,
    empty_capacity: usize,
}

impl Default for NodeStats {
    fn default() -> Self {
        NodeStats {
            num_nodes: 0,
            num_children: 0,
            num_terminals: 0,
            num_values: 0,
            max_fan_out: 0,
            fan_out_dist: [0; 257],
            inline_bytes: 0,
            heap_bytes: 0,
            empty_capacity: 0,
        }
    }
}

impl fmt::Display for NodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FanOut<'a>(&'a [usize; 257]);

        impl fmt::Debug for FanOut<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .iter()
                            .enumerate()
                            .filter(|(_, count)| **count != 0),
                    )
                    .finish()
            }
        }

        f.debug_struct("NodeStats")
            .field("num_nodes", &self.num_nodes)
            .field("num_children", &self.num_children)
            .field("num_terminals", &self.num_terminals)
            .field("num_values", &self.num_values)
            .field("max_fan_out", &self.max_fan_out)
            .field("mean_fan_out", &self.mean_fan_out())
            .field("fan_out", &FanOut(&self.fan_out_dist))
            .field("inline_bytes", &self.inline_bytes)
            .field("heap_bytes", &self.heap_bytes)
            .field("empty_capacity", &self.empty_capacity)
            .finish()
    }
}

impl NodeStats {
    /// Return the number of nodes recorded.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Return the total number of children over all nodes.
    pub fn num_children(&self) -> usize {
        self.num_children
    }

    /// Return the number of nodes marked as the end of a string.
    pub fn num_terminals(&self) -> usize {
        self.num_terminals
    }

    /// Return the number of nodes carrying a terminal value.
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// Return the largest number of children of a single node.
    pub fn max_fan_out(&self) -> usize {
        self.max_fan_out
    }

    /// Return the number of nodes that have exactly `num_children` children.
    pub fn nodes_with_fan_out(&self, num_children: usize) -> usize {
        self.fan_out_dist.get(num_children).copied().unwrap_or(0)
    }

    /// Return the mean number of children per node.
    pub fn mean_fan_out(&self) -> f64 {
        if self.num_nodes == 0 {
            0.0
        } else {
            self.num_children as f64 / self.num_nodes as f64
        }
    }

    /// Return the bytes occupied by the node structs themselves.
    pub fn inline_bytes(&self) -> usize {
        self.inline_bytes
    }

    /// Return the bytes allocated for keys and children.
    ///
    /// Memory owned by the children themselves (or by terminal values) is
    /// not counted.
    pub fn heap_bytes(&self) -> usize {
        self.heap_bytes
    }

    /// Return the total size of the nodes, inline and heap.
    pub fn total_bytes(&self) -> usize {
        self.inline_bytes + self.heap_bytes
    }

    /// Return the number of allocated but unused key and child slots.
    pub fn empty_capacity(&self) -> usize {
        self.empty_capacity
    }
}
