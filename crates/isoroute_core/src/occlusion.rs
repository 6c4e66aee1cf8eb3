//! Occlusion graph and topological sequencer
//!
//! For every pair of blocks whose projected bounding boxes overlap, exactly
//! one directed `BehindOf` edge is recorded: the block with the higher depth
//! score must be painted no later than the one in front of it. Linearizing
//! the graph yields the painter's-algorithm draw order; a cycle means no
//! valid order exists and is reported, never papered over.
//!
//! The graph is a transient view: built from the rotated block set inside a
//! single draw call and discarded afterwards.

use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::cmp::Reverse;
use std::fmt;

use log::{debug, trace};

use crate::block::{Block, BlockId};
use crate::bounds::BoundingBox;

/// No linear extension exists: the named blocks form an occlusion cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleError {
    /// Identities of the blocks on one concrete cycle, in edge order
    pub cycle: Vec<BlockId>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "occlusion cycle between blocks [")?;
        for (i, id) in self.cycle.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for CycleError {}

/// Directed graph of `BehindOf` relations over block identities
///
/// Nodes are unique block identities in first-appearance order; blocks with
/// the same origin and extents collapse into one node. An edge `u -> v`
/// means `u` must be painted no later than `v`.
pub struct OcclusionGraph {
    ids: Vec<BlockId>,
    index: HashMap<BlockId, usize>,
    /// Adjacency `behind -> fronts`, kept sorted for deterministic walks
    edges: Vec<Vec<usize>>,
}

impl Default for OcclusionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl OcclusionGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Build the graph for a set of blocks
    ///
    /// Every pair of blocks with overlapping bounding boxes contributes one
    /// edge, directed by the depth tie-break: the pair member with the
    /// greater-or-equal score is behind.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut graph = Self::new();
        let mut boxes: Vec<BoundingBox> = Vec::new();

        for block in blocks {
            let bbox = BoundingBox::of_solid(block.solid());
            let node = graph.add_node(block.id());
            if node == boxes.len() {
                boxes.push(bbox);
            } else {
                // Same identity seen again: the node covers both solids.
                boxes[node] = boxes[node].merged(bbox);
            }
        }

        for a in 0..boxes.len() {
            for b in (a + 1)..boxes.len() {
                if !boxes[a].overlaps(&boxes[b]) {
                    continue;
                }
                // Lower depth score is in front; ties leave the
                // later-inserted node in front.
                if boxes[a].depth() >= boxes[b].depth() {
                    graph.add_edge(a, b);
                } else {
                    graph.add_edge(b, a);
                }
                trace!(
                    "behind-of: {} -> {} (depths {} vs {})",
                    graph.ids[a],
                    graph.ids[b],
                    boxes[a].depth(),
                    boxes[b].depth()
                );
            }
        }

        debug!(
            "occlusion graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Add a node, returning its index; an already-known identity returns
    /// the existing index
    pub fn add_node(&mut self, id: BlockId) -> usize {
        match self.index.entry(id.clone()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let idx = self.ids.len();
                e.insert(idx);
                self.ids.push(id);
                self.edges.push(Vec::new());
                idx
            }
        }
    }

    /// Record that `behind` must be painted no later than `front`
    pub fn add_edge(&mut self, behind: usize, front: usize) {
        let fronts = &mut self.edges[behind];
        if let Err(pos) = fronts.binary_search(&front) {
            fronts.insert(pos, front);
        }
    }

    /// Identity of the node at `index`
    pub fn id(&self, index: usize) -> &BlockId {
        &self.ids[index]
    }

    /// Node index of an identity, if present
    pub fn node_of(&self, id: &BlockId) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Linearize the graph into a draw order
    ///
    /// Returns node indices such that for every edge `u -> v`, `u` appears
    /// no later than `v`. Nodes with no constraints between them keep their
    /// insertion order, so repeated runs over an unchanged scene are
    /// reproducible. On a cycle, returns the identities of one concrete
    /// cycle instead of guessing an order.
    pub fn sequence(&self) -> Result<Vec<usize>, CycleError> {
        let n = self.node_count();
        let mut indegree = vec![0usize; n];
        for fronts in &self.edges {
            for &front in fronts {
                indegree[front] += 1;
            }
        }

        // Kahn's algorithm; the ready set is drained lowest-insertion-index
        // first to keep unconstrained nodes in their original order.
        let mut ready: BinaryHeap<Reverse<usize>> = indegree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for &front in &self.edges[node] {
                indegree[front] -= 1;
                if indegree[front] == 0 {
                    ready.push(Reverse(front));
                }
            }
        }

        if order.len() == n {
            Ok(order)
        } else {
            Err(self.find_cycle(&indegree))
        }
    }

    /// Extract one concrete cycle from the nodes Kahn's algorithm could not
    /// sequence
    ///
    /// Stuck nodes that cannot reach another stuck node are peeled off
    /// first; they hang downstream of a cycle without being on one. Every
    /// remaining node then has a stuck successor, so walking successor to
    /// successor must revisit a node on the current path. Successors are
    /// tried in insertion order, making the reported cycle deterministic.
    fn find_cycle(&self, indegree: &[usize]) -> CycleError {
        let mut stuck: Vec<bool> = indegree.iter().map(|&d| d > 0).collect();
        loop {
            let mut changed = false;
            for node in 0..self.node_count() {
                if stuck[node] && !self.edges[node].iter().any(|&f| stuck[f]) {
                    stuck[node] = false;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        let start = stuck
            .iter()
            .position(|&s| s)
            .expect("find_cycle called without stuck nodes");

        let mut on_path = vec![false; self.node_count()];
        let mut path = vec![start];
        on_path[start] = true;

        loop {
            let node = *path.last().expect("path never empties");
            let next = self.edges[node]
                .iter()
                .copied()
                .find(|&f| stuck[f])
                .expect("peeled nodes always keep a stuck successor");
            if on_path[next] {
                let from = path.iter().position(|&p| p == next).expect("on-path node");
                let cycle = path[from..].iter().map(|&i| self.ids[i].clone()).collect();
                return CycleError { cycle };
            }
            on_path[next] = true;
            path.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoroute_math::Point3;

    fn unit(x: f64, y: f64, z: f64) -> Block {
        Block::unit(Point3::new(x, y, z))
    }

    fn id_of(x: f64, y: f64, z: f64) -> BlockId {
        unit(x, y, z).id()
    }

    #[test]
    fn test_stack_orders_lower_first() {
        let blocks = vec![unit(0.0, 0.0, 1.0), unit(0.0, 0.0, 0.0)];
        let graph = OcclusionGraph::from_blocks(&blocks);
        assert_eq!(graph.edge_count(), 1);
        let order = graph.sequence().unwrap();
        let ids: Vec<&BlockId> = order.iter().map(|&i| graph.id(i)).collect();
        // The lower block is behind and painted first.
        assert_eq!(*ids[0], id_of(0.0, 0.0, 0.0));
        assert_eq!(*ids[1], id_of(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_disjoint_blocks_keep_insertion_order() {
        let blocks = vec![unit(8.0, 8.0, 0.0), unit(0.0, 0.0, 0.0)];
        let graph = OcclusionGraph::from_blocks(&blocks);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.sequence().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_edge_direction_is_deterministic() {
        let blocks = vec![unit(0.0, 0.0, 0.0), unit(1.0, 0.0, 0.0)];
        let first = OcclusionGraph::from_blocks(&blocks);
        for _ in 0..10 {
            let again = OcclusionGraph::from_blocks(&blocks);
            assert_eq!(again.sequence().unwrap(), first.sequence().unwrap());
        }
    }

    #[test]
    fn test_duplicate_identities_collapse() {
        let blocks = vec![unit(0.0, 0.0, 0.0), unit(0.0, 0.0, 0.0)];
        let graph = OcclusionGraph::from_blocks(&blocks);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_sequence_is_linear_extension() {
        // A 3-long track with a column on top of its middle block.
        let blocks = vec![
            unit(0.0, 0.0, 0.0),
            unit(1.0, 0.0, 0.0),
            unit(2.0, 0.0, 0.0),
            unit(1.0, 0.0, 1.0),
            unit(1.0, 0.0, 2.0),
        ];
        let graph = OcclusionGraph::from_blocks(&blocks);
        let order = graph.sequence().unwrap();
        let pos: HashMap<usize, usize> =
            order.iter().enumerate().map(|(p, &n)| (n, p)).collect();
        for behind in 0..graph.node_count() {
            for &front in &graph.edges[behind] {
                assert!(
                    pos[&behind] <= pos[&front],
                    "edge {} -> {} violated",
                    graph.id(behind),
                    graph.id(front)
                );
            }
        }
    }

    #[test]
    fn test_three_cycle_is_reported() {
        let mut graph = OcclusionGraph::new();
        let a = graph.add_node(id_of(0.0, 0.0, 0.0));
        let b = graph.add_node(id_of(1.0, 0.0, 0.0));
        let c = graph.add_node(id_of(2.0, 0.0, 0.0));
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.add_edge(c, a);

        let err = graph.sequence().unwrap_err();
        assert_eq!(err.cycle.len(), 3);
        assert!(err.cycle.contains(&id_of(0.0, 0.0, 0.0)));
        assert!(err.cycle.contains(&id_of(1.0, 0.0, 0.0)));
        assert!(err.cycle.contains(&id_of(2.0, 0.0, 0.0)));
        assert!(err.to_string().contains("occlusion cycle"));
    }

    #[test]
    fn test_cycle_excludes_downstream_nodes() {
        // d hangs off the cycle but is not part of it.
        let mut graph = OcclusionGraph::new();
        let a = graph.add_node(id_of(0.0, 0.0, 0.0));
        let b = graph.add_node(id_of(1.0, 0.0, 0.0));
        let d = graph.add_node(id_of(3.0, 0.0, 0.0));
        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(b, d);

        let err = graph.sequence().unwrap_err();
        assert_eq!(err.cycle.len(), 2);
        assert!(!err.cycle.contains(&id_of(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_cycle_found_past_dead_end_successor() {
        // The cycle's lowest-index successor is a dead end; the walk must
        // not follow it off the cycle.
        let mut graph = OcclusionGraph::new();
        let a = graph.add_node(id_of(0.0, 0.0, 0.0));
        let b = graph.add_node(id_of(1.0, 0.0, 0.0));
        let c = graph.add_node(id_of(2.0, 0.0, 0.0));
        graph.add_edge(b, a);
        graph.add_edge(b, c);
        graph.add_edge(c, b);

        let err = graph.sequence().unwrap_err();
        assert_eq!(err.cycle.len(), 2);
        assert!(err.cycle.contains(&id_of(1.0, 0.0, 0.0)));
        assert!(err.cycle.contains(&id_of(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_unrelated_nodes_sequence_around_constraints() {
        let mut graph = OcclusionGraph::new();
        let a = graph.add_node(id_of(0.0, 0.0, 0.0));
        let b = graph.add_node(id_of(1.0, 0.0, 0.0));
        let c = graph.add_node(id_of(2.0, 0.0, 0.0));
        graph.add_edge(c, a);
        // b is unconstrained and stays in insertion position where possible.
        assert_eq!(graph.sequence().unwrap(), vec![b, c, a]);
    }
}
