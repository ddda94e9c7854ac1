use std::collections::HashSet;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::block::{Block, BlockId};
use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId};
use crate::rules::Error;

/// Links two lattice-adjacent nodes, reusing the existing edge if the pair
/// is already connected. Linking is idempotent; every edge exists exactly
/// once regardless of how many blocks share it.
fn link(
    edges: &mut Vec<Edge>,
    adjacency: &mut UnGraphMap<NodeId, EdgeId>,
    a: NodeId,
    b: NodeId,
) -> EdgeId {
    if let Some(&existing) = adjacency.edge_weight(a, b) {
        return existing;
    }

    let id = EdgeId(edges.len());
    edges.push(Edge::new(id, a, b));
    adjacency.add_edge(a, b, id);
    id
}

/// A `width × height` block panel: the fixed lattice of nodes, edges and
/// blocks, plus the current solution line.
///
/// Topology is immutable after construction; collaborators mutate only
/// element state, rules and colors. All cross-references are integer
/// identifiers into dense arrays, so the mutually-referencing node/edge
/// graph carries no ownership cycles.
pub struct Puzzle {
    width: usize,
    height: usize,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    blocks: Vec<Block>,
    grid: Array2<BlockId>,
    adjacency: UnGraphMap<NodeId, EdgeId>,
    // Vertical edges only, in scanline order; the decomposer's parity
    // rasterization toggles on these.
    vertical_edges: Array2<EdgeId>,
    solution: Option<Vec<NodeId>>,
}

impl Puzzle {
    /// Build the full lattice for a panel of `width × height` blocks.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; that is a caller contract
    /// violation, not a recoverable condition.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "puzzle dimensions must be positive"
        );

        let node_count = (width + 1) * (height + 1);
        let edge_count = (width + 1) * height + width * (height + 1);
        let nodes = (0..node_count).map(|id| Node::new(NodeId(id))).collect_vec();

        let mut edges: Vec<Edge> = Vec::with_capacity(edge_count);
        let mut adjacency: UnGraphMap<NodeId, EdgeId> =
            UnGraphMap::with_capacity(node_count, edge_count);
        for node in &nodes {
            adjacency.add_node(node.id());
        }

        let node_at = |row: usize, col: usize| NodeId(row * (width + 1) + col);

        let mut blocks = Vec::with_capacity(width * height);
        let grid = Array2::from_shape_fn((height, width), |(row, col)| {
            let id = BlockId(row * width + col);
            let tl = node_at(row, col);
            let tr = node_at(row, col + 1);
            let bl = node_at(row + 1, col);
            let br = node_at(row + 1, col + 1);

            link(&mut edges, &mut adjacency, tl, tr);
            link(&mut edges, &mut adjacency, tr, br);
            link(&mut edges, &mut adjacency, br, bl);
            link(&mut edges, &mut adjacency, bl, tl);

            blocks.push(Block::new(id, [tl, tr, bl, br]));
            id
        });

        // All vertical edges already exist as block sides; this only indexes
        // them, in (row, col) scanline order.
        let vertical_edges = Array2::from_shape_fn((height, width + 1), |(row, col)| {
            link(
                &mut edges,
                &mut adjacency,
                node_at(row, col),
                node_at(row + 1, col),
            )
        });

        debug_assert_eq!(edges.len(), edge_count);

        Self {
            width,
            height,
            nodes,
            edges,
            blocks,
            grid,
            adjacency,
            vertical_edges,
            solution: None,
        }
    }

    /// Panel width in blocks.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Panel height in blocks.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All nodes, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, indexed by [`EdgeId`].
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All blocks, indexed by [`BlockId`].
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block grid, `(row, col)` indexed.
    pub fn grid(&self) -> &Array2<BlockId> {
        &self.grid
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable access to a node, for collaborators assigning state or color.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Look up an edge.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Mutable access to an edge, for collaborators assigning state or color.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    /// Look up a block.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    /// Mutable access to a block, for collaborators assigning rules or color.
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.0]
    }

    /// The edge connecting two nodes, if they are lattice-adjacent.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency.edge_weight(a, b).copied()
    }

    /// Lattice neighbors of a node, in the order their edges were created.
    pub(crate) fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.neighbors(id)
    }

    /// Number of edges incident to a node: 4 for interior nodes, less on
    /// the border.
    pub fn node_degree(&self, id: NodeId) -> usize {
        self.adjacency.neighbors(id).count()
    }

    /// Whether a node lies on the panel border.
    pub fn is_border_node(&self, id: NodeId) -> bool {
        self.node_degree(id) < 4
    }

    /// All nodes on the panel border, in identifier order.
    pub fn border_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| self.is_border_node(node.id()))
    }

    /// The node at the panel's top-left corner.
    pub fn top_left_node(&self) -> NodeId {
        NodeId(0)
    }

    /// The node at the panel's top-right corner.
    pub fn top_right_node(&self) -> NodeId {
        NodeId(self.width)
    }

    /// The node at the panel's bottom-left corner.
    pub fn bottom_left_node(&self) -> NodeId {
        NodeId(self.nodes.len() - self.width - 1)
    }

    /// The node at the panel's bottom-right corner.
    pub fn bottom_right_node(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    /// Replace the solution line with an ordered sequence of node ids.
    ///
    /// Returns `false` and leaves the previous solution untouched if any id
    /// is out of range. Adjacency between consecutive ids is deliberately
    /// not enforced; see [`solution_edges`](Self::solution_edges) for how
    /// non-adjacent pairs degrade.
    pub fn set_solution(&mut self, path: &[usize]) -> bool {
        if path.iter().any(|&id| id >= self.nodes.len()) {
            return false;
        }

        self.solution = Some(path.iter().map(|&id| NodeId(id)).collect());
        true
    }

    /// Remove the solution line, returning the panel to its undrawn state.
    pub fn clear_solution(&mut self) {
        self.solution = None;
    }

    /// The current solution line, if one is set.
    pub fn solution(&self) -> Option<&[NodeId]> {
        self.solution.as_deref()
    }

    /// Nodes of the solution line, in path order. Duplicates appear only if
    /// the path literally repeats an id.
    pub fn solution_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.solution
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|&id| self.node(id))
    }

    /// Edges of the solution line: every consecutive pair of path nodes
    /// mapped to its connecting edge. Pairs that are not lattice-adjacent
    /// have no edge and are skipped.
    pub fn solution_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.solution
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .copied()
            .tuple_windows()
            .filter_map(|(a, b)| self.edge_between(a, b))
            .map(|id| self.edge(id))
    }

    pub(crate) fn solution_node_set(&self) -> HashSet<NodeId> {
        self.solution.as_deref().unwrap_or(&[]).iter().copied().collect()
    }

    pub(crate) fn solution_edge_set(&self) -> HashSet<EdgeId> {
        self.solution_edges().map(Edge::id).collect()
    }

    /// Decompose the panel into sectors, evaluate every rule, and collect
    /// the violations. Sectors containing an elimination rule have all their
    /// violations flagged as eliminated rather than removed.
    ///
    /// Returns an empty list when no solution is set. Pure with respect to
    /// puzzle state: repeated calls without mutation agree.
    pub fn check_for_errors(&self) -> Vec<Error> {
        let mut errors = Vec::new();
        if self.solution.is_none() {
            return errors;
        }

        for sector in self.sectors() {
            let mut found = sector.check_errors(self);
            if sector.has_elimination(self) {
                for error in &mut found {
                    error.eliminate();
                }
            }
            errors.extend(found);
        }

        errors
    }

    pub(crate) fn vertical_edges(&self) -> &Array2<EdgeId> {
        &self.vertical_edges
    }
}
