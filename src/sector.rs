use std::collections::BTreeSet;

use crate::block::BlockId;
use crate::edge::{EdgeId, EdgeState};
use crate::node::{NodeId, NodeState};
use crate::puzzle::Puzzle;
use crate::rules::{Error, ErrorSource, Rule};

/// A maximal region of blocks enclosed by the solution line and/or the
/// panel border. Sectors are produced transiently by one decomposition call
/// and together partition the block set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sector {
    blocks: Vec<BlockId>,
}

impl Sector {
    pub(crate) fn new(blocks: Vec<BlockId>) -> Self {
        Self { blocks }
    }

    /// The blocks owned by this sector, in scanline order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Whether this sector owns the given block.
    pub fn contains(&self, block: BlockId) -> bool {
        self.blocks.contains(&block)
    }

    /// All corner nodes of this sector's blocks, deduplicated and ordered.
    pub fn nodes(&self, puzzle: &Puzzle) -> BTreeSet<NodeId> {
        self.blocks
            .iter()
            .flat_map(|&id| puzzle.block(id).corners())
            .collect()
    }

    /// All boundary edges of this sector's blocks, deduplicated and ordered.
    pub fn edges(&self, puzzle: &Puzzle) -> BTreeSet<EdgeId> {
        self.blocks
            .iter()
            .flat_map(|&id| puzzle.block(id).corner_pairs())
            .map(|(a, b)| {
                // the constructor links all four sides of every block
                puzzle.edge_between(a, b).unwrap()
            })
            .collect()
    }

    /// Whether any block in this sector carries an elimination rule.
    pub fn has_elimination(&self, puzzle: &Puzzle) -> bool {
        self.blocks
            .iter()
            .any(|&id| puzzle.block(id).rule() == Some(Rule::Elimination))
    }

    /// Evaluate every rule owned by this sector and check marked-element
    /// coverage. Elimination flagging is the aggregator's job, not done here.
    pub fn check_errors(&self, puzzle: &Puzzle) -> Vec<Error> {
        let mut errors = Vec::new();

        for &id in &self.blocks {
            if let Some(rule) = puzzle.block(id).rule() {
                errors.extend(rule.evaluate(id, self, puzzle));
            }
        }

        let on_path_nodes = puzzle.solution_node_set();
        let on_path_edges = puzzle.solution_edge_set();

        for id in self.nodes(puzzle) {
            if puzzle.node(id).state() == NodeState::Marked && !on_path_nodes.contains(&id) {
                errors.push(Error::new(ErrorSource::Node(id)));
            }
        }
        for id in self.edges(puzzle) {
            if puzzle.edge(id).state() == EdgeState::Marked && !on_path_edges.contains(&id) {
                errors.push(Error::new(ErrorSource::Edge(id)));
            }
        }

        errors
    }
}
