use unordered_pair::UnorderedPair;

use crate::color::Color;
use crate::node::NodeId;

/// Identifier of a lattice edge, in creation order.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(pub usize);

/// Passability and decoration state of an edge.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum EdgeState {
    /// Plain lattice edge.
    #[default]
    Normal,
    /// A hexagon dot; must be covered by the solution line.
    Marked,
    /// A cut edge the line cannot cross. Respected by collaborators when
    /// drawing the line; carries no rule of its own.
    Broken,
}

/// A lattice connection between two adjacent nodes. Identity is the
/// unordered endpoint pair; two nodes share at most one edge.
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    id: EdgeId,
    nodes: UnorderedPair<NodeId>,
    state: EdgeState,
    color: Option<Color>,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, a: NodeId, b: NodeId) -> Self {
        Self {
            id,
            nodes: UnorderedPair::from((a, b)),
            state: EdgeState::default(),
            color: None,
        }
    }

    /// This edge's identifier.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The two endpoint nodes.
    pub fn nodes(&self) -> UnorderedPair<NodeId> {
        self.nodes
    }

    /// Current state.
    pub fn state(&self) -> EdgeState {
        self.state
    }

    /// Assign a new state. Collaborator surface; unused by the core.
    pub fn set_state(&mut self, state: EdgeState) {
        self.state = state;
    }

    /// Optional decoration color.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Assign a decoration color.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }
}
