use crate::color::Color;

/// Identifier of a lattice node, row-major: `id = row * (width + 1) + col`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub usize);

/// Role of a node on the panel. Collaborators (generator, UI) assign these;
/// the core reads only `Marked`.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum NodeState {
    /// Plain lattice vertex.
    #[default]
    None,
    /// A point where the solution line may begin.
    Start,
    /// A point where the solution line may end.
    Exit,
    /// A hexagon dot; must be covered by the solution line.
    Marked,
}

/// A lattice vertex. Incident edges and the border/interior classification
/// are derived from the puzzle's adjacency graph, not stored here.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    id: NodeId,
    state: NodeState,
    color: Option<Color>,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            state: NodeState::default(),
            color: None,
        }
    }

    /// This node's identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Assign a new state. Collaborator surface; unused by the core.
    pub fn set_state(&mut self, state: NodeState) {
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
