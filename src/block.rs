use crate::color::Color;
use crate::node::NodeId;
use crate::rules::Rule;

/// Identifier of a unit block, row-major: `id = row * width + col`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockId(pub usize);

/// A unit grid cell bounded by four corner nodes. Carries at most one
/// [`Rule`]; everything else about its surroundings is derived through the
/// shared lattice.
#[derive(Copy, Clone, Debug)]
pub struct Block {
    id: BlockId,
    // top-left, top-right, bottom-left, bottom-right
    corners: [NodeId; 4],
    rule: Option<Rule>,
    color: Option<Color>,
}

impl Block {
    pub(crate) fn new(id: BlockId, corners: [NodeId; 4]) -> Self {
        Self {
            id,
            corners,
            rule: None,
            color: None,
        }
    }

    /// This block's identifier.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Corner nodes in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [NodeId; 4] {
        self.corners
    }

    /// The four corner pairs bounding this block, one per side.
    pub fn corner_pairs(&self) -> [(NodeId, NodeId); 4] {
        let [tl, tr, bl, br] = self.corners;
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }

    /// The rule attached to this block, if any.
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    /// Attach or clear this block's rule. Collaborator surface.
    pub fn set_rule(&mut self, rule: Option<Rule>) {
        self.rule = rule;
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
