use std::collections::BTreeMap;

use crate::block::BlockId;
use crate::color::Color;
use crate::edge::EdgeId;
use crate::node::NodeId;
use crate::puzzle::Puzzle;
use crate::sector::Sector;

/// A per-region constraint attached to a block.
///
/// The rule set is fixed and closed, so dispatch is a plain `match` in
/// [`evaluate`](Rule::evaluate) rather than trait objects.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Rule {
    /// Every colored square within a sector must share one color.
    ColoredSquare(Color),
    /// Suns of a color must pair up, two by two, within their sector.
    SunPair(Color),
    /// Exactly this many of the block's boundary edges must lie on the
    /// solution line.
    Triangle(u8),
    /// Validates nothing itself; suppresses every other error raised in its
    /// sector during aggregation.
    Elimination,
}

impl Rule {
    /// Evaluate this rule for the block carrying it, in the context of the
    /// sector that block belongs to. Returns zero or more violations.
    pub fn evaluate(&self, block: BlockId, sector: &Sector, puzzle: &Puzzle) -> Vec<Error> {
        match *self {
            Self::ColoredSquare(color) => {
                if dominant_square_color(sector, puzzle) == Some(color) {
                    Vec::new()
                } else {
                    vec![Error::new(ErrorSource::Block(block))]
                }
            }
            Self::SunPair(color) => {
                let matching = sector
                    .blocks()
                    .iter()
                    .filter(|&&id| puzzle.block(id).rule() == Some(Self::SunPair(color)))
                    .count();
                if matching % 2 == 0 {
                    Vec::new()
                } else {
                    vec![Error::new(ErrorSource::Block(block))]
                }
            }
            Self::Triangle(power) => {
                let on_path = puzzle.solution_edge_set();
                let covered = puzzle
                    .block(block)
                    .corner_pairs()
                    .iter()
                    .filter_map(|&(a, b)| puzzle.edge_between(a, b))
                    .filter(|id| on_path.contains(id))
                    .count();
                if covered == usize::from(power) {
                    Vec::new()
                } else {
                    vec![Error::new(ErrorSource::Block(block))]
                }
            }
            Self::Elimination => Vec::new(),
        }
    }
}

/// The color shared by the most colored squares in the sector. Ties go to
/// the color earliest in the palette, so evaluation is deterministic.
fn dominant_square_color(sector: &Sector, puzzle: &Puzzle) -> Option<Color> {
    let mut counts: BTreeMap<Color, usize> = BTreeMap::new();
    for &id in sector.blocks() {
        if let Some(Rule::ColoredSquare(color)) = puzzle.block(id).rule() {
            *counts.entry(color).or_default() += 1;
        }
    }

    let mut dominant = None;
    let mut best = 0;
    for (color, count) in counts {
        if count > best {
            dominant = Some(color);
            best = count;
        }
    }
    dominant
}

/// The graph element a violation points at.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ErrorSource {
    /// A lattice vertex, e.g. an uncovered marked node.
    Node(NodeId),
    /// A lattice edge, e.g. an uncovered marked edge.
    Edge(EdgeId),
    /// A block whose rule failed.
    Block(BlockId),
}

/// A single constraint violation. Produced fresh on every check; only the
/// elimination flag is ever changed after creation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
    source: ErrorSource,
    is_eliminated: bool,
}

impl Error {
    pub(crate) fn new(source: ErrorSource) -> Self {
        Self {
            source,
            is_eliminated: false,
        }
    }

    /// The element this violation points at.
    pub fn source(&self) -> ErrorSource {
        self.source
    }

    /// Whether an elimination rule in the same sector downgraded this
    /// violation. Suppressed violations stay in the result list.
    pub fn is_eliminated(&self) -> bool {
        self.is_eliminated
    }

    pub(crate) fn eliminate(&mut self) {
        self.is_eliminated = true;
    }
}
