//! Sector decomposition: converts the solution line into closed boundary
//! outlines and rasterizes those outlines into disjoint block sets.
//!
//! Outline extraction walks the solution line and records every excursion,
//! a sub-path that lifts off the border, travels through interior nodes and
//! returns to the border. Each excursion is closed into a loop by a second
//! walk back along the border; where that walk meets an outline discovered
//! earlier in the same call, it follows the other outline through the
//! interior instead of the border, guessing a direction and unwinding once
//! if the guess proves wrong. Rasterization then runs a parity scanline
//! over the vertical-edge index: only vertical edges flip the inside flag,
//! and every block left of a vertical edge while inside belongs to the
//! outline's sector.

use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, trace};
use ndarray::Array2;

use crate::edge::EdgeId;
use crate::node::NodeId;
use crate::puzzle::Puzzle;
use crate::sector::Sector;

/// A closed sector boundary: the node ring of one excursion plus its
/// border completion.
pub type Outline = Vec<NodeId>;

/// Strategy hooks over the outline list, run before and after extraction.
///
/// A collaborator can inject synthetic outlines (a mirrored secondary line,
/// say) so they act as extra sector boundaries, and remove them afterwards
/// so they never rasterize into sectors of their own. Injected outlines
/// must start at a border node.
#[derive(Default)]
pub struct OutlineHooks<'a> {
    /// Runs on the (empty) outline list before extraction.
    pub before: Option<&'a mut dyn FnMut(&mut Vec<Outline>)>,
    /// Runs on the complete outline list after extraction.
    pub after: Option<&'a mut dyn FnMut(&mut Vec<Outline>)>,
}

/// Walk state while scanning the solution line for excursions.
enum Walk {
    OnBorder,
    TracingExcursion(Outline),
}

/// Walk state while closing one excursion back to its starting node.
enum Closing {
    FollowingBorder,
    FollowingOtherOutline(Follow),
}

struct Follow {
    /// Index of the followed outline in the list discovered so far.
    outline: usize,
    /// Current position within the followed outline.
    index: usize,
    /// Position where the walk joined the outline; the unwind target.
    junction: usize,
    /// +1 to walk the outline forward, -1 backward.
    direction: isize,
    /// Whether the one allowed direction reversal has been spent.
    reversed: bool,
}

impl Puzzle {
    /// Split the panel's blocks into sectors using the current solution.
    ///
    /// The returned sectors partition the block set: with no solution (or
    /// no excursions) that is a single sector owning every block.
    pub fn sectors(&self) -> Vec<Sector> {
        self.sectors_with(OutlineHooks::default())
    }

    /// Like [`sectors`](Self::sectors), with caller-provided outline hooks.
    pub fn sectors_with(&self, mut hooks: OutlineHooks<'_>) -> Vec<Sector> {
        let outlines = self.sector_outlines(&mut hooks);

        let mut sectors = Vec::with_capacity(outlines.len() + 1);
        let mut claimed = Array2::from_elem((self.height(), self.width()), false);

        for outline in &outlines {
            let boundary: HashSet<EdgeId> = outline
                .iter()
                .copied()
                .circular_tuple_windows()
                .filter_map(|(a, b)| self.edge_between(a, b))
                .collect();

            let mut blocks = Vec::new();
            for row in 0..self.height() {
                // Parity toggle; resets every row so a malformed outline
                // cannot leak an open interval into the next row.
                let mut inside = false;
                for col in 0..=self.width() {
                    if inside {
                        blocks.push(self.grid()[(row, col - 1)]);
                        claimed[(row, col - 1)] = true;
                    }
                    if boundary.contains(&self.vertical_edges()[(row, col)]) {
                        inside = !inside;
                    }
                }
            }

            sectors.push(Sector::new(blocks));
        }

        let remainder = claimed
            .indexed_iter()
            .filter(|&(_, &claimed)| !claimed)
            .map(|(index, _)| self.grid()[index])
            .collect_vec();
        sectors.push(Sector::new(remainder));

        sectors
    }

    /// Extract one closed outline per excursion of the solution line.
    fn sector_outlines(&self, hooks: &mut OutlineHooks<'_>) -> Vec<Outline> {
        let mut outlines: Vec<Outline> = Vec::new();
        if let Some(before) = hooks.before.as_mut() {
            before(&mut outlines);
        }

        if let Some(path) = self.solution().filter(|path| path.len() > 1) {
            let mut walk = Walk::OnBorder;

            for i in 0..path.len() {
                let now = path[i];
                // At the end of the line, look backward so the final node
                // still has a well-defined companion.
                let next = if i + 1 < path.len() {
                    path[i + 1]
                } else {
                    path[i - 1]
                };

                walk = match walk {
                    Walk::OnBorder => {
                        if self.is_border_node(now) && !self.is_border_node(next) {
                            trace!("excursion lifts off at node {}", now.0);
                            Walk::TracingExcursion(vec![now])
                        } else {
                            Walk::OnBorder
                        }
                    }
                    Walk::TracingExcursion(mut outline) => {
                        if !self.is_border_node(now) {
                            outline.push(now);
                            Walk::TracingExcursion(outline)
                        } else {
                            self.close_outline(&outlines, &mut outline, now, next);
                            debug!("outline closed with {} nodes", outline.len());
                            outlines.push(outline);
                            // The same border node can immediately lift off
                            // into the next excursion.
                            if !self.is_border_node(next) {
                                trace!("excursion lifts off at node {}", now.0);
                                Walk::TracingExcursion(vec![now])
                            } else {
                                Walk::OnBorder
                            }
                        }
                    }
                };
            }
        }

        if let Some(after) = hooks.after.as_mut() {
            after(&mut outlines);
        }
        outlines
    }

    /// Complete the recorded lift-off arc into a closed loop, walking from
    /// the excursion's return node back to its start.
    ///
    /// `entry` is the border node the line returned to; `entry_prev` is its
    /// companion on the line, which the border walk must not double back
    /// towards. The walk follows the border, except that at any border node
    /// belonging to an earlier outline with an interior connection it
    /// switches onto that outline until it resurfaces at the border. A
    /// wrong direction guess along the other outline is detected when the
    /// resurfacing node is missing from the reference border arc, and is
    /// unwound exactly once per junction.
    fn close_outline(
        &self,
        outlines: &[Outline],
        current: &mut Outline,
        entry: NodeId,
        entry_prev: NodeId,
    ) {
        let start = *current.first().unwrap();
        // Reference arc along the border from entry back to the excursion
        // start; the "right way" the closing walk resurfaces onto.
        let right_way = self.border_arc(entry, entry_prev, start);

        let mut prev = entry_prev;
        let mut now = entry;
        let mut state = Closing::FollowingBorder;

        loop {
            current.push(now);

            match &mut state {
                Closing::FollowingBorder => {
                    if let Some(follow) = self.junction_at(outlines, now) {
                        trace!(
                            "following outline {} from index {}, direction {}",
                            follow.outline,
                            follow.index,
                            follow.direction
                        );
                        state = Closing::FollowingOtherOutline(follow);
                    }
                }
                Closing::FollowingOtherOutline(follow) => {
                    let line = &outlines[follow.outline];
                    let at_end = (follow.index == 0 && follow.direction < 0)
                        || (follow.index == line.len() - 1 && follow.direction > 0);

                    if self.is_border_node(now) || at_end {
                        match right_way.iter().position(|&n| n == now) {
                            Some(found) => {
                                // Resurfaced; resume the border walk as if
                                // it had never been interrupted.
                                prev = if found == 0 {
                                    entry_prev
                                } else {
                                    right_way[found - 1]
                                };
                                state = Closing::FollowingBorder;
                            }
                            None => {
                                assert!(
                                    !follow.reversed,
                                    "outline closing required a second reversal at one junction"
                                );
                                let unwound = follow.index.abs_diff(follow.junction);
                                debug!(
                                    "wrong direction along outline {}; unwinding {} nodes",
                                    follow.outline, unwound
                                );
                                current.truncate(current.len() - unwound);
                                follow.index = follow.junction;
                                follow.direction = -follow.direction;
                                follow.reversed = true;
                            }
                        }
                    }
                }
            }

            let next = match &mut state {
                Closing::FollowingBorder => self.border_step(now, prev),
                Closing::FollowingOtherOutline(follow) => {
                    follow.index = follow.index.checked_add_signed(follow.direction).unwrap();
                    outlines[follow.outline][follow.index]
                }
            };

            if next == start {
                break;
            }
            prev = now;
            now = next;
        }
    }

    /// Whether `now` joins an earlier outline: it must appear in the
    /// outline with an interior node next to it, otherwise the walk is
    /// merely crossing the outline's border arc and stays on the border.
    fn junction_at(&self, outlines: &[Outline], now: NodeId) -> Option<Follow> {
        for (j, line) in outlines.iter().enumerate() {
            let Some(index) = line.iter().position(|&n| n == now) else {
                continue;
            };

            let prev_interior = index > 0 && !self.is_border_node(line[index - 1]);
            let next_interior =
                index + 1 < line.len() && !self.is_border_node(line[index + 1]);
            if !prev_interior && !next_interior {
                continue;
            }

            // Move towards the interior; the wrap probe can guess wrong,
            // which the caller detects and reverses.
            let forward = (index + 1) % line.len();
            let direction = if self.is_border_node(line[forward]) { -1 } else { 1 };

            return Some(Follow {
                outline: j,
                index,
                junction: index,
                direction,
                reversed: false,
            });
        }

        None
    }

    /// The border nodes from `from` up to but excluding `to`, stepping away
    /// from `from_prev`.
    fn border_arc(&self, from: NodeId, from_prev: NodeId, to: NodeId) -> Vec<NodeId> {
        let mut arc = Vec::new();
        let mut prev = from_prev;
        let mut now = from;

        loop {
            arc.push(now);
            let next = self.border_step(now, prev);
            if next == to {
                break;
            }
            prev = now;
            now = next;
        }

        arc
    }

    /// The unique next border node that is neither where the walk stands
    /// nor where it came from.
    fn border_step(&self, now: NodeId, prev: NodeId) -> NodeId {
        self.neighbors(now)
            .find(|&n| n != prev && n != now && self.is_border_node(n))
            .unwrap()
    }
}
