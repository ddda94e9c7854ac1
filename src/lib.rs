#![warn(missing_docs)]

//! # `glasspane`
//!
//! Validation for player-drawn paths on Witness-style lattice panel puzzles.
//! Build a [`Puzzle`] of `width × height` blocks, let a generator or UI
//! assign element states and [`Rule`]s, submit a path with
//! [`set_solution`](Puzzle::set_solution), and call
//! [`check_for_errors`](Puzzle::check_for_errors) for the list of rule
//! violations. [`sectors`](Puzzle::sectors) exposes the underlying region
//! decomposition on its own.
//!
//! `glasspane` is deliberately a core: it does not render, persist, or
//! generate puzzles, and it does not enforce that a submitted path is
//! geometrically contiguous or simple. Those concerns belong to the
//! embedding application.
//!
//! # Internals
//!
//! The panel is an undirected lattice graph. Nodes, edges and blocks live
//! in dense arrays owned by the [`Puzzle`] and reference one another by
//! integer identifier; a [`petgraph`] graph map carries adjacency, so the
//! mutually-referencing structure has no ownership cycles. Nodes with
//! fewer than four incident edges are border nodes, which is the
//! classification the whole decomposition runs on.
//!
//! Sector decomposition works in two phases. Every excursion of the
//! solution line, a sub-path that leaves the border and returns to it, is
//! closed into a loop by walking back along the border, detouring through
//! any outline found earlier in the same call (with one bounded direction
//! reversal when the detour guesses wrong). Each closed outline is then
//! rasterized with a parity scanline over the panel's vertical edges, and
//! blocks no outline claims fall into a final catch-all sector. Per
//! sector, each attached rule decides pass or fail with the whole sector
//! as context and emits [`Error`] values; an [`Elimination`](Rule::Elimination)
//! rule in a sector flags that sector's errors as suppressed instead of
//! removing them.

pub use block::{Block, BlockId};
pub use color::Color;
pub use decompose::{Outline, OutlineHooks};
pub use edge::{Edge, EdgeId, EdgeState};
pub use node::{Node, NodeId, NodeState};
pub use puzzle::Puzzle;
pub use rules::{Error, ErrorSource, Rule};
pub use sector::Sector;

pub(crate) mod block;
pub(crate) mod color;
pub(crate) mod decompose;
pub(crate) mod edge;
pub(crate) mod node;
pub(crate) mod puzzle;
pub(crate) mod rules;
pub(crate) mod sector;
mod tests;
