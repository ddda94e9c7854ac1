#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use strum::VariantArray;

    use crate::block::BlockId;
    use crate::color::Color;
    use crate::decompose::{Outline, OutlineHooks};
    use crate::edge::EdgeState;
    use crate::node::{NodeId, NodeState};
    use crate::puzzle::Puzzle;
    use crate::rules::{ErrorSource, Rule};
    use crate::sector::Sector;

    fn block_sets(sectors: &[Sector]) -> Vec<Vec<usize>> {
        sectors
            .iter()
            .map(|sector| {
                let mut blocks = sector.blocks().iter().map(|b| b.0).collect::<Vec<_>>();
                blocks.sort_unstable();
                blocks
            })
            .collect()
    }

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().map(|&id| NodeId(id)).collect()
    }

    /// A simple top-to-bottom path: enter at `(0, cols[0])`, and for each
    /// block row move down one edge, then horizontally to the next column.
    fn staircase(w: usize, h: usize, cols: &[usize]) -> Vec<usize> {
        let id = |row: usize, col: usize| row * (w + 1) + col;
        let mut col = cols[0];
        let mut path = vec![id(0, col)];

        for row in 1..=h {
            path.push(id(row, col));
            while col != cols[row] {
                col = if col < cols[row] { col + 1 } else { col - 1 };
                path.push(id(row, col));
            }
        }

        path
    }

    #[test]
    fn lattice_counts() {
        for (w, h) in [(1, 1), (2, 1), (1, 2), (2, 2), (4, 3), (7, 7)] {
            let puzzle = Puzzle::new(w, h);
            assert_eq!(puzzle.nodes().len(), (w + 1) * (h + 1));
            assert_eq!(puzzle.edges().len(), (w + 1) * h + w * (h + 1));
            assert_eq!(puzzle.blocks().len(), w * h);
            assert_eq!(puzzle.grid().dim(), (h, w));
        }
    }

    #[test]
    fn blocks_have_distinct_connected_corners() {
        let puzzle = Puzzle::new(4, 3);
        for block in puzzle.blocks() {
            let corners = block.corners();
            for (i, a) in corners.iter().enumerate() {
                for b in &corners[i + 1..] {
                    assert_ne!(a, b);
                }
            }
            for (a, b) in block.corner_pairs() {
                assert!(puzzle.edge_between(a, b).is_some());
            }
        }
    }

    #[test]
    fn border_classification() {
        let puzzle = Puzzle::new(3, 2);
        // all but the (w - 1) * (h - 1) interior nodes sit on the border
        assert_eq!(puzzle.border_nodes().count(), 4 * 3 - 2);
        assert!(puzzle.is_border_node(NodeId(0)));
        assert!(puzzle.is_border_node(NodeId(4)));
        assert!(!puzzle.is_border_node(NodeId(5)));
        assert_eq!(puzzle.node_degree(NodeId(5)), 4);
    }

    #[test]
    fn corner_accessors() {
        let puzzle = Puzzle::new(3, 2);
        assert_eq!(puzzle.top_left_node(), NodeId(0));
        assert_eq!(puzzle.top_right_node(), NodeId(3));
        assert_eq!(puzzle.bottom_left_node(), NodeId(8));
        assert_eq!(puzzle.bottom_right_node(), NodeId(11));
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let mut puzzle = Puzzle::new(1, 1);
        assert!(!puzzle.set_solution(&[5]));
        assert!(puzzle.solution().is_none());
        assert!(puzzle.check_for_errors().is_empty());

        assert!(puzzle.set_solution(&[0, 1, 3]));
        assert!(!puzzle.set_solution(&[0, 4]));
        assert_eq!(puzzle.solution(), Some(ids(&[0, 1, 3]).as_slice()));
    }

    #[test]
    fn no_solution_yields_single_sector_and_no_errors() {
        let puzzle = Puzzle::new(3, 2);
        assert!(puzzle.check_for_errors().is_empty());

        let sectors = puzzle.sectors();
        assert_eq!(block_sets(&sectors), vec![vec![0, 1, 2, 3, 4, 5]]);
    }

    #[test]
    fn trivial_panel_with_valid_path() {
        let mut puzzle = Puzzle::new(1, 1);
        assert_eq!(puzzle.nodes().len(), 4);
        assert_eq!(puzzle.edges().len(), 4);
        assert_eq!(puzzle.blocks().len(), 1);

        assert!(puzzle.set_solution(&[0, 1, 3]));
        assert_eq!(puzzle.solution_nodes().count(), 3);
        assert_eq!(puzzle.solution_edges().count(), 2);
        assert!(puzzle.check_for_errors().is_empty());
    }

    #[test]
    fn single_excursion_splits_off_one_sector() {
        let mut puzzle = Puzzle::new(2, 2);
        assert!(puzzle.set_solution(&[1, 4, 3]));

        let sectors = puzzle.sectors();
        assert_eq!(block_sets(&sectors), vec![vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn closing_walk_follows_earlier_outline() {
        // The second excursion's border completion passes the first
        // excursion's lift-off node and must trace through its interior
        // arc rather than along the border behind it.
        let mut puzzle = Puzzle::new(3, 2);
        assert!(puzzle.set_solution(&[4, 5, 1, 2, 6, 10]));

        let sectors = puzzle.sectors();
        assert_eq!(
            block_sets(&sectors),
            vec![vec![0], vec![1, 3, 4], vec![2, 5]]
        );
    }

    #[test]
    fn injected_outline_forces_direction_backtrack() {
        // A synthetic secondary line joined at node 2 reads as forward
        // towards its interior, but the forward end (node 13) is nowhere on
        // the reference border arc, so the closing walk must unwind and
        // leave through node 3 instead.
        let mut puzzle = Puzzle::new(3, 3);
        assert!(puzzle.set_solution(&[7, 6, 5, 1, 0]));

        let mut captured: Vec<Outline> = Vec::new();
        let mut before = |lines: &mut Vec<Outline>| {
            lines.push(ids(&[3, 2, 6, 5, 9, 13]));
        };
        let mut after = |lines: &mut Vec<Outline>| {
            captured = lines.clone();
            // the secondary line only shapes other outlines; it gets no
            // sector of its own
            lines.remove(0);
        };

        let sectors = puzzle.sectors_with(OutlineHooks {
            before: Some(&mut before),
            after: Some(&mut after),
        });

        assert_eq!(captured.len(), 2);
        assert_eq!(captured[1], ids(&[7, 6, 5, 1, 2, 3]));
        assert_eq!(
            block_sets(&sectors),
            vec![vec![1, 2], vec![0, 3, 4, 5, 6, 7, 8]]
        );
    }

    #[test]
    fn triangle_counts_covered_boundary_edges() {
        let mut puzzle = Puzzle::new(1, 1);
        let block = puzzle.grid()[(0, 0)];
        puzzle.block_mut(block).set_rule(Some(Rule::Triangle(2)));

        // one covered boundary edge, power two
        assert!(puzzle.set_solution(&[0, 1]));
        let errors = puzzle.check_for_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source(), ErrorSource::Block(block));
        assert!(!errors[0].is_eliminated());

        // two covered boundary edges satisfy it
        assert!(puzzle.set_solution(&[0, 1, 3]));
        assert!(puzzle.check_for_errors().is_empty());
    }

    #[test]
    fn elimination_suppresses_errors_in_its_sector() {
        let mut puzzle = Puzzle::new(2, 1);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::Triangle(2)));
        puzzle.block_mut(BlockId(1)).set_rule(Some(Rule::Elimination));
        assert!(puzzle.set_solution(&[0, 1]));

        let errors = puzzle.check_for_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source(), ErrorSource::Block(BlockId(0)));
        assert!(errors[0].is_eliminated());
    }

    #[test]
    fn colored_squares_must_agree_within_sector() {
        let mut puzzle = Puzzle::new(2, 2);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::ColoredSquare(Color::Black)));
        puzzle
            .block_mut(BlockId(1))
            .set_rule(Some(Rule::ColoredSquare(Color::White)));
        puzzle
            .block_mut(BlockId(2))
            .set_rule(Some(Rule::ColoredSquare(Color::White)));
        puzzle
            .block_mut(BlockId(3))
            .set_rule(Some(Rule::ColoredSquare(Color::Red)));
        // splits {0} from {1, 2, 3}
        assert!(puzzle.set_solution(&[1, 4, 3]));

        let errors = puzzle.check_for_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source(), ErrorSource::Block(BlockId(3)));
    }

    #[test]
    fn colored_square_ties_break_by_palette_order() {
        let mut puzzle = Puzzle::new(2, 1);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::ColoredSquare(Color::Red)));
        puzzle
            .block_mut(BlockId(1))
            .set_rule(Some(Rule::ColoredSquare(Color::Black)));
        assert!(puzzle.set_solution(&[0, 1]));

        // one of each; Black precedes Red in the palette, so the red
        // square is the non-conforming one
        let errors = puzzle.check_for_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source(), ErrorSource::Block(BlockId(0)));
    }

    #[test]
    fn suns_pair_by_color_within_sector() {
        let mut puzzle = Puzzle::new(2, 2);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::SunPair(Color::Blue)));
        puzzle
            .block_mut(BlockId(1))
            .set_rule(Some(Rule::SunPair(Color::Yellow)));
        puzzle
            .block_mut(BlockId(2))
            .set_rule(Some(Rule::SunPair(Color::Yellow)));
        puzzle
            .block_mut(BlockId(3))
            .set_rule(Some(Rule::SunPair(Color::Red)));
        assert!(puzzle.set_solution(&[1, 4, 3]));

        // blue is alone in {0}; the yellows pair up in {1, 2, 3} but the
        // red sun has no partner
        let sources = puzzle
            .check_for_errors()
            .iter()
            .map(|e| e.source())
            .collect::<Vec<_>>();
        assert_eq!(
            sources,
            vec![
                ErrorSource::Block(BlockId(0)),
                ErrorSource::Block(BlockId(3))
            ]
        );
    }

    #[test]
    fn marked_elements_must_be_covered() {
        let mut puzzle = Puzzle::new(2, 2);
        let uncovered_edge = puzzle.edge_between(NodeId(0), NodeId(1)).unwrap();
        let covered_edge = puzzle.edge_between(NodeId(1), NodeId(4)).unwrap();
        puzzle.edge_mut(uncovered_edge).set_state(EdgeState::Marked);
        puzzle.edge_mut(covered_edge).set_state(EdgeState::Marked);
        puzzle.node_mut(NodeId(2)).set_state(NodeState::Marked);
        puzzle.node_mut(NodeId(4)).set_state(NodeState::Marked);
        assert!(puzzle.set_solution(&[1, 4, 3]));

        let sources = puzzle
            .check_for_errors()
            .iter()
            .map(|e| e.source())
            .collect::<Vec<_>>();
        assert_eq!(
            sources,
            vec![
                ErrorSource::Edge(uncovered_edge),
                ErrorSource::Node(NodeId(2))
            ]
        );
    }

    #[test]
    fn check_for_errors_is_idempotent() {
        let mut puzzle = Puzzle::new(2, 2);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::SunPair(Color::Blue)));
        puzzle
            .block_mut(BlockId(1))
            .set_rule(Some(Rule::ColoredSquare(Color::White)));
        puzzle
            .block_mut(BlockId(3))
            .set_rule(Some(Rule::ColoredSquare(Color::Red)));
        puzzle.block_mut(BlockId(2)).set_rule(Some(Rule::Elimination));
        puzzle.node_mut(NodeId(2)).set_state(NodeState::Marked);
        assert!(puzzle.set_solution(&[1, 4, 3]));

        let first = puzzle.check_for_errors();
        let second = puzzle.check_for_errors();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn clearing_the_solution_resets_decomposition() {
        let mut puzzle = Puzzle::new(2, 2);
        puzzle
            .block_mut(BlockId(0))
            .set_rule(Some(Rule::Triangle(3)));
        assert!(puzzle.set_solution(&[1, 4, 3]));
        assert!(!puzzle.check_for_errors().is_empty());

        puzzle.clear_solution();
        assert!(puzzle.check_for_errors().is_empty());
        assert_eq!(puzzle.sectors().len(), 1);
    }

    proptest! {
        #[test]
        fn staircase_paths_partition_blocks(
            (w, h, cols) in (2usize..=6, 2usize..=6).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), prop::collection::vec(0..=w, h + 1))
            })
        ) {
            let mut puzzle = Puzzle::new(w, h);
            let path = staircase(w, h, &cols);
            prop_assert!(puzzle.set_solution(&path));

            let mut seen = vec![0usize; w * h];
            for sector in puzzle.sectors() {
                for block in sector.blocks() {
                    seen[block.0] += 1;
                }
            }
            prop_assert!(
                seen.iter().all(|&count| count == 1),
                "not a partition: {seen:?} for path {path:?}"
            );
        }

        #[test]
        fn out_of_range_ids_always_rejected(
            w in 1usize..=5,
            h in 1usize..=5,
            extra in 0usize..100,
        ) {
            let mut puzzle = Puzzle::new(w, h);
            let bad = (w + 1) * (h + 1) + extra;
            prop_assert!(!puzzle.set_solution(&[0, bad]));
            prop_assert!(puzzle.solution().is_none());
        }

        #[test]
        fn lone_colored_square_never_errors(
            color in prop::sample::select(Color::VARIANTS),
        ) {
            let mut puzzle = Puzzle::new(2, 2);
            puzzle
                .block_mut(BlockId(0))
                .set_rule(Some(Rule::ColoredSquare(color)));
            prop_assert!(puzzle.set_solution(&[1, 4, 3]));
            prop_assert!(puzzle.check_for_errors().is_empty());
        }
    }
}
