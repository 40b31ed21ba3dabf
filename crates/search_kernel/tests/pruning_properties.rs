//! Pruning property tests
//!
//! Checks the alpha-beta policy against exhaustive minimax:
//! - Random fixture trees of varied depth and branching
//! - Real chess positions searched through the kernel API
//! - Apply/undo round trips across every legal move

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use search_kernel::fixture::{FixtureTree, FixtureTreeBuilder, NodeId, NodeRole, ROOT};
use search_kernel::{
    record_trace, search, AlphaBeta, ChessBoard, ChessMove, Position, Score, Window,
};
use std::collections::BTreeSet;

/// Grow a random subtree below `parent`, alternating max and min levels
fn grow(
    builder: &mut FixtureTreeBuilder,
    rng: &mut StdRng,
    parent: NodeId,
    maximizing_child: bool,
    depth: u32,
) {
    let branching = rng.random_range(1..=4);
    for index in 0..branching {
        let child = if depth == 1 {
            builder.add_node(NodeRole::Leaf(rng.random_range(-50..=50)))
        } else if maximizing_child {
            builder.add_node(NodeRole::Max)
        } else {
            builder.add_node(NodeRole::Min)
        };
        let label = if index == 0 { "L" } else { "R" };
        builder.add_edge(parent, child, label).unwrap();

        if depth > 1 {
            grow(builder, rng, child, !maximizing_child, depth - 1);
        }
    }
}

fn random_tree(seed: u64) -> FixtureTree {
    let mut rng = StdRng::seed_from_u64(seed);
    let depth = rng.random_range(1..=5);
    let mut builder = FixtureTree::builder();
    let root = builder.add_node(NodeRole::Max);
    grow(&mut builder, &mut rng, root, false, depth);
    builder.build().unwrap()
}

#[test]
fn test_random_trees_agree_with_minimax() {
    //! Alpha-beta must return the minimax value while evaluating no more leaves

    for seed in 0..200 {
        let mut tree = random_tree(seed);
        let mut pruned = BTreeSet::new();

        let exhaustive = tree.minimax_value(ROOT, true).unwrap();
        let pruning = tree.alpha_beta(ROOT, Window::FULL, true, &mut pruned).unwrap();

        assert_eq!(pruning, exhaustive, "value mismatch for seed {seed}");
        let counts = tree.evaluations();
        assert!(
            counts.alpha_beta <= counts.minimax,
            "seed {seed}: {} leaves with pruning, {} without",
            counts.alpha_beta,
            counts.minimax
        );
    }
}

#[test]
fn test_pruned_edges_exist_in_tree() {
    for seed in 0..50 {
        let mut tree = random_tree(seed);
        let mut pruned = BTreeSet::new();
        tree.alpha_beta(ROOT, Window::FULL, true, &mut pruned).unwrap();

        for (parent, child) in pruned {
            assert!(tree.children(parent).contains(&child));
            assert!(tree.edge_label(parent, child).is_some());
        }
    }
}

#[test]
fn test_best_path_ends_at_root_value() {
    for seed in 0..50 {
        let mut tree = random_tree(seed);
        let value = tree.minimax_value(ROOT, true).unwrap();
        let path = tree.best_path(ROOT);

        let last = path.last().map_or(ROOT, |&(_, child)| child);
        assert_eq!(tree.value(last), Some(value));
        assert!(matches!(tree.role(last), Some(NodeRole::Leaf(_))));
    }
}

#[test]
fn test_standard_fixture_properties() {
    //! The reference tree stays fixed: value 5, two pruned edges, one principal path

    let mut tree = FixtureTree::standard();
    let mut pruned = BTreeSet::new();

    assert_eq!(tree.minimax_value(ROOT, true).unwrap(), Score::from_centipawns(5));
    assert_eq!(tree.best_path(ROOT), vec![(0, 1), (1, 3), (3, 8)]);

    let mut fresh = FixtureTree::standard();
    assert_eq!(
        fresh.alpha_beta(ROOT, Window::FULL, true, &mut pruned).unwrap(),
        Score::from_centipawns(5)
    );
    assert_eq!(pruned, BTreeSet::from([(4, 10), (2, 6)]));
    assert_eq!(fresh.best_path(ROOT), vec![(0, 1), (1, 3), (3, 8)]);
}

#[test]
fn test_alpha_beta_path_matches_minimax_path() {
    //! On random trees the pruned pass settles on a path worth the same root value

    for seed in 0..50 {
        let mut exhaustive = random_tree(seed);
        let mut pruning = random_tree(seed);
        let value = exhaustive.minimax_value(ROOT, true).unwrap();
        pruning
            .alpha_beta(ROOT, Window::FULL, true, &mut BTreeSet::new())
            .unwrap();

        let path = pruning.best_path(ROOT);
        let last = path.last().map_or(ROOT, |&(_, child)| child);
        assert_eq!(pruning.value(ROOT), Some(value), "seed {seed}");
        assert!(matches!(pruning.role(last), Some(NodeRole::Leaf(_))), "seed {seed}");
        assert_eq!(pruning.value(last), Some(value), "seed {seed}");
    }
}

#[test]
fn test_apply_undo_round_trip_for_every_move() {
    //! Every legal move from a busy middlegame must be perfectly reversible

    let mut board = ChessBoard::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let fen = board.fen();
    let before: Vec<String> = board.legal_moves().iter().map(|m| m.uci()).collect();

    for mv in board.legal_moves() {
        board.apply(&mv);
        board.undo();

        let after: Vec<String> = board.legal_moves().iter().map(|m| m.uci()).collect();
        assert_eq!(after, before, "move {} did not round trip", mv.uci());
        assert_eq!(board.side_to_move(), shakmaty::Color::White);
    }
    assert_eq!(board.fen(), fen);
}

#[test]
fn test_search_value_independent_of_stats_instance() {
    let mut board = ChessBoard::new();
    board.play_uci("e2e4").unwrap();
    board.play_uci("e7e5").unwrap();

    let one_shot = search(&mut board, 3, Score::NEG_INFINITY, Score::INFINITY, true);
    let mut engine = AlphaBeta::new();
    let reused = engine.search(&mut board, 3, Window::FULL, true);

    assert_eq!(one_shot, reused);
    assert!(engine.stats().nodes > 0);
}

#[test]
fn test_trace_twice_same_shape() {
    let mut board = ChessBoard::new();
    board.play_uci("d2d4").unwrap();

    let first = record_trace(&mut board, 3, false);
    let second = record_trace(&mut board, 3, false);

    assert!(first.root.same_shape(&second.root));
    assert_eq!(first.best_move, second.best_move);
}
