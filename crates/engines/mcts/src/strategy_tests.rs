use super::*;
use crate::tree::Edge;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zh_core::Move;

fn node(stats: &[(f64, f64, u32)]) -> Node {
    let edges: Vec<Edge> = stats
        .iter()
        .enumerate()
        .map(|(i, &(prior, q, visits))| Edge {
            mv: Move::new(i as u8, i as u8 + 8),
            prior,
            q,
            visits,
        })
        .collect();
    let visits = edges.iter().map(|e| e.visits).sum();
    Node { edges, visits }
}

#[test]
fn test_exploration_term_shrinks_with_visits() {
    for strategy in [ExpansionStrategy::Puct, ExpansionStrategy::Exploration] {
        let mut last = f64::INFINITY;
        for visits in 1..50 {
            let score = strategy.score(0.1, 0.3, visits, 400);
            assert!(score < last, "{strategy:?} not decreasing at {visits}");
            last = score;
        }
    }
}

#[test]
fn test_constants_move_toward_their_limits() {
    assert!((c_puct(0) - (C_INIT + ((C_BASE + 1.0) / C_BASE).ln())).abs() < 1e-12);
    assert!(c_puct(100_000) > c_puct(10));
    assert!((u_divisor(0) - U_INIT).abs() < 1e-12);
    assert!((u_divisor(u32::MAX) - U_MIN).abs() < 1e-6);
    assert!((q_threshold(0) - Q_THRESH_INIT).abs() < 1e-12);
    assert!(q_threshold(50_000) > 0.89);
}

#[test]
fn test_unvisited_edges_follow_the_prior() {
    let n = node(&[(0.2, 0.0, 0), (0.5, 0.0, 0), (0.3, 0.0, 0)]);
    assert_eq!(ExpansionStrategy::Puct.select(&n), 1);
    assert_eq!(ExpansionStrategy::Exploration.select(&n), 1);
}

#[test]
fn test_first_edge_wins_ties() {
    let n = node(&[(0.5, 0.0, 0), (0.5, 0.0, 0)]);
    assert_eq!(ExpansionStrategy::Puct.select(&n), 0);
}

#[test]
fn test_value_beats_prior_once_explored() {
    // The strong move keeps getting picked over a barely-visited weak one
    let n = node(&[(0.4, 0.9, 50), (0.6, -0.8, 50)]);
    assert_eq!(ExpansionStrategy::Puct.select(&n), 0);
}

#[test]
fn test_backprop_updates() {
    let avg = BackpropStrategy::Average;
    assert!((avg.update(0.5, 1, -0.5) - 0.0).abs() < 1e-12);
    assert!((avg.update(0.2, 3, 1.0) - 0.4).abs() < 1e-12);
    let sma = BackpropStrategy::Sma;
    assert!((sma.update(0.2, 3, 1.0) - 0.6).abs() < 1e-12);
}

#[test]
fn test_best_move_by_visits() {
    let mut rng = StdRng::seed_from_u64(7);
    let n = node(&[(0.1, 0.0, 10), (0.1, 0.0, 40), (0.8, 0.0, 30)]);
    assert_eq!(BestMoveStrategy::Visits.choose(&n, &mut rng), Some(1));
    assert_eq!(BestMoveStrategy::Visits.choose(&Node::default(), &mut rng), None);
}

#[test]
fn test_visit_ties_are_random_among_leaders() {
    let mut rng = StdRng::seed_from_u64(1);
    let n = node(&[(0.1, 0.0, 20), (0.1, 0.0, 5), (0.1, 0.0, 20)]);
    let mut seen = [false; 3];
    for _ in 0..64 {
        let i = BestMoveStrategy::Visits.choose(&n, &mut rng).unwrap();
        seen[i] = true;
    }
    assert_eq!(seen, [true, false, true]);
}

#[test]
fn test_q_value_choice_prefers_well_explored_value() {
    let mut rng = StdRng::seed_from_u64(3);
    // Slightly fewer visits but a much better value
    let n = node(&[(0.5, -0.5, 100), (0.5, 0.9, 95)]);
    assert_eq!(BestMoveStrategy::Visits.choose(&n, &mut rng), Some(0));
    assert_eq!(BestMoveStrategy::QValue.choose(&n, &mut rng), Some(1));

    // Under the visit threshold the value is ignored
    let n = node(&[(0.5, -0.5, 100), (0.5, 1.0, 10)]);
    assert_eq!(BestMoveStrategy::QValue.choose(&n, &mut rng), Some(0));
}
