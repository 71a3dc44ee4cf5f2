use super::*;

#[test]
fn test_even_match() {
    let stats = EloStats::new(10, 10, 0);
    assert!(stats.diff().abs() < 1e-9);
    assert!((stats.point_ratio() - 0.5).abs() < 1e-12);
    assert_eq!(stats.los(), 50.0);
    assert!(stats.error_margin() > 0.0);
}

#[test]
fn test_winning_record() {
    let stats = EloStats::new(6, 2, 2);
    assert!((stats.point_ratio() - 0.7).abs() < 1e-12);
    assert!((stats.draw_ratio() - 0.2).abs() < 1e-12);
    // -400 * log10(1 / 0.7 - 1)
    assert!((stats.diff() - 147.19).abs() < 0.01);
    // 100 * (0.5 + 0.5 * erf(1))
    assert!((stats.los() - 92.135).abs() < 0.01);

    let margin = stats.error_margin();
    assert!(margin > 100.0 && margin < 400.0, "margin {margin}");
}

#[test]
fn test_margin_shrinks_with_more_games() {
    let small = EloStats::new(6, 4, 10);
    let large = EloStats::new(60, 40, 100);
    assert!((small.diff() - large.diff()).abs() < 1e-9);
    assert!(large.error_margin() < small.error_margin());
}

#[test]
fn test_empty_record() {
    let stats = EloStats::new(0, 0, 0);
    assert_eq!(stats.point_ratio(), 0.5);
    assert_eq!(stats.draw_ratio(), 0.0);
    assert_eq!(stats.diff(), 0.0);
    assert_eq!(stats.los(), 50.0);
}

#[test]
fn test_erf_inv_reference_values() {
    assert!(erf_inv(0.0).abs() < 1e-12);
    assert!((erf_inv(0.842_700_79) - 1.0).abs() < 1e-2);
    assert!((erf_inv(-0.520_499_88) + 0.5).abs() < 1e-2);
    // 1.96 standard deviations covers 95%
    assert!((phi_inv(0.975) - 1.96).abs() < 1e-2);
}

#[test]
fn test_match_result_record() {
    let mut result = MatchResult::new();
    result.record(GameResult::Win);
    result.record(GameResult::Loss.flipped());
    result.record(GameResult::Draw);
    assert_eq!(
        result,
        MatchResult {
            wins: 2,
            losses: 0,
            draws: 1
        }
    );
    assert!((result.score() - 2.5 / 3.0).abs() < 1e-12);
    assert_eq!(result.elo().draw_ratio(), 1.0 / 3.0);
}

#[test]
fn test_unknown_players_start_level() {
    let tracker = EloTracker::new();
    assert_eq!(tracker.rating("nobody"), DEFAULT_ELO);
    assert!((tracker.expected_score("a", "b") - 0.5).abs() < 1e-12);
}

#[test]
fn test_record_match_moves_points() {
    let mut tracker = EloTracker::new();
    let gained = tracker.record_match(
        "sma",
        "default",
        MatchResult {
            wins: 10,
            losses: 0,
            draws: 0,
        },
    );

    // Ten games at even odds, all won
    assert!((gained - 160.0).abs() < 1e-9);
    assert_eq!(tracker.rating("sma"), DEFAULT_ELO + 160.0);
    assert_eq!(tracker.rating("default"), DEFAULT_ELO - 160.0);
    assert_eq!(tracker.players["default"].record.losses, 10);
    assert_eq!(tracker.leaderboard()[0].0, "sma");
    assert!(tracker.expected_score("sma", "default") > 0.7);
}

#[test]
fn test_tracker_json_round_trip() {
    let mut tracker = EloTracker::new();
    tracker.record_match(
        "a",
        "b",
        MatchResult {
            wins: 3,
            losses: 1,
            draws: 0,
        },
    );

    let path = std::env::temp_dir().join(format!("zh_elo_{}.json", std::process::id()));
    tracker.save(&path).unwrap();
    let loaded = EloTracker::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.players, tracker.players);
    assert_eq!(loaded.history.len(), 1);
    assert_eq!(loaded.history[0].result.wins, 3);
}
