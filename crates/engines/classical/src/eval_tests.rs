use super::*;

fn cp(features: EvalFeatures, fen: &str) -> f64 {
    Evaluator::new(features).centipawns(&Position::from_fen(fen).unwrap())
}

/// Same position with colours swapped and the board flipped.
fn mirror_fen(fen: &str) -> String {
    let swap = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };

    let fields: Vec<&str> = fen.split_whitespace().collect();
    let (board, pocket) = match fields[0].find('[') {
        Some(i) => fields[0].split_at(i),
        None => (fields[0], ""),
    };
    let board: Vec<String> = board.split('/').rev().map(swap).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };
    let ep = match fields[3] {
        "-" => "-".to_string(),
        sq => {
            let (file, rank) = sq.split_at(1);
            let rank: u8 = rank.parse().unwrap();
            format!("{file}{}", 9 - rank)
        }
    };
    format!(
        "{}{} {} {} {} {} {}",
        board.join("/"),
        swap(pocket),
        side,
        swap(fields[2]),
        ep,
        fields[4],
        fields[5]
    )
}

const MIDDLEGAMES: &[&str] = &[
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R[] w KQkq - 2 3",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R[NPqb] w KQkq - 0 1",
    "r1b2rk1/ppp2ppp/2n5/3q4/3P4/2P2N2/P4PPP/R2QKB1R[BPPn] b KQ - 0 10",
    "2kr3r/ppp2p1p/2n1b3/4p3/1P6/P1N2N2/2P2PPP/R3K2R[QBPPrp] w KQ - 3 18",
];

#[test]
fn test_disabled_evaluator_is_neutral() {
    let eval = Evaluator::default();
    assert!(!eval.is_enabled());
    for fen in MIDDLEGAMES {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(eval.centipawns(&pos), 0.0);
        assert_eq!(eval.evaluate(&pos), 0.0);
    }
}

#[test]
fn test_startpos_is_balanced() {
    for feature in EvalFeature::ALL {
        let score = cp(feature.into(), zh_core::STARTPOS_FEN);
        assert!(score.abs() < 1e-9, "{feature} scored {score}");
    }
}

#[test]
fn test_colour_flip_symmetry() {
    for fen in MIDDLEGAMES {
        let flipped = mirror_fen(fen);
        for feature in EvalFeature::ALL {
            let a = cp(feature.into(), fen);
            let b = cp(feature.into(), &flipped);
            assert!((a - b).abs() < 1e-6, "{feature}: {a} vs {b} for {fen}");
        }
    }
}

#[test]
fn test_material_follows_side_to_move() {
    let white = cp(EvalFeature::Material.into(), "4k3/8/8/8/8/8/8/4K3[Q] w - - 0 1");
    let black = cp(EvalFeature::Material.into(), "4k3/8/8/8/8/8/8/4K3[Q] b - - 0 1");
    assert!((white - POCKET_VALUE[PieceKind::Queen.idx()]).abs() < 1e-9);
    assert!((white + black).abs() < 1e-9);
}

#[test]
fn test_material_bonuses() {
    // Opposite-coloured bishops form a pair, same-coloured ones do not
    let pair = cp(EvalFeature::Material.into(), "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1");
    let same = cp(EvalFeature::Material.into(), "4k3/8/8/8/8/8/8/1B2KB2 w - - 0 1");
    assert!((pair - same - BISHOP_PAIR_BONUS).abs() < 1e-9);

    // One knight and one queen
    let nq = cp(EvalFeature::Material.into(), "4k3/8/8/8/8/8/8/1N1QK3 w - - 0 1");
    let expected = BOARD_VALUE[PieceKind::Knight.idx()]
        + BOARD_VALUE[PieceKind::Queen.idx()]
        + KNIGHT_QUEEN_BONUS;
    assert!((nq - expected).abs() < 1e-9);
}

#[test]
fn test_passed_pawn_grows_as_it_advances() {
    let structure = EvalFeatures::from(EvalFeature::PawnStructure);
    let far = cp(structure, "4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let near = cp(structure, "4k3/8/8/8/8/P7/8/4K3 w - - 0 1");
    assert!(far > near);
    // No enemy pawns left: the top of the table applies
    let isolated = ISOLATED_PAWN_PENALTY[0][0][1];
    assert!((far - PASSED_HI_UNSUPPORTED[5] - isolated).abs() < 1e-9);
}

#[test]
fn test_blocked_pawn_is_not_passed() {
    let structure = EvalFeatures::from(EvalFeature::PawnStructure);
    let free = cp(structure, "4k3/8/8/8/8/P7/8/4K3 w - - 0 1");
    let blocked = cp(structure, "4k3/p7/8/8/8/P7/8/4K3 w - - 0 1");
    let isolated = ISOLATED_PAWN_PENALTY[0][0][1];
    assert!((free - PASSED_HI_UNSUPPORTED[1] - isolated).abs() < 1e-9);
    // Both pawns isolated and facing each other: nothing left over
    assert!(blocked.abs() < 1e-9);
}

#[test]
fn test_castling_rights_count_for_king_safety() {
    let safety = EvalFeatures::from(EvalFeature::KingSafety);
    let both = cp(safety, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let king_side = cp(safety, "r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1");
    assert!((both - king_side - (FULL_CASTLING_BONUS - KING_SIDE_CASTLING_BONUS)).abs() < 1e-9);
}

#[test]
fn test_check_hurts_the_checked_side() {
    let safety = EvalFeatures::from(EvalFeature::KingSafety);
    let quiet = cp(safety, "4k3/8/8/8/8/8/3r4/K7 w - - 0 1");
    let check = cp(safety, "4k3/8/8/8/8/8/r7/K7 w - - 0 1");
    // The checking rook also fills one square next to the king
    let expected = CHECK_PENALTY - EMPTY_SQUARE_PENALTY;
    assert!((quiet - check - expected).abs() < 1e-9);
}

#[test]
fn test_open_file_rook() {
    let placement = EvalFeatures::from(EvalFeature::PiecePlacement);
    let open = cp(placement, "4k3/pp6/8/8/8/8/PP6/2R1K3 w - - 0 1");
    let closed = cp(placement, "4k3/1pp5/8/8/8/8/1PP5/2R1K3 w - - 0 1");
    assert!(open > closed);
}

#[test]
fn test_cp_q_conversion() {
    assert_eq!(cp_to_q(0.0), 0.0);
    assert!(cp_to_q(100.0) > 0.0);
    assert!(cp_to_q(-100.0) < 0.0);
    assert!(cp_to_q(1e9) < 1.01);
    assert!(cp_to_q(500.0) > cp_to_q(400.0));
    for cp in [-600.0, -150.0, 35.0, 300.0, 900.0] {
        let back = q_to_cp(cp_to_q(cp)) as f64;
        assert!((back - cp).abs() <= 2.0, "{cp} -> {back}");
    }
}

#[test]
fn test_feature_set() {
    let mut set = EvalFeatures::NONE | EvalFeature::Material;
    set |= EvalFeature::KingSafety;
    assert!(set.contains(EvalFeature::Material));
    assert!(set.contains(EvalFeature::KingSafety));
    assert!(!set.contains(EvalFeature::BoardControl));
    set.remove(EvalFeature::Material);
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![EvalFeature::KingSafety]);
    assert_eq!(EvalFeature::ALL.iter().collect::<EvalFeatures>(), EvalFeatures::ALL);
    assert_eq!(
        EvalFeature::from_option_name("pawnstructure"),
        Some(EvalFeature::PawnStructure)
    );
    assert_eq!(EvalFeature::from_option_name("Mobility"), None);
}
