use super::*;

fn sample_game() -> GameRecord {
    GameRecord {
        event: "Self-play".to_string(),
        site: "local".to_string(),
        date: "2024.01.01".to_string(),
        round: "3".to_string(),
        white: "ZhMcts-a".to_string(),
        black: "ZhMcts-b".to_string(),
        result: "1-0".to_string(),
        moves: ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn written(game: &GameRecord) -> String {
    let mut writer = PgnWriter::new(Vec::new());
    writer.write_game(game).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_writer_layout() {
    let text = written(&sample_game());
    let expected = "\
[Event \"Self-play\"]
[Site \"local\"]
[Date \"2024.01.01\"]
[Round \"3\"]
[White \"ZhMcts-a\"]
[Black \"ZhMcts-b\"]
[Result \"1-0\"]
[Variant \"crazyhouse\"]

1. e4 e5 2. Bc4 Nc6
3. Qh5 Nf6 4. Qxf7# 1-0

";
    assert_eq!(text, expected);
}

#[test]
fn test_mate_suffix_not_doubled() {
    let mut game = sample_game();
    game.moves.last_mut().unwrap().push('#');
    assert!(written(&game).contains("4. Qxf7# 1-0"));
}

#[test]
fn test_draw_has_no_mate_suffix() {
    let mut game = sample_game();
    game.result = "1/2-1/2".to_string();
    assert!(written(&game).contains("4. Qxf7 1/2-1/2"));
}

#[test]
fn test_writer_rejects_unknown_result() {
    let mut game = sample_game();
    game.result = "2-0".to_string();
    let mut writer = PgnWriter::new(Vec::new());
    assert!(matches!(
        writer.write_game(&game),
        Err(PgnError::MalformedResult(_))
    ));
}

#[test]
fn test_read_back_written_games() {
    let mut second = sample_game();
    second.round = "4".to_string();
    second.result = "0-1".to_string();
    second.moves = vec!["f3".to_string(), "e5".to_string(), "g4".to_string(), "Qh4#".to_string()];

    let mut writer = PgnWriter::new(Vec::new());
    writer.write_game(&sample_game()).unwrap();
    writer.write_game(&second).unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    let games = read_games(&text).unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].white, "ZhMcts-a");
    assert_eq!(games[0].result, "1-0");
    assert_eq!(games[0].moves.last().map(String::as_str), Some("Qxf7#"));
    assert_eq!(games[1], second);
}

#[test]
fn test_reader_skips_comments_and_continuations() {
    let text = "[White \"x\"]\n[Black \"y\"]\n\n1. e4 {book} 1... c5 2.N@f3 {a longer\ncomment} Nc6 *\n";
    let games = read_games(text).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].moves, vec!["e4", "c5", "N@f3", "Nc6"]);
    assert_eq!(games[0].result, "*");
    assert_eq!(games[0].event, "?");
}

#[test]
fn test_reader_errors() {
    assert!(matches!(
        read_games("[Event Self-play]\n\n1. e4 *\n"),
        Err(PgnError::MalformedTag { line: 1, .. })
    ));
    assert!(matches!(
        read_games("[Result \"1-0\"]\n\n1. e4 e5 0-1\n"),
        Err(PgnError::MalformedResult(_))
    ));
    assert!(matches!(
        read_games("[Event \"x\"]\n\n1. e4 e5\n"),
        Err(PgnError::MalformedResult(_))
    ));
    assert!(read_games("").unwrap().is_empty());
}

#[test]
fn test_escaped_tag_values() {
    let mut game = sample_game();
    game.event = "The \"big\" one".to_string();
    let text = written(&game);
    assert!(text.contains("[Event \"The \\\"big\\\" one\"]"));
    assert_eq!(read_games(&text).unwrap()[0].event, game.event);
}

#[test]
fn test_pgn_dates() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert_eq!(pgn_date(date(1970, 1, 1)), "1970.01.01");
    assert_eq!(pgn_date(date(2000, 2, 29)), "2000.02.29");
    assert_eq!(pgn_date_today().len(), 10);
}
