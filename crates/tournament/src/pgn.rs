//! PGN game records
//!
//! Games are written with the seven standard tags plus `Variant`, and
//! numbered SAN movetext. The reader accepts what the writer produces and
//! ordinary hand-edited files (comments in braces, `1...` continuations).

use chrono::{Local, NaiveDate};
use std::io::Write;
use thiserror::Error;

pub const VARIANT: &str = "crazyhouse";

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tag on line {line}: {text}")]
    MalformedTag { line: usize, text: String },

    #[error("malformed result: {0}")]
    MalformedResult(String),
}

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    /// `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub result: String,
    /// Moves in SAN.
    pub moves: Vec<String>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            event: "?".to_string(),
            site: "?".to_string(),
            date: "????.??.??".to_string(),
            round: "?".to_string(),
            white: "?".to_string(),
            black: "?".to_string(),
            result: "*".to_string(),
            moves: Vec::new(),
        }
    }
}

impl GameRecord {
    pub fn is_decisive(&self) -> bool {
        self.result == "1-0" || self.result == "0-1"
    }

    /// Apply a `[Name "value"]` pair. Unknown tags are ignored.
    fn set_tag(&mut self, name: &str, value: String) {
        let slot = match name {
            "Event" => &mut self.event,
            "Site" => &mut self.site,
            "Date" => &mut self.date,
            "Round" => &mut self.round,
            "White" => &mut self.white,
            "Black" => &mut self.black,
            "Result" => &mut self.result,
            _ => return,
        };
        *slot = value;
    }
}

/// Writes games one after another to any byte sink.
pub struct PgnWriter<W: Write> {
    out: W,
}

impl<W: Write> PgnWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_game(&mut self, game: &GameRecord) -> Result<(), PgnError> {
        if !RESULT_TOKENS.contains(&game.result.as_str()) {
            return Err(PgnError::MalformedResult(game.result.clone()));
        }

        let tags = [
            ("Event", &game.event),
            ("Site", &game.site),
            ("Date", &game.date),
            ("Round", &game.round),
            ("White", &game.white),
            ("Black", &game.black),
            ("Result", &game.result),
        ];
        for (name, value) in tags {
            writeln!(self.out, "[{} \"{}\"]", name, escape(value))?;
        }
        writeln!(self.out, "[Variant \"{}\"]", VARIANT)?;
        writeln!(self.out)?;

        let last = game.moves.len().saturating_sub(1);
        for (ply, san) in game.moves.iter().enumerate() {
            let number = ply / 2 + 1;
            if ply % 2 == 0 {
                write!(self.out, "{}. ", number)?;
            }
            write!(self.out, "{}", san)?;
            if ply == last && game.is_decisive() && !san.ends_with('#') {
                write!(self.out, "#")?;
            }
            // Two full moves per line
            if ply % 2 == 1 && number % 2 == 0 {
                writeln!(self.out)?;
            } else {
                write!(self.out, " ")?;
            }
        }
        writeln!(self.out, "{}", game.result)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parse every game in `text`.
pub fn read_games(text: &str) -> Result<Vec<GameRecord>, PgnError> {
    let mut games = Vec::new();
    let mut current: Option<GameRecord> = None;
    let mut in_comment = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if !in_comment && line.starts_with('[') {
            let (name, value) = parse_tag(line).ok_or_else(|| PgnError::MalformedTag {
                line: idx + 1,
                text: line.to_string(),
            })?;
            current.get_or_insert_with(GameRecord::default).set_tag(name, value);
            continue;
        }

        for token in line.split_whitespace() {
            if in_comment {
                in_comment = !token.ends_with('}');
                continue;
            }
            if token.starts_with('{') {
                in_comment = !token.ends_with('}');
                continue;
            }

            let game = current.get_or_insert_with(GameRecord::default);
            if RESULT_TOKENS.contains(&token) {
                if game.result != "*" && game.result != token {
                    return Err(PgnError::MalformedResult(format!(
                        "tag says {} but movetext ends with {}",
                        game.result, token
                    )));
                }
                game.result = token.to_string();
                if let Some(done) = current.take() {
                    games.push(done);
                }
                continue;
            }

            if let Some(san) = strip_move_number(token) {
                game.moves.push(san.to_string());
            }
        }
    }

    if let Some(unfinished) = current {
        let moves = unfinished.moves.len();
        return Err(PgnError::MalformedResult(format!(
            "game after {} plies has no result",
            moves
        )));
    }

    Ok(games)
}

fn parse_tag(line: &str) -> Option<(&str, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (name, rest) = inner.split_once(' ')?;
    let quoted = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    if name.is_empty() {
        return None;
    }
    let value = quoted.replace("\\\"", "\"").replace("\\\\", "\\");
    Some((name, value))
}

/// `12.` and `12...` are dropped, `12.e4` yields `e4`.
fn strip_move_number(token: &str) -> Option<&str> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(token);
    }
    match token.rfind('.') {
        Some(dot) => {
            let rest = &token[dot + 1..];
            (!rest.is_empty()).then_some(rest)
        }
        None => Some(token),
    }
}

/// Today's date in PGN form (`YYYY.MM.DD`).
pub fn pgn_date_today() -> String {
    pgn_date(Local::now().date_naive())
}

pub fn pgn_date(date: NaiveDate) -> String {
    date.format("%Y.%m.%d").to_string()
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
