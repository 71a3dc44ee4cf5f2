//! Line-protocol session: parses one command at a time and writes replies.

use mcts_engine::MctsEngine;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, warn};
use zh_core::{move_to_uci, set_position_from_uci, Color, Engine, Position, SearchLimits};

const AUTHOR: &str = "ML-chess";

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct UciSession {
    engine: MctsEngine,
    pos: Position,
    debug: bool,
}

/// Clock fields of a `go` command, in milliseconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct GoArgs {
    wtime: Option<u64>,
    btime: Option<u64>,
    winc: Option<u64>,
    binc: Option<u64>,
    movetime: Option<u64>,
}

impl GoArgs {
    fn parse(parts: &[&str]) -> Self {
        let mut args = GoArgs::default();
        let mut iter = parts.iter();
        while let Some(&key) = iter.next() {
            let slot = match key {
                "wtime" => &mut args.wtime,
                "btime" => &mut args.btime,
                "winc" => &mut args.winc,
                "binc" => &mut args.binc,
                "movetime" => &mut args.movetime,
                _ => continue,
            };
            // Negative clocks happen with some GUIs when flagging
            *slot = iter
                .next()
                .and_then(|v| v.parse::<i64>().ok())
                .map(|v| v.max(0) as u64);
        }
        args
    }

    fn limits(&self, side: Color) -> SearchLimits {
        let (time, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        let mut limits = SearchLimits::engine_default();
        if let Some(remaining) = time {
            limits = SearchLimits::clock(
                Duration::from_millis(remaining),
                Duration::from_millis(inc.unwrap_or(0)),
            );
        }
        if let Some(ms) = self.movetime {
            limits.move_time = Some(Duration::from_millis(ms));
        }
        limits
    }
}

impl UciSession {
    pub fn new(engine: MctsEngine) -> Self {
        Self {
            engine,
            pos: Position::startpos(),
            debug: false,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn engine(&self) -> &MctsEngine {
        &self.engine
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", AUTHOR)?;
                for option in self.engine.config().option_lines() {
                    writeln!(out, "{}", option)?;
                }
                writeln!(out, "uciok")?;
            }
            "isready" => {
                self.engine.apply_pending_config();
                writeln!(out, "readyok")?;
            }
            "setoption" => self.set_option(&parts[1..], out)?,
            "ucinewgame" => {
                self.engine.reset();
                self.pos = Position::startpos();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut self.pos, &parts[1..]) {
                    warn!(error = %e, "bad position command");
                    writeln!(out, "info string {}", e)?;
                }
            }
            "go" => self.go(&parts[1..], out)?,
            "debug" => match parts.get(1) {
                Some(&"on") => self.debug = true,
                Some(&"off") => self.debug = false,
                _ => {}
            },
            "quit" => return Ok(Flow::Quit),
            other => debug!(command = other, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// `setoption name <name> [value <value>]`
    fn set_option(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let value_at = parts.iter().position(|&p| p == "value");
        let name_end = value_at.unwrap_or(parts.len());
        let name = parts.get(1..name_end).unwrap_or_default().join(" ");
        let value = value_at
            .map(|i| parts[i + 1..].join(" "))
            .unwrap_or_default();

        if parts.first() != Some(&"name") || name.is_empty() {
            writeln!(out, "info string malformed setoption")?;
            return Ok(());
        }
        if let Err(e) = self.engine.set_config_option(&name, &value) {
            warn!(option = %name, error = %e, "option rejected");
            writeln!(out, "info string {}", e)?;
        }
        Ok(())
    }

    fn go(&mut self, parts: &[&str], out: &mut impl Write) -> io::Result<()> {
        let limits = GoArgs::parse(parts).limits(self.pos.side_to_move());
        let result = self.engine.search(&self.pos, limits);

        if self.debug {
            let ms = result.elapsed.as_millis() as u64;
            let nps = if ms > 0 { result.nodes * 1000 / ms } else { 0 };
            writeln!(
                out,
                "info depth {} score cp {} nodes {} time {} nps {}",
                result.nodes, result.score, result.nodes, ms, nps
            )?;
        }
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv))?,
            None => writeln!(out, "bestmove 0000")?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
