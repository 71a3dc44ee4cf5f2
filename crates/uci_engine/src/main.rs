//! Crazyhouse MCTS engine speaking the UCI line protocol on stdin/stdout.
//!
//! ```text
//! uci_engine [--config options.toml] [--model net.onnx]
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see per-move search statistics.

mod protocol;

use anyhow::{bail, Context, Result};
use mcts_engine::{MctsConfig, MctsEngine};
use std::io::{self, BufRead};
use tracing::info;
use tracing_subscriber::EnvFilter;

use protocol::{Flow, UciSession};

struct Args {
    config: Option<String>,
    #[cfg_attr(not(feature = "onnx"), allow(dead_code))]
    model: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        model: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().context("--config needs a file")?),
            "--model" => args.model = Some(iter.next().context("--model needs a file")?),
            other => bail!("unknown argument: {}", other),
        }
    }
    Ok(args)
}

#[cfg(feature = "onnx")]
fn build_engine(config: MctsConfig, model: Option<&str>) -> Result<MctsEngine> {
    match model {
        Some(path) => {
            let predictor = mcts_engine::OnnxPredictor::load(std::path::Path::new(path))
                .with_context(|| format!("loading model {}", path))?;
            Ok(MctsEngine::with_predictor(config, Box::new(predictor)))
        }
        None => Ok(MctsEngine::new(config)),
    }
}

#[cfg(not(feature = "onnx"))]
fn build_engine(config: MctsConfig, model: Option<&str>) -> Result<MctsEngine> {
    if model.is_some() {
        bail!("--model needs a build with the `onnx` feature");
    }
    Ok(MctsEngine::new(config))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => MctsConfig::load(path)
            .with_context(|| format!("loading configuration {}", path))?,
        None => MctsConfig::default(),
    };
    let engine = build_engine(config, args.model.as_deref())?;
    info!("engine ready");

    // UCI engines communicate via stdin/stdout.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new(engine);

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if session.handle_line(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
