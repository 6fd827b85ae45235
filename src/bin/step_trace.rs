//! Replays a step engine on the terminal, one line per step.
//!
//! Run with: cargo run --release --bin step_trace -- --algorithm merge --len 16 --seed 7
//!
//! Usage:
//!   step_trace                          Selection sort over 160 random values
//!   step_trace -a quick 5 3 8 1 9 2     Quicksort over explicit values
//!   step_trace -a merge --json          Emit frames as JSON lines

use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use step_sort_rs::{is_sorted, Algorithm, Frame, Player, PlayerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays a step sorting engine", long_about = None)]
struct Args {
    /// Algorithm to run: selection, insertion, merge or quick
    #[arg(short, long, default_value = "selection")]
    algorithm: Algorithm,

    /// Number of random values to generate
    #[arg(short = 'n', long, default_value_t = step_sort_rs::player::DEFAULT_LEN)]
    len: usize,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = step_sort_rs::player::DEFAULT_MIN_VALUE)]
    min: i32,

    #[arg(long, default_value_t = step_sort_rs::player::DEFAULT_MAX_VALUE)]
    max: i32,

    /// Stop after this many steps even if the sort is not done
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print frames as JSON lines
    #[arg(long)]
    json: bool,

    #[arg(long)]
    verbose: bool,

    /// Sort these values instead of random ones
    #[arg(allow_negative_numbers = true)]
    values: Vec<i32>,
}

fn write_frame(out: &mut impl Write, frame: &Frame, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, frame).context("Failed to encode frame")?;
        writeln!(out)?;
        return Ok(());
    }

    let marks: Vec<String> = frame
        .highlights
        .iter()
        .map(|h| format!("{}:{:?}", h.index, h.role))
        .collect();
    writeln!(
        out,
        "{:>6} {:?} [{}]{}",
        frame.step,
        frame.data,
        marks.join(" "),
        if frame.done { " done" } else { "" }
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder().filter_level(log_level).init();

    let config = PlayerConfig {
        len: args.len,
        min_value: args.min,
        max_value: args.max,
        seed: args.seed,
        algorithm: args.algorithm,
    };
    debug!("config: {:?}", config);

    let mut player = if args.values.is_empty() {
        Player::new(config)
    } else {
        Player::with_data(config, args.values)
    }
    .context("Invalid configuration")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    write_frame(&mut out, &player.frame(), args.json)?;
    player.set_running(true);
    while player.tick() {
        write_frame(&mut out, &player.frame(), args.json)?;

        if args.max_steps.is_some_and(|max| player.steps() >= max) {
            warn!("stopping after {} steps, sort not finished", player.steps());
            break;
        }
    }
    out.flush()?;

    info!(
        "{} sort: {} steps over {} values",
        player.algorithm(),
        player.steps(),
        player.data().len()
    );

    if player.is_done() && !is_sorted(player.data()) {
        bail!("{} sort finished with unsorted output", player.algorithm());
    }

    Ok(())
}
