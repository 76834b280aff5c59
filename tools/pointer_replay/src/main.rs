use std::{path::PathBuf, process};

use anyhow::{bail, Context, Result};
use clap::Parser;
use pointer_gestures::{Channel, GestureConfig};
use pointer_replay::{join_labels, parse_expected_channels, parse_trace, replay};
use tracing_subscriber::EnvFilter;

/// Replays a recorded pointer trace through the gesture classifier.
#[derive(Debug, Parser)]
#[command(name = "pointer_replay")]
struct Cli {
    /// Trace file with `pointer_trace,ms,kind,id,x,y` and `tick,ms` lines.
    trace: PathBuf,
    /// Expected channel sequence, one label per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Gesture thresholds; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GestureConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GestureConfig::default(),
    };
    let lines = parse_trace(&cli.trace)?;
    let recorded = replay(config, &lines);

    println!("note,ms,id,channel,state,direction");
    for note in &recorded {
        println!(
            "note,{},{},{},{},{}",
            note.ms, note.id, note.channel, note.state, note.direction
        );
    }

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected_channels(expect_path)?;
        let actual: Vec<Channel> = recorded.iter().map(|note| note.channel).collect();
        if actual != expected {
            eprintln!("expected channels: {}", join_labels(&expected));
            eprintln!("actual channels:   {}", join_labels(&actual));
            bail!("notification sequence mismatch");
        }
    }

    Ok(())
}
