use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fillgrid::{find_fill, load_grid_config, render_grid, FillFailure, SearchOptions};
use instant::Duration;
use log::info;

/// Fill a crossword structure with words from a word list.
#[derive(Debug, Parser)]
struct Cli {
    /// The grid structure: one row per line, `_` for fillable cells.
    structure: PathBuf,

    /// The word list: one word per line.
    words: PathBuf,

    /// If given, the filled grid is also written to this file.
    output: Option<PathBuf>,

    /// Re-run arc consistency after every choice during search.
    #[arg(short = 'm', long)]
    maintain_arc_consistency: bool,

    /// The number of seconds the search is allowed to run.
    #[arg(short = 't', long)]
    time_limit: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();

    let config = load_grid_config(&args.structure, &args.words).with_context(|| {
        format!(
            "Failed to load {} and {}",
            args.structure.display(),
            args.words.display()
        )
    })?;

    let options = SearchOptions {
        maintain_arc_consistency: args.maintain_arc_consistency,
        time_limit: args.time_limit.map(Duration::from_secs),
    };

    match find_fill(&config, &options) {
        Ok(result) => {
            info!("{:?}", result.statistics);

            let display_grid = render_grid(&config, &result.assignment);
            println!("{}", display_grid);

            if let Some(output) = &args.output {
                fs::write(output, display_grid + "\n")
                    .with_context(|| format!("Unable to write {}", output.display()))?;
                info!("Written file to {}", output.display());
            }
        }
        Err(FillFailure::HardFailure(statistics)) => {
            info!("{:?}", statistics);
            println!("No solution.");
        }
        Err(FillFailure::TimedOut(statistics)) => {
            info!("{:?}", statistics);
            println!("No solution found within the time limit.");
        }
    }

    Ok(())
}
