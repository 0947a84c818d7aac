//! Animated grid search in the terminal.
//!
//! Usage:
//!   gridsearch                         # random scatter, Dijkstra
//!   gridsearch --maze --algo astar
//!   gridsearch --map layout.txt --compare bfs,dfs,astar
//!   gridsearch --print --seed 7        # no animation, just the result
//!
//! Log output goes to stderr; redirect it (`2>log.txt`) when animating.

mod tui;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use gridsearch_core::{Grid, MapGen, Pos};
use gridsearch_paths::AlgorithmKind;
use gridsearch_playback::{Session, SessionConfig, SpeedPreset};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated grid search in the terminal", long_about = None)]
struct Args {
    /// ASCII layout file: `#` wall, `.` open, `S` start, `E` end
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Grid height when generating
    #[arg(long, default_value_t = SessionConfig::default().rows)]
    rows: usize,

    /// Grid width when generating
    #[arg(long, default_value_t = SessionConfig::default().cols)]
    cols: usize,

    /// Carve a maze instead of scattering walls
    #[arg(long)]
    maze: bool,

    /// Wall probability for scattered obstacles, 0.0 to 1.0
    #[arg(long, default_value_t = 0.25, value_parser = parse_density)]
    density: f64,

    /// Seed for the obstacle generator
    #[arg(long)]
    seed: Option<u64>,

    /// Algorithm to run (bfs, dfs, dijkstra, astar)
    #[arg(short, long, default_value_t = SessionConfig::default().algorithm)]
    algo: AlgorithmKind,

    /// Run several algorithms side by side, e.g. `bfs,astar`
    #[arg(short, long, value_delimiter = ',')]
    compare: Vec<AlgorithmKind>,

    /// Playback speed (slow, medium, fast, instant)
    #[arg(short, long, default_value_t = SessionConfig::default().speed)]
    speed: SpeedPreset,

    /// Print the final grid and metrics instead of animating
    #[arg(long)]
    print: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("density must be between 0.0 and 1.0, got {s}"))
    }
}

/// Default endpoints: middle row, 30% and 70% across.
fn default_endpoints(grid: &mut Grid) -> Result<(), Box<dyn Error>> {
    let (rows, cols) = (grid.rows(), grid.cols());
    if rows == 0 || cols < 2 {
        return Ok(());
    }
    let row = rows / 2;
    let start = Pos::new(row, cols * 3 / 10);
    let end = Pos::new(row, (cols * 7 / 10).max(start.col + 1).min(cols - 1));
    grid.set_start(start)?;
    grid.set_end(end)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("obstacle seed {seed}");
    let mut mapgen = MapGen::new(StdRng::seed_from_u64(seed));

    let grid = match &args.map {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Grid::from_ascii(&text)?
        }
        None => {
            let mut grid = Grid::new(args.rows, args.cols);
            default_endpoints(&mut grid)?;
            if args.maze {
                mapgen.maze(&mut grid);
            } else {
                mapgen.scatter_walls(&mut grid, args.density);
            }
            grid
        }
    };
    info!("grid {}", grid.dims());

    let config = SessionConfig {
        rows: grid.rows(),
        cols: grid.cols(),
        speed: args.speed,
        algorithm: args.algo,
    };
    let mut session = Session::with_grid(grid, config);

    if args.print {
        return print_result(&mut session, &args.compare);
    }

    let app = tui::App::new(session, mapgen, args.maze, args.density, args.compare);
    tui::run(app)
}

fn print_result(session: &mut Session, compare: &[AlgorithmKind]) -> Result<(), Box<dyn Error>> {
    if compare.is_empty() {
        let kind = session.config().algorithm;
        let metrics = session.run_with(kind, SpeedPreset::Instant, |_| {})?;
        session.wait();
        println!("{}", session.snapshot());
        println!("{metrics}");
    } else {
        let (metrics, board) = session.compare(compare, SpeedPreset::Instant, |_| {})?;
        session.wait();
        println!("{}", board.lock());
        println!();
        for m in &metrics {
            println!("{m}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_must_be_a_probability() {
        assert_eq!(parse_density("0.4"), Ok(0.4));
        assert_eq!(parse_density("1"), Ok(1.0));
        assert!(parse_density("NaN").is_err());
        assert!(parse_density("1.5").is_err());
        assert!(parse_density("-0.1").is_err());
        assert!(parse_density("lots").is_err());
    }

    #[test]
    fn cli_rejects_bad_density() {
        assert!(Args::try_parse_from(["gridsearch", "--density", "NaN"]).is_err());
        let args = Args::try_parse_from(["gridsearch", "--density", "0.1"]).unwrap();
        assert_eq!(args.density, 0.1);
    }
}
