//! Sliding-Tile Puzzle Solver
//!
//! Reads an N×N board from a text file and searches for a sequence of blank
//! moves that turns it into the goal board, printing the path and the search
//! statistics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fifteen::{persistence, solve, AlgorithmKind, Board, Heuristic, Problem, SearchConfig};

/// Solves sliding-tile puzzles with A*, Anytime WA*, ARA* or IDA*.
#[derive(Parser)]
#[command(name = "fifteen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a solution and print it with the run statistics.
    Solve(SolveArgs),
    /// Report whether the goal can be reached, without searching.
    Check(BoardArgs),
    /// Print the canonical goal board of the given size.
    Goal {
        /// Side length of the board.
        dimension: usize,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Board file: one row per line, whitespace-separated tiles, 0 for the blank.
    puzzle: PathBuf,

    /// Goal board file; defaults to tiles in order with the blank last.
    #[arg(long)]
    goal: Option<PathBuf>,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    boards: BoardArgs,

    #[arg(short, long, value_enum, default_value_t = AlgorithmKind::AStar)]
    algorithm: AlgorithmKind,

    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Initial heuristic weight (anytime-weighted and ara only, default 2).
    #[arg(short, long)]
    weight: Option<f64>,

    /// Weight decrease between ARA* passes (default 0.5).
    #[arg(short, long)]
    step: Option<f64>,

    /// Also write the report to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Solve(args) => {
            print!("{}", run_solve(&args)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => {
            let problem = load_problem(&args)?;
            if problem.is_solvable() {
                println!("solvable");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unsolvable");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Goal { dimension } => {
            let goal = Board::canonical_goal(dimension)?;
            println!("{}", goal);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_problem(args: &BoardArgs) -> anyhow::Result<Problem> {
    let start = load(&args.puzzle)?;
    match &args.goal {
        Some(path) => Ok(Problem::new(start, load(path)?)?),
        None => Ok(Problem::with_canonical_goal(start)),
    }
}

fn load(path: &Path) -> anyhow::Result<Board> {
    persistence::load_board(path).with_context(|| format!("cannot load {}", path.display()))
}

/// Solves the puzzle and returns the report, saving it if asked to.
fn run_solve(args: &SolveArgs) -> anyhow::Result<String> {
    let problem = load_problem(&args.boards)?;
    problem.ensure_solvable().with_context(|| {
        format!(
            "{} cannot be turned into the goal board",
            args.boards.puzzle.display()
        )
    })?;
    let config = SearchConfig::from_parts(args.algorithm, args.heuristic, args.weight, args.step)
        .context("invalid search settings")?;

    let solution = solve(&problem, &config)?;
    if let Some(output) = &args.output {
        persistence::save_report(output, &solution, args.algorithm)?;
    }
    Ok(persistence::format_report(&solution, args.algorithm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use fifteen::ConfigError;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fifteen-cli-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn solve_args(argv: &[&str]) -> SolveArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Solve(args) => args,
            _ => panic!("expected the solve subcommand"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_defaults() {
        let args = solve_args(&["fifteen", "solve", "board.txt"]);
        assert_eq!(args.algorithm, AlgorithmKind::AStar);
        assert_eq!(args.heuristic, Heuristic::Manhattan);
        assert_eq!(args.weight, None);
        assert_eq!(args.boards.goal, None);
    }

    #[test]
    fn test_solve_flags() {
        let cli = Cli::try_parse_from([
            "fifteen", "-vv", "solve", "board.txt", "--algorithm", "ara", "--heuristic",
            "misplaced", "--weight", "3", "--step", "0.25", "--goal", "goal.txt",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Solve(args) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!(args.algorithm, AlgorithmKind::Ara);
        assert_eq!(args.heuristic, Heuristic::MisplacedTiles);
        assert_eq!(args.weight, Some(3.0));
        assert_eq!(args.step, Some(0.25));
        assert_eq!(args.boards.goal, Some(PathBuf::from("goal.txt")));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(Cli::try_parse_from(["fifteen", "solve", "b.txt", "-a", "dfs"]).is_err());
    }

    #[test]
    fn test_run_solve_every_algorithm() {
        let puzzle = scratch_file("puzzle.txt", "1 2 3\n4 0 6\n7 5 8\n");
        for algorithm in ["a-star", "anytime-weighted", "ara", "ida-star"] {
            let path = puzzle.to_str().unwrap();
            let args = solve_args(&["fifteen", "solve", path, "-a", algorithm]);
            let report = run_solve(&args).unwrap();
            assert!(report.contains("Solution length: 2"), "{algorithm}:\n{report}");
        }
        std::fs::remove_file(&puzzle).unwrap();
    }

    #[test]
    fn test_run_solve_rejects_bad_settings() {
        let puzzle = scratch_file("settings.txt", "1 2\n0 3\n");
        let path = puzzle.to_str().unwrap();

        let weighted_astar = solve_args(&["fifteen", "solve", path, "--weight", "2"]);
        assert!(run_solve(&weighted_astar).is_err());

        let unsolvable = scratch_file("unsolvable.txt", "2 1\n3 0\n");
        let args = solve_args(&["fifteen", "solve", unsolvable.to_str().unwrap()]);
        let err = run_solve(&args).unwrap_err();
        assert!(err.to_string().contains("cannot be turned into the goal board"));
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::Unsolvable)
        );

        std::fs::remove_file(&puzzle).unwrap();
        std::fs::remove_file(&unsolvable).unwrap();
    }
}
