use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{debug, error, info};

use craft_planner::{
    AStarSearch, CraftingConfig, DijkstraSearch, PlanVisualizer, Planner, SearchAlgorithm,
    SearchOutcome, DEFAULT_TIME_LIMIT,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Best-first search with the crafting heuristic
    Astar,
    /// Uniform cost search, no heuristic
    Dijkstra,
}

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,

    /// Search time budget, in seconds.
    #[clap(short, long, default_value_t = DEFAULT_TIME_LIMIT.as_secs_f64())]
    limit: f64,

    /// The search algorithm to plan with.
    #[clap(short, long, value_enum, default_value_t = Algorithm::Astar)]
    algorithm: Algorithm,

    /// Replaces the goal from the file. Repeat for several resources, e.g. `--goal rail=20`.
    #[clap(short, long = "goal", value_parser = parse_goal)]
    goals: Vec<(String, u32)>,

    /// If given, also writes the plan as a Graphviz DOT file to this path.
    #[clap(long)]
    dot: Option<PathBuf>,

    /// The crafting description (JSON) to plan over.
    #[clap(name = "CRAFTING_JSON")]
    path: PathBuf,
}

fn parse_goal(raw: &str) -> Result<(String, u32), String> {
    let (name, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=QUANTITY, got '{raw}'"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid quantity in '{raw}': {err}"))?;
    Ok((name.trim().to_string(), quantity))
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.debug { "debug" } else { "info" }),
    )
    .init();
    info!("{} - v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    let time_limit = match Duration::try_from_secs_f64(args.limit) {
        Ok(limit) => limit,
        Err(err) => {
            error!("Invalid time limit {}: {}", args.limit, err);
            return ExitCode::FAILURE;
        }
    };

    let mut config = match CraftingConfig::from_path(&args.path) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load '{}': {}", args.path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    if !args.goals.is_empty() {
        debug!("Overriding goal with {:?}", args.goals);
        config = config.with_goal(args.goals.clone());
    }

    let planner = match Planner::from_config(&config) {
        Ok(planner) => planner,
        Err(err) => {
            error!("Failed to compile '{}': {}", args.path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let search: Box<dyn SearchAlgorithm> = match args.algorithm {
        Algorithm::Astar => Box::new(AStarSearch::for_graph(planner.graph())),
        Algorithm::Dijkstra => Box::new(DijkstraSearch),
    };
    let planner = planner.with_search_algorithm(search);

    match planner.plan(time_limit) {
        SearchOutcome::Found(plan) => {
            println!("{plan}");
            info!(
                "{} states expanded in {:.3?}",
                plan.stats().expanded,
                plan.stats().elapsed
            );
            if let Some(path) = &args.dot {
                if let Err(err) = PlanVisualizer::new().visualize_plan(&plan, planner.goal(), path) {
                    error!("Failed to write '{}': {}", path.display(), err);
                    return ExitCode::FAILURE;
                }
                debug!("Wrote plan graph to '{}'", path.display());
            }
            ExitCode::SUCCESS
        }
        SearchOutcome::Exhausted(failure) => {
            println!("{failure}");
            ExitCode::FAILURE
        }
    }
}
