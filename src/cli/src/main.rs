use std::{fs, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use cubie_core::{
    Cube, CubeSnapshot, GeneratorSet,
    analysis::{GroupStatistics, SubgroupOrder, SubgroupReport, Tally, survey_subgroups},
    cycles, parse_moves,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use owo_colors::OwoColorize;
use std::fmt::Display;

mod config;

use config::AnalysisConfig;

/// Explores the group structure of a cube-like puzzle
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The analysis configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tally permutation orders, cycle types and orientation sums over random
    /// scrambles.
    Stats {
        /// How many scrambles to analyze
        #[arg(long)]
        trials: Option<usize>,
        /// How many random moves each scramble adds
        #[arg(long)]
        moves: Option<usize>,
        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,
        /// How many of the most common values to show
        #[arg(long)]
        top: Option<usize>,
    },
    /// Compute the order of the subgroup generated by each set of faces.
    Subgroups {
        /// Give up on a subgroup after visiting this many states
        #[arg(long)]
        max_states: Option<usize>,
        /// Only survey these generator sets, e.g. "U D". Defaults to all 63.
        #[arg(long, short)]
        generators: Vec<GeneratorSet>,
    },
    /// Apply a move sequence and describe the resulting state.
    Apply {
        /// The move sequence to apply, e.g. "R U' F2".
        sequence: String,
        /// Start from a state saved with `--save` instead of the solved state.
        #[arg(long, value_name = "STATE")]
        from: Option<PathBuf>,
        /// Save the resulting state to this file, in TOML format.
        #[arg(long, value_name = "STATE")]
        save: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = AnalysisConfig::load_or_default(cli.config.as_deref())?;
    info!("Using {config:?}");

    match cli.command {
        Commands::Stats {
            trials,
            moves,
            seed,
            top,
        } => {
            config.trials = trials.unwrap_or(config.trials);
            config.scramble_moves = moves.unwrap_or(config.scramble_moves);
            config.seed = seed.or(config.seed);
            config.top = top.unwrap_or(config.top);
            stats(&config);
        }
        Commands::Subgroups {
            max_states,
            generators,
        } => {
            config.max_orbit_states = max_states.unwrap_or(config.max_orbit_states);
            let reports = if generators.is_empty() {
                survey_subgroups(GeneratorSet::all_subsets(), config.max_orbit_states)
            } else {
                survey_subgroups(generators, config.max_orbit_states)
            };
            print_subgroups(&reports);
        }
        Commands::Apply {
            sequence,
            from,
            save,
        } => apply(&sequence, from, save)?,
    }

    Ok(())
}

fn stats(config: &AnalysisConfig) {
    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    info!("Scrambling with seed {}", rng.get_seed());

    let stats = GroupStatistics::collect(config.trials, config.scramble_moves, &mut rng);

    println!(
        "{}",
        format!(
            "Analysis of {} trials with {} moves each:",
            stats.trials, stats.scramble_moves
        )
        .bold()
    );

    print_tally(
        "Permutation Order Distribution",
        &stats.permutation_orders,
        config.top,
        |order| format!("Order {order}"),
    );
    print_tally(
        "Corner Cycle Type Distribution",
        &stats.corner_cycle_types,
        config.top,
        ToString::to_string,
    );
    print_tally(
        "Edge Cycle Type Distribution",
        &stats.edge_cycle_types,
        config.top,
        ToString::to_string,
    );
    print_tally(
        "Corner Orientation Sum Distribution",
        &stats.corner_orientation_sums,
        usize::MAX,
        ToString::to_string,
    );
    print_tally(
        "Edge Orientation Sum Distribution",
        &stats.edge_orientation_sums,
        usize::MAX,
        ToString::to_string,
    );
}

fn print_tally<K: std::hash::Hash + Eq + Ord + Clone>(
    title: &str,
    tally: &Tally<K>,
    top: usize,
    label: impl Fn(&K) -> String,
) {
    println!();
    println!(
        "{} {}",
        format!("{title}:").bold(),
        format!("({} distinct)", tally.distinct()).dimmed()
    );
    for (key, count) in tally.most_common(top) {
        println!(
            "{}: {count} times ({:.2}%)",
            label(&key),
            100.0 * tally.fraction(count)
        );
    }
}

fn print_subgroups(reports: &[SubgroupReport]) {
    println!("{}", "Subgroup Analysis:".bold());
    for report in reports {
        match &report.order {
            SubgroupOrder::Exact {
                order,
                factorization,
            } => {
                println!(
                    "Generators: {}, Order: {}",
                    report.generators,
                    order.green()
                );
                if *order > 1 {
                    println!("  Prime factorization: {factorization}");
                }
            }
            SubgroupOrder::Exceeds(limit) => {
                println!(
                    "Generators: {}, Order: {}",
                    report.generators,
                    format!("more than {limit}").yellow()
                );
            }
        }
    }
}

fn apply(
    sequence: &str,
    from: Option<PathBuf>,
    save: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let moves = parse_moves(sequence)?;

    let mut cube = Cube::new();
    if let Some(path) = from {
        let text = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read the state file {path:?}"))?;
        let snapshot: CubeSnapshot = toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse the state file {path:?}"))?;
        cube.set_state(&snapshot);
    }

    cube.apply_moves(&moves);

    let (corners, edges) = cube.permutation();
    println!("{cube}");
    show("Moves", moves.iter().join(" "));
    show(
        "Solved",
        if cube.is_solved() {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        },
    );
    show("Corner cycles", cycles::cycle_type(&corners));
    show("Edge cycles", cycles::cycle_type(&edges));
    show("Order", cycles::combined_order(&corners, &edges));
    show(
        "Orientation sums",
        format!(
            "corners {}, edges {}",
            cube.corner_orientation_sum(),
            cube.edge_orientation_sum()
        ),
    );

    if let Some(path) = save {
        let text = toml::to_string(&cube.state())?;
        fs::write(&path, text)
            .wrap_err_with(|| format!("Failed to write the state file {path:?}"))?;
        info!("Saved the state to {path:?}");
    }

    Ok(())
}

fn show(label: &str, value: impl Display) {
    println!("{:>17} {value}", format!("{label}:").bold());
}
