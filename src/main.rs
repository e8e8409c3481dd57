//! foxfield - CLI driver.
//!
//! Repeatedly advances the field and reads grids/counts back out for display
//! and statistics; all simulation logic lives in the library.

use clap::{Parser, Subcommand};
use foxfield::{benchmark, Config, Field};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "foxfield")]
#[command(version)]
#[command(about = "Predator-prey grid ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of generations to simulate
        #[arg(short, long, default_value = "10000")]
        generations: u64,

        /// Output path for the population history JSON
        #[arg(short, long, default_value = "population_history.json")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Print an ASCII frame every generations_per_frame generations
        #[arg(short, long)]
        render: bool,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "1000")]
        generations: u64,

        /// Grid edge length
        #[arg(short, long, default_value = "400")]
        size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            output,
            seed,
            render,
            quiet,
        } => run_simulation(config, generations, output, seed, render, quiet),

        Commands::Init { output } => generate_config(output),

        Commands::Benchmark { generations, size } => run_benchmark(generations, size),
    }
}

fn run_simulation(
    config_path: PathBuf,
    generations: u64,
    output: PathBuf,
    seed: Option<u64>,
    render: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    let mut field = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Field::with_seed(config.clone(), s)?
    } else {
        Field::new(config.clone())?
    };

    println!("Starting simulation");
    println!("  Grid: {}x{} ({})", config.field.size, config.field.size,
        if config.field.wrap { "wrap" } else { "clamp" });
    println!("  Prey: {}  Predators: {}", field.prey_count(), field.predator_count());
    println!("  Generations: {}", generations);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval;
    let frame_interval = config.display.generations_per_frame;

    for i in 0..generations {
        field.generation();

        if !quiet && i % stats_interval == 0 {
            println!("{}", field.stats.summary());
        }

        if render && field.time % frame_interval == 0 {
            println!("{}", field.render());
        }

        if field.is_extinct() {
            println!("\nBoth populations extinct at generation {}", field.time);
            break;
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", field.time);
    println!("Speed: {:.1} generations/s", field.time as f64 / elapsed.as_secs_f64());
    println!("Prey: {}", field.prey_count());
    println!("Predators: {}", field.predator_count());
    println!("Seed: {}", field.seed());

    field.stats_history.save(output.to_str().ok_or("invalid output path")?)?;
    println!("Population history: {:?}", output);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn run_benchmark(generations: u64, size: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== foxfield Benchmark ===");
    println!("Generations: {}", generations);
    println!("Grid: {}x{}", size, size);
    println!();

    let result = benchmark(generations, size)?;
    println!("{}", result);

    Ok(())
}
