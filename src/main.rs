//! ctrnn - CLI entry point
//!
//! Drives a genome-configured network from the command line: run a genome
//! and stream its outputs, generate genome files, or benchmark the step
//! loop.

use clap::{Parser, Subcommand};
use ctrnn::{benchmark, Ctrnn, CtrnnConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctrnn")]
#[command(version)]
#[command(about = "Genome-configurable CTRNN oscillator network")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a genome and stream its outputs as CSV
    Run {
        /// Genome file (JSON or YAML)
        #[arg(short, long, default_value = "genome.json")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Integration timestep
        #[arg(long, default_value = "0.01")]
        time_step: f64,

        /// Constant drive value fed to every input node
        #[arg(short, long, default_value = "1.0")]
        drive: f64,

        /// Number of outputs to read per tick (defaults to the hidden count)
        #[arg(short, long)]
        outputs: Option<usize>,

        /// Output CSV file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the default genome to a file
    Init {
        /// Output path (.json or .yaml)
        #[arg(short, long, default_value = "genome.json")]
        output: PathBuf,
    },

    /// Generate a seeded random genome
    Random {
        /// Number of input nodes
        #[arg(short, long, default_value = "2")]
        inputs: usize,

        /// Number of hidden nodes
        #[arg(long, default_value = "3")]
        hidden: usize,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output path (.json or .yaml)
        #[arg(short, long, default_value = "genome.json")]
        output: PathBuf,
    },

    /// Run a step-rate benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "100000")]
        ticks: u64,

        /// Number of input nodes
        #[arg(short, long, default_value = "2")]
        inputs: usize,

        /// Number of hidden nodes
        #[arg(long, default_value = "8")]
        hidden: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            time_step,
            drive,
            outputs,
            out,
        } => run_network(config, ticks, time_step, drive, outputs, out),

        Commands::Init { output } => {
            let config = CtrnnConfig::default();
            config.save(&output)?;
            log::info!("Default genome written to {:?}", output);
            Ok(())
        }

        Commands::Random {
            inputs,
            hidden,
            seed,
            output,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            log::info!("Using seed: {}", seed);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let config = CtrnnConfig::random(inputs, hidden, &mut rng);
            config.save(&output)?;
            log::info!(
                "Random genome ({} input / {} hidden) written to {:?}",
                inputs,
                hidden,
                output
            );
            Ok(())
        }

        Commands::Benchmark {
            ticks,
            inputs,
            hidden,
        } => {
            let result = benchmark(ticks, inputs, hidden);
            println!("{}", result);
            Ok(())
        }
    }
}

fn run_network(
    config_path: PathBuf,
    ticks: u64,
    time_step: f64,
    drive: f64,
    outputs: Option<usize>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load genome, or fall back to the built-in default.
    let config = if config_path.exists() {
        log::info!("Loading genome from {:?}", config_path);
        CtrnnConfig::from_file(&config_path)?
    } else {
        log::info!("Genome file not found, using default genome");
        CtrnnConfig::default()
    };

    let mut net = Ctrnn::new(time_step, &config)?;
    let num_outputs = outputs.unwrap_or(net.num_hidden_nodes());
    let inputs = vec![drive; net.num_input_nodes()];

    log::info!(
        "Network: {} input / {} hidden nodes, dt = {}",
        net.num_input_nodes(),
        net.num_hidden_nodes(),
        time_step
    );

    let mut writer: Box<dyn Write> = match out {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    for tick in 0..ticks {
        net.feed_inputs(&inputs)?;
        net.step();
        let row: Vec<String> = net
            .read_outputs(num_outputs)
            .iter()
            .map(|o| format!("{:.9}", o))
            .collect();
        writeln!(writer, "{},{}", tick, row.join(","))?;
    }
    writer.flush()?;

    log::info!("Done: {} ticks", ticks);
    Ok(())
}
