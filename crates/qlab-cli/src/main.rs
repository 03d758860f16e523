//! qlab Command-Line Interface
//!
//! Runs the educational quantum experiments on the local simulator, on the
//! least busy IBM Quantum device, or on both in turn.
//!
//! ```text
//! qlab hello
//! qlab --backend both superposition
//! qlab --seed 7 search --password 0110
//! qlab random --max 1000 --count 20 --marginal
//! qlab qasm deutsch-jozsa
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{BackendChoice, RunOptions};
use commands::experiments::OracleArg;
use commands::qasm::Experiment;
use commands::{backends, experiments, qasm, random, search, unicorn, version};

use qlab_decode::DEFAULT_MAX_ATTEMPTS;
use qlab_demos::circuits::basics::{BASIC_SHOTS, HELLO_SHOTS};
use qlab_demos::circuits::clone::CLONE_SHOTS;
use qlab_demos::circuits::deutsch_jozsa::{DEFAULT_INPUTS, DEUTSCH_JOZSA_SHOTS};
use qlab_demos::circuits::random::{DEFAULT_COUNT, DEFAULT_MAX, RANDOM_SHOTS};
use qlab_demos::circuits::search::SEARCH_SHOTS;

/// qlab - small quantum computing experiments
#[derive(Parser)]
#[command(name = "qlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Where to run: sim, real (IBM Quantum) or both
    #[arg(short, long, value_enum, default_value = "sim", global = true)]
    backend: BackendChoice,

    /// Configuration file (default: $QLAB_CONFIG or ~/.qlab/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the simulator and for hidden choices like the password
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure one qubit and say hello
    Hello {
        /// Number of shots
        #[arg(short, long, default_value_t = HELLO_SHOTS)]
        shots: u32,
    },

    /// Measure a fresh qubit
    Basic {
        /// Number of shots
        #[arg(short, long, default_value_t = BASIC_SHOTS)]
        shots: u32,
    },

    /// Bell pairs and superdense coding
    Superposition {
        /// Number of shots
        #[arg(short, long, default_value_t = BASIC_SHOTS)]
        shots: u32,
    },

    /// Try to copy a qubit with CNOT
    Clone {
        /// Number of shots
        #[arg(short, long, default_value_t = CLONE_SHOTS)]
        shots: u32,
    },

    /// Tell a constant oracle from a balanced one in a single query
    DeutschJozsa {
        /// Number of input qubits
        #[arg(short = 'n', long, default_value_t = DEFAULT_INPUTS,
              value_parser = clap::value_parser!(u32).range(1..=16))]
        inputs: u32,

        /// Oracle to hide (random when omitted)
        #[arg(long, value_enum)]
        oracle: Option<OracleArg>,

        /// Number of shots
        #[arg(short, long, default_value_t = DEUTSCH_JOZSA_SHOTS)]
        shots: u32,
    },

    /// Grover search for a four-bit password
    Search {
        /// Password to hide, e.g. 0110 (random when omitted)
        #[arg(short, long, value_parser = search::parse_password)]
        password: Option<u8>,

        /// Give up after this many attempts
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        /// Number of shots per attempt
        #[arg(short, long, default_value_t = SEARCH_SHOTS)]
        shots: u32,
    },

    /// Generate random numbers
    Random {
        /// Largest value wanted
        #[arg(short, long, default_value_t = DEFAULT_MAX,
              value_parser = clap::value_parser!(u64).range(1..))]
        max: u64,

        /// How many numbers to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Read one bit per qubit instead of one bit per outcome
        #[arg(long)]
        marginal: bool,

        /// Number of shots per number
        #[arg(short, long, default_value_t = RANDOM_SHOTS)]
        shots: u32,
    },

    /// Ask the quantum 8-ball
    EightBall,

    /// Fly a unicorn to the castle in the clouds
    Unicorn,

    /// List available backends
    Backends,

    /// Print the OpenQASM source of an experiment
    Qasm {
        /// Experiment to print
        #[arg(value_enum)]
        experiment: Experiment,

        /// Emit OpenQASM 2.0 instead of 3.0
        #[arg(long)]
        qasm2: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let options = RunOptions {
        backend: cli.backend,
        config: cli.config.as_deref(),
        seed: cli.seed,
    };

    // Execute command
    let result = match cli.command {
        Commands::Hello { shots } => experiments::hello(&options, shots).await,
        Commands::Basic { shots } => experiments::basic(&options, shots).await,
        Commands::Superposition { shots } => experiments::superposition(&options, shots).await,
        Commands::Clone { shots } => experiments::clone(&options, shots).await,
        Commands::DeutschJozsa {
            inputs,
            oracle,
            shots,
        } => experiments::deutsch_jozsa(&options, inputs, oracle, shots).await,
        Commands::Search {
            password,
            max_attempts,
            shots,
        } => search::execute(&options, password, max_attempts, shots).await,
        Commands::Random {
            max,
            count,
            marginal,
            shots,
        } => random::execute(&options, max, count, marginal, shots).await,
        Commands::EightBall => experiments::eight_ball_answer(&options).await,
        Commands::Unicorn => unicorn::execute(&options).await,
        Commands::Backends => backends::execute(options.config).await,
        Commands::Qasm { experiment, qasm2 } => {
            qasm::execute(experiment, qasm2, &mut options.rng())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["qlab", "hello"]);
        assert_eq!(cli.backend, BackendChoice::Sim);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(matches!(cli.command, Commands::Hello { shots: 100 }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "qlab", "basic", "-b", "both", "--seed", "9", "-c", "q.yaml", "-vv",
        ]);
        assert_eq!(cli.backend, BackendChoice::Both);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.config, Some(PathBuf::from("q.yaml")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Basic { shots: 1024 }));
    }

    #[test]
    fn test_backend_aliases() {
        assert_eq!(parse(&["qlab", "-b", "simulator", "clone"]).backend, BackendChoice::Sim);
        assert_eq!(parse(&["qlab", "-b", "ibm", "clone"]).backend, BackendChoice::Real);
        assert!(Cli::try_parse_from(["qlab", "-b", "cloud", "clone"]).is_err());
    }

    #[test]
    fn test_deutsch_jozsa_args() {
        let cli = parse(&["qlab", "deutsch-jozsa", "-n", "4", "--oracle", "constant-one"]);
        match cli.command {
            Commands::DeutschJozsa {
                inputs,
                oracle,
                shots,
            } => {
                assert_eq!(inputs, 4);
                assert_eq!(oracle, Some(OracleArg::ConstantOne));
                assert_eq!(shots, 100);
            }
            _ => panic!("Expected DeutschJozsa command"),
        }
        assert!(Cli::try_parse_from(["qlab", "deutsch-jozsa", "-n", "0"]).is_err());
    }

    #[test]
    fn test_search_args() {
        let cli = parse(&["qlab", "search", "--password", "0110", "--max-attempts", "3"]);
        match cli.command {
            Commands::Search {
                password,
                max_attempts,
                shots,
            } => {
                assert_eq!(password, Some(6));
                assert_eq!(max_attempts, 3);
                assert_eq!(shots, 100);
            }
            _ => panic!("Expected Search command"),
        }

        let cli = parse(&["qlab", "search"]);
        assert!(matches!(
            cli.command,
            Commands::Search {
                password: None,
                max_attempts: 10,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["qlab", "search", "-p", "2"]).is_err());
    }

    #[test]
    fn test_random_args() {
        let cli = parse(&["qlab", "random"]);
        match cli.command {
            Commands::Random {
                max,
                count,
                marginal,
                shots,
            } => {
                assert_eq!(max, 100);
                assert_eq!(count, 500);
                assert!(!marginal);
                assert_eq!(shots, 1000);
            }
            _ => panic!("Expected Random command"),
        }

        let cli = parse(&["qlab", "random", "-m", "1000", "-n", "3", "--marginal"]);
        assert!(matches!(
            cli.command,
            Commands::Random {
                max: 1000,
                count: 3,
                marginal: true,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["qlab", "random", "--max", "0"]).is_err());
    }

    #[test]
    fn test_qasm_args() {
        let cli = parse(&["qlab", "qasm", "eight-ball", "--qasm2"]);
        assert!(matches!(
            cli.command,
            Commands::Qasm {
                experiment: Experiment::EightBall,
                qasm2: true
            }
        ));
        assert!(Cli::try_parse_from(["qlab", "qasm"]).is_err());
        assert!(Cli::try_parse_from(["qlab", "qasm", "teleport"]).is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert!(matches!(parse(&["qlab", "eight-ball"]).command, Commands::EightBall));
        assert!(matches!(parse(&["qlab", "unicorn"]).command, Commands::Unicorn));
        assert!(matches!(parse(&["qlab", "backends"]).command, Commands::Backends));
        assert!(matches!(parse(&["qlab", "version"]).command, Commands::Version));
    }

    #[test]
    fn test_missing_or_unknown_subcommand() {
        assert!(Cli::try_parse_from(["qlab"]).is_err());
        assert!(Cli::try_parse_from(["qlab", "foobar"]).is_err());
    }
}
