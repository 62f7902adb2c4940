use std::{io, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand, ValueEnum};
use lorenz::{
    LorenzErrors, RangePolicy, SimulationConfig, Solver, State, compare,
    parameters::ParameterRange,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Integrate the Lorenz attractor and print the trajectory as CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Integrate a single system and print its x,y,z,t table
    Simulate {
        #[command(flatten)]
        settings: Settings,
        /// Initial point, defaults to system A of the config
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        initial: Option<Vec<f64>>,
    },
    /// Integrate systems A and B and print the combined x,y,z,t,system table
    Compare {
        #[command(flatten)]
        settings: Settings,
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        initial_a: Option<Vec<f64>>,
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        initial_b: Option<Vec<f64>>,
        /// Only integrate system A
        #[arg(long, conflicts_with = "initial_b")]
        no_system_b: bool,
    },
    /// Print the parameter ranges offered to range controls
    Bounds,
}

#[derive(Debug, Args)]
struct Settings {
    /// RON scenario file, command line values take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, allow_negative_numbers = true)]
    sigma: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    rho: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    beta: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    t_increment: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    t_max: Option<f64>,
    #[arg(long, value_enum)]
    solver: Option<SolverArg>,
    /// Reject rho and beta outside their slider ranges
    #[arg(long)]
    enforce_ranges: bool,
    #[arg(long)]
    max_samples: Option<usize>,
    #[arg(long)]
    max_seconds: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Rk4,
    Dopri5,
}

impl From<SolverArg> for Solver {
    fn from(value: SolverArg) -> Self {
        match value {
            SolverArg::Rk4 => Solver::Rk4,
            SolverArg::Dopri5 => Solver::DormandPrince5,
        }
    }
}

impl Settings {
    fn resolve(&self) -> Result<SimulationConfig, LorenzErrors> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_path(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(sigma) = self.sigma {
            config.parameters.sigma = sigma;
        }
        if let Some(rho) = self.rho {
            config.parameters.rho = rho;
        }
        if let Some(beta) = self.beta {
            config.parameters.beta = beta;
        }
        if let Some(t_increment) = self.t_increment {
            config.grid.t_increment = t_increment;
        }
        if let Some(t_max) = self.t_max {
            config.grid.t_max = t_max;
        }
        if let Some(solver) = self.solver {
            config.solver = solver.into();
        }
        if self.enforce_ranges {
            config.range_policy = RangePolicy::Enforce;
        }
        if self.max_samples.is_some() {
            config.budget.max_samples = self.max_samples;
        }
        if self.max_seconds.is_some() {
            config.budget.max_seconds = self.max_seconds;
        }
        Ok(config)
    }
}

fn to_state(values: &[f64]) -> State {
    State::new(values[0], values[1], values[2])
}

fn run(cli: Cli) -> Result<(), LorenzErrors> {
    match cli.command {
        Commands::Simulate { settings, initial } => {
            let config = settings.resolve()?;
            let initial = initial.as_deref().map_or(config.system_a, to_state);
            config.simulation()?.run(initial)?.write_csv(io::stdout().lock())
        }
        Commands::Compare {
            settings,
            initial_a,
            initial_b,
            no_system_b,
        } => {
            let config = settings.resolve()?;
            let initial_a = initial_a.as_deref().map_or(config.system_a, to_state);
            let initial_b = if no_system_b {
                None
            } else {
                initial_b.as_deref().map(to_state).or(config.system_b)
            };
            compare(&config.simulation()?, initial_a, initial_b)?.write_csv(io::stdout().lock())
        }
        Commands::Bounds => {
            for (name, range) in [("rho", ParameterRange::RHO), ("beta", ParameterRange::BETA)] {
                println!(
                    "{name}: min={:.3} max={:.3} step={:.3}",
                    range.min, range.max, range.step
                );
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
