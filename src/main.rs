//! `heateq` command-line front end
//!
//! ```text
//! heateq --alg crankn --maxt 2 --ic "step(1,0.5,0)" --savi 100 --plot
//! ```
//!
//! Results land in `./<runame>/`, which is emptied first. Progress goes to
//! the log (level from `--log-level`, else `RUST_LOG`, else `info`).

use std::error::Error;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use heateq::output::{
    plot_profile, CsvConfig, CsvExporter, CsvMetadata, CurveFile, Exporter, PlotConfig, RunDirectory,
    SnapshotWriter,
};
use heateq::physics::HeatParameters;
use heateq::solver::{HeatSolver, LogProgress, SchemeKind, SimulationResult, Termination};

/// Finite-difference solver for the 1-D transient heat equation
#[derive(Parser, Debug)]
#[command(name = "heateq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "1-D transient heat equation solver", long_about = None)]
struct Cli {
    /// Name to give the run and its results directory
    #[arg(long, default_value = "heat_results")]
    runame: String,

    /// Material thermal diffusivity (sq-meters/second)
    #[arg(long, default_value_t = 0.2)]
    alpha: f64,

    /// Material length (meters)
    #[arg(long, default_value_t = 1.0)]
    lenx: f64,

    /// x-increment, best if lenx/dx is an integer (meters)
    #[arg(long, default_value_t = 0.1)]
    dx: f64,

    /// t-increment (seconds)
    #[arg(long, default_value_t = 0.004)]
    dt: f64,

    /// >0: max sim time (seconds) | <0: min l2 change in solution
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    maxt: f64,

    /// Boundary condition at x=0: u(0,t) (Kelvin)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    bc0: f64,

    /// Boundary condition at x=lenx: u(lenx,t) (Kelvin)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    bc1: f64,

    /// Initial condition at t=0: const(v), step(l,xmid,r), ramp(l,r), rand(seed,base,amp), sin(..), spikes(base,amp,loc,...)
    #[arg(long, default_value = "const(1)")]
    ic: String,

    /// Algorithm: ftcs, upwind15 or crankn
    #[arg(long, default_value = "ftcs")]
    alg: SchemeKind,

    /// Save every i-th solution step (0 disables)
    #[arg(long, default_value_t = 0)]
    savi: usize,

    /// Output progress every i-th solution step (0 disables)
    #[arg(long, default_value_t = 100)]
    outi: usize,

    /// Disable all file outputs
    #[arg(long)]
    noout: bool,

    /// Also write the final profile as CSV (12 decimals)
    #[arg(long)]
    csv: bool,

    /// Also render the final profile as PNG
    #[arg(long)]
    plot: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

impl Cli {
    fn parameters(&self) -> HeatParameters {
        HeatParameters::new(
            self.lenx,
            self.maxt,
            self.alpha,
            self.dx,
            self.dt,
            self.bc0,
            self.bc1,
            &self.ic,
            self.outi,
        )
        .with_save_interval(self.savi)
    }
}

fn init_logging(level: Option<&str>) {
    let level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse::<LevelFilter>().ok()))
        .unwrap_or(LevelFilter::Info);

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Full-precision CSV tagged with the run name
fn csv_config(cli: &Cli, result: &SimulationResult) -> CsvConfig {
    let mut metadata = CsvMetadata::from_result(result);
    metadata.add_custom("run", cli.runame.as_str());
    CsvConfig::high_precision().with_metadata(metadata)
}

fn write_outputs(cli: &Cli, directory: &RunDirectory, result: &SimulationResult) -> Result<(), Box<dyn Error>> {
    result.deliver(&mut CurveFile::new(directory.final_curve()))?;

    if cli.csv {
        CsvExporter::new(csv_config(cli, result)).export(result, directory.final_csv())?;
    }

    if cli.plot {
        let config = PlotConfig::profile(format!("{} (t = {} s)", cli.runame, result.time));
        plot_profile(result, directory.final_plot(), Some(&config))?;
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<Termination, Box<dyn Error>> {
    println!("Invoking heat equation solver...");
    let start = Instant::now();

    let mut solver = HeatSolver::new(cli.parameters(), cli.alg)?;

    let result = if cli.noout {
        solver.run_with(&mut LogProgress)
    } else {
        let directory = RunDirectory::prepare(".", &cli.runame)?;
        let mut snapshots = SnapshotWriter::new(&directory);
        let result = solver.run_with(&mut snapshots);

        if let Termination::Unstable { .. } = result.termination {
            log::warn!("unstable run: no final profile written");
        } else {
            write_outputs(cli, &directory, &result)?;
            println!("Solver complete. Results generated here: {}", directory.root().display());
        }
        result
    };

    println!("{}", result.termination);
    println!("Time elapsed: {:.6} s", start.elapsed().as_secs_f64());

    Ok(result.termination)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(termination) if termination.is_failure() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let cli = Cli::parse_from(["heateq"]);
        let params = cli.parameters();
        let defaults = HeatParameters::default();

        assert_eq!(params.length, defaults.length);
        assert_eq!(params.max_time, defaults.max_time);
        assert_eq!(params.alpha, defaults.alpha);
        assert_eq!(params.dx, defaults.dx);
        assert_eq!(params.dt, defaults.dt);
        assert_eq!(params.initial_condition, defaults.initial_condition);
        assert_eq!(params.output_interval, defaults.output_interval);
        assert_eq!(cli.alg, SchemeKind::Ftcs);
        assert_eq!(cli.runame, "heat_results");
    }

    #[test]
    fn test_negative_max_time_and_scheme() {
        let cli = Cli::parse_from(["heateq", "--maxt", "-1e-6", "--alg", "crankn", "--savi", "10"]);

        assert_eq!(cli.maxt, -1e-6);
        assert_eq!(cli.alg, SchemeKind::CrankNicolson);
        assert_eq!(cli.parameters().save_interval, 10);
    }

    #[test]
    fn test_csv_config_names_the_run() {
        let cli = Cli::parse_from(["heateq", "--runame", "rod", "--csv"]);
        let result = HeatSolver::new(HeatParameters::default().with_max_time(0.04), SchemeKind::Ftcs)
            .unwrap()
            .run();

        let config = csv_config(&cli, &result);

        assert_eq!(config.precision, 12);
        assert!(config.include_metadata);
        let metadata = config.metadata.unwrap();
        assert_eq!(metadata.custom.last(), Some(&("run".to_string(), "rod".to_string())));
        assert_eq!(metadata.iterations, Some(10));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(Cli::try_parse_from(["heateq", "--alg", "rk4"]).is_err());
    }
}
