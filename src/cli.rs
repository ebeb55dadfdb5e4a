//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::clock_adapter::IntervalClock;
use crate::adapters::csv_adapter::CsvSink;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextSink;
use crate::domain::config_validation::{read_float, read_int, validate_simulation_config};
use crate::domain::driver::{RunSummary, run_simulation};
use crate::domain::error::SimError;
use crate::domain::indicator::RsiSmoothing;
use crate::domain::orders::OrderSchedule;
use crate::domain::random_walk::StepDistribution;
use crate::domain::session::{IndicatorSettings, Session, SimulationConfig, TickSnapshot};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::SnapshotSink;

#[derive(Parser, Debug)]
#[command(name = "ticksim", about = "Simulated single-asset trading sandbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation and print one dashboard line per tick
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ticks: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Scripted orders, e.g. "3:buy,5:sell"
        #[arg(long)]
        orders: Option<String>,
        /// Also write per-tick rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Validate a simulation configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
    pub interval_ms: Option<u64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            ticks,
            seed,
            interval_ms,
            orders,
            csv,
        } => {
            let overrides = Overrides {
                ticks,
                seed,
                interval_ms,
            };
            run_command(config.as_deref(), &overrides, orders.as_deref(), csv.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_validate(path: &Path) -> ExitCode {
    let adapter = match load_config(path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_simulation_config(&adapter) {
        Ok(()) => {
            eprintln!("{} is valid", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_command(
    config_path: Option<&Path>,
    overrides: &Overrides,
    orders: Option<&str>,
    csv_path: Option<&Path>,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let schedule = match orders.map(OrderSchedule::parse).transpose() {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let stdout = io::stdout();
    let mut text = TextSink::new(stdout.lock());
    let result = match csv_path {
        Some(path) => CsvSink::create(path).and_then(|csv| {
            let mut tee = TeeSink {
                first: &mut text,
                second: csv,
            };
            simulate(&config, &schedule, &mut tee)
        }),
        None => simulate(&config, &schedule, &mut text),
    };

    match result {
        Ok(summary) => {
            println!("{}", format_summary(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn resolve_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<SimulationConfig, ExitCode> {
    let mut config = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = load_config(path)?;
            validate_simulation_config(&adapter)
                .and_then(|()| build_simulation_config(&adapter))
                .map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::from(&e)
                })?
        }
        None => SimulationConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    Ok(config)
}

/// Build a session from `config` and drive it for `config.ticks` ticks.
pub fn simulate(
    config: &SimulationConfig,
    schedule: &OrderSchedule,
    sink: &mut dyn SnapshotSink,
) -> Result<RunSummary, SimError> {
    let mut session = Session::from_config(config)?;
    let mut clock = IntervalClock::from_millis(config.interval_ms);
    run_simulation(&mut session, &mut clock, sink, config.ticks, schedule)
}

pub fn apply_overrides(config: &mut SimulationConfig, overrides: &Overrides) {
    if let Some(ticks) = overrides.ticks {
        config.ticks = ticks;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if let Some(ms) = overrides.interval_ms {
        config.interval_ms = ms;
    }
}

pub fn build_simulation_config(adapter: &dyn ConfigPort) -> Result<SimulationConfig, SimError> {
    let defaults = SimulationConfig::default();
    let default_indicators = IndicatorSettings::default();

    let distribution = match adapter.get_string("simulation", "distribution") {
        Some(s) => s
            .parse::<StepDistribution>()
            .map_err(|reason| SimError::ConfigInvalid {
                section: "simulation".into(),
                key: "distribution".into(),
                reason,
            })?,
        None => defaults.distribution,
    };

    let rsi_smoothing = match adapter.get_string("indicators", "rsi_smoothing") {
        Some(s) => s
            .parse::<RsiSmoothing>()
            .map_err(|reason| SimError::ConfigInvalid {
                section: "indicators".into(),
                key: "rsi_smoothing".into(),
                reason,
            })?,
        None => default_indicators.rsi_smoothing,
    };

    let history_limit = adapter
        .get_u64_opt("simulation", "history_limit")
        .map(|v| v as usize);

    Ok(SimulationConfig {
        symbol: adapter
            .get_string("simulation", "symbol")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.symbol),
        initial_price: read_float(adapter, "simulation", "initial_price")?
            .unwrap_or(defaults.initial_price),
        max_step: read_float(adapter, "simulation", "max_step")?.unwrap_or(defaults.max_step),
        distribution,
        seed: adapter.get_u64_opt("simulation", "seed"),
        history_limit,
        ticks: adapter
            .get_u64_opt("simulation", "ticks")
            .unwrap_or(defaults.ticks),
        interval_ms: adapter
            .get_u64_opt("simulation", "interval_ms")
            .unwrap_or(defaults.interval_ms),
        initial_balance: read_float(adapter, "portfolio", "initial_balance")?
            .unwrap_or(defaults.initial_balance),
        indicators: IndicatorSettings {
            sma_window: read_window(adapter, "sma_window", default_indicators.sma_window)?,
            rsi_period: read_window(adapter, "rsi_period", default_indicators.rsi_period)?,
            rsi_smoothing,
            volatility_window: read_window(
                adapter,
                "volatility_window",
                default_indicators.volatility_window,
            )?,
        },
    })
}

fn read_window(adapter: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, SimError> {
    match read_int(adapter, "indicators", key)? {
        Some(value) => usize::try_from(value).map_err(|_| SimError::ConfigInvalid {
            section: "indicators".into(),
            key: key.into(),
            reason: format!("{key} must be at least 1"),
        }),
        None => Ok(default),
    }
}

pub fn format_summary(summary: &RunSummary) -> String {
    let last = &summary.last;
    format!(
        "Finished {} ticks | {} price {:.2} | fills {} | rejected {} | cash {:.2} | shares {} | total {:.2} | P/L {:+.2}",
        summary.ticks,
        last.symbol,
        last.price,
        summary.fills,
        summary.rejections,
        last.balance,
        last.shares,
        last.total_value,
        last.profit_loss,
    )
}

/// Publishes every snapshot to two sinks, stopping at the first error.
struct TeeSink<'a, A: SnapshotSink, B: SnapshotSink> {
    first: &'a mut A,
    second: B,
}

impl<A: SnapshotSink, B: SnapshotSink> SnapshotSink for TeeSink<'_, A, B> {
    fn publish(&mut self, snapshot: &TickSnapshot) -> Result<(), SimError> {
        self.first.publish(snapshot)?;
        self.second.publish(snapshot)
    }

    fn finish(&mut self) -> Result<(), SimError> {
        self.first.finish()?;
        self.second.finish()
    }
}
