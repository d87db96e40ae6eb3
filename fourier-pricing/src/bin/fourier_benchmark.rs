//! Monte Carlo versus Fourier benchmark for the four supported models.
//!
//! `RUST_LOG=debug` shows integration and simulation details.

use clap::{Parser, ValueEnum};
use fourier_pricing::prelude::*;
use fp_core::fail;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Right {
    Put,
    Call,
}

impl From<Right> for OptionType {
    fn from(right: Right) -> Self {
        match right {
            Right::Put => OptionType::Put,
            Right::Call => OptionType::Call,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fourier-benchmark")]
#[command(about = "Compare Monte Carlo and Fourier prices of European options")]
struct Args {
    /// Option right
    #[arg(long, value_enum, default_value_t = Right::Put)]
    right: Right,

    /// Monte Carlo paths per grid point
    #[arg(long, default_value = "50000")]
    paths: usize,

    /// Time steps per year for the stochastic-volatility models
    #[arg(long, default_value = "100")]
    steps_per_year: usize,

    /// Base random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Lowest strike
    #[arg(long, default_value = "80")]
    min_strike: f64,

    /// Highest strike
    #[arg(long, default_value = "120")]
    max_strike: f64,

    /// Strike spacing
    #[arg(long, default_value = "5")]
    strike_step: f64,
}

fn date(y: i32, m: u32, d: u32) -> Result<Date> {
    Date::from_ymd_opt(y, m, d).ok_or_else(|| Error::InvalidParameters(format!("invalid date {y}-{m}-{d}")))
}

/// Reference scenario: S₀ = 100, r = 1 %, σ = 20 %, plus jump and
/// stochastic-volatility parameters for the other models.
fn scenario() -> Result<MarketEnvironment> {
    MarketEnvironment::builder("reference", date(2020, 1, 1)?)
        .with_constant(keys::INITIAL_VALUE, 100.0)
        .with_constant(keys::SHORT_RATE, 0.01)
        .with_constant(keys::VOLATILITY, 0.2)
        .with_constant(keys::LAMBDA, 0.3)
        .with_constant(keys::MU, -0.2)
        .with_constant(keys::DELTA, 0.1)
        .with_constant(keys::V0, 0.04)
        .with_constant(keys::KAPPA, 2.5)
        .with_constant(keys::THETA, 0.04)
        .with_constant(keys::VOL_OF_VOL, 0.3)
        .with_constant(keys::RHO, -0.5)
        .build()
}

fn strikes(args: &Args) -> Result<Vec<Real>> {
    if !(args.strike_step > 0.0 && args.min_strike > 0.0 && args.max_strike >= args.min_strike) {
        fail!(Error::InvalidParameters(format!(
            "bad strike range {}..{} step {}",
            args.min_strike, args.max_strike, args.strike_step
        )));
    }
    let n = ((args.max_strike - args.min_strike) / args.strike_step + 1e-9).floor() as usize;
    Ok((0..=n).map(|i| args.min_strike + i as Real * args.strike_step).collect())
}

fn run(args: &Args) -> Result<()> {
    let option_type = OptionType::from(args.right);
    let env = scenario()?;
    let maturities = [date(2020, 3, 30)?, date(2020, 6, 29)?, date(2020, 12, 31)?];
    let strikes = strikes(args)?;

    let engine = MonteCarloEngine::new(
        MonteCarloSettings::default()
            .with_paths(args.paths)
            .with_steps_per_year(args.steps_per_year)
            .with_seed(args.seed),
    )?;
    let harness = BenchmarkHarness::new(engine, FourierPricer::default());
    info!(
        "{} paths per point, seed {}, strikes {:?}",
        args.paths, args.seed, strikes
    );

    for tag in ModelTag::ALL {
        let params = ModelParameters::from_environment(tag, &env)?;
        let report = harness.run(&params, &env, &maturities, &strikes, option_type);
        println!("{report}");
        println!();
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("fourier-benchmark: {e}");
        std::process::exit(1);
    }
}
