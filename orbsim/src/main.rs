use orbsim::simulation::diagnostics::{angular_momentum, total_energy};
use orbsim::{bench_gravity, bench_verlet};
use orbsim::{Scenario, ScenarioConfig, Ticker};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

const AU: f64 = 1.495_978_707e11;
const DAY: f64 = 86_400.0;

#[derive(Parser, Debug)]
#[command(about = "Headless gravitational N-body simulator")]
struct Args {
    /// Scenario file; bare names are looked up in the crate's `scenarios/`
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Speed input 0..=100, overrides the scenario
    #[arg(long)]
    speed: Option<u32>,

    /// Wall-clock milliseconds between ticks, overrides the scenario
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Log body positions every K ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Run the direct-sum benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = scenario_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    info!("loaded {}", config_path.display());
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_verlet();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let Scenario { mut engine, tick_interval } =
        Scenario::build(scenario_cfg).context("invalid scenario")?;

    if let Some(speed) = args.speed {
        engine.set_time_scale(speed).context("invalid --speed")?;
    }
    let interval = args.interval_ms.map(Duration::from_millis).unwrap_or(tick_interval);

    let g = engine.params().G;
    let e0 = total_energy(engine.bodies(), g);
    let l0 = angular_momentum(engine.bodies()).norm();

    engine.start();
    let report_every = args.report_every;
    let steps = Ticker::new(interval).run(&mut engine, args.ticks, |tick, stepped, eng| {
        if !stepped || report_every == 0 || (tick + 1) % report_every != 0 {
            return;
        }
        info!("t = {:.2} days ({} steps)", eng.sim_time() / DAY, eng.step_count());
        for (i, b) in eng.bodies().iter().enumerate() {
            let p = b.position() / AU;
            info!("  [{i}] {:<10} ({:+.4}, {:+.4}, {:+.4}) AU", b.name(), p.x, p.y, p.z);
        }
    })?;
    engine.stop();

    let e1 = total_energy(engine.bodies(), g);
    let l1 = angular_momentum(engine.bodies()).norm();
    info!(
        "done: {steps} steps, {:.2} simulated days, dE/E = {:.3e}, dL/L = {:.3e}",
        engine.sim_time() / DAY,
        relative_drift(e0, e1),
        relative_drift(l0, l1)
    );

    Ok(())
}

fn relative_drift(before: f64, after: f64) -> f64 {
    if before == 0.0 {
        return 0.0;
    }
    ((after - before) / before).abs()
}
