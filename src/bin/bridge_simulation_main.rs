// bridge_simulation_main.rs
use bridge_traffic::monitoring::crossing_log::write_crossings_csv;
use bridge_traffic::monitoring::status::{spawn_status_printer, StatusFormat};
use bridge_traffic::{BridgeMonitor, Dispatcher, SimulationConfig, SimulationError};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Parser)]
#[clap(author, version, about = "Batch traffic over a two-lane weight-limited bridge", long_about = None)]
struct Args {
    /// JSON scenario file; without it the groups are asked for on stdin
    #[clap(short, long, value_parser)]
    scenario: Option<PathBuf>,
    /// Crossing time per vehicle in milliseconds (overrides the scenario)
    #[clap(long, value_parser)]
    crossing_ms: Option<u64>,
    /// Seed for vehicle generation (overrides the scenario)
    #[clap(long, value_parser)]
    seed: Option<u64>,
    /// Write one CSV row per crossing
    #[clap(long, value_parser)]
    csv: Option<PathBuf>,
    /// Print bridge status as JSON lines
    #[clap(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig, SimulationError> {
    let mut config = match &args.scenario {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::prompt(io::stdin().lock(), &mut io::stdout())?,
    };
    if let Some(ms) = args.crossing_ms {
        config.crossing_time_ms = ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<(), SimulationError> {
    let config = load_config(&args)?;

    let (status_tx, status_rx) = mpsc::unbounded_channel();
    let format = if args.json {
        StatusFormat::Json
    } else {
        StatusFormat::Text
    };
    let printer = spawn_status_printer(status_rx, format);

    let monitor = Arc::new(BridgeMonitor::new().with_status_channel(status_tx));
    let mut dispatcher = Dispatcher::new(monitor, config.crossing_time(), config.seed);
    let records = dispatcher.run(&config).await;

    // Dropping the last monitor handle closes the status channel.
    drop(dispatcher);
    match printer.await {
        Ok(printed) => log::debug!("{} status snapshots printed", printed),
        Err(e) => log::warn!("Status printer stopped early: {}", e),
    }

    let records = records?;
    if let Some(path) = &args.csv {
        write_crossings_csv(path, &records)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("[{}] {}", e.as_label(), e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
