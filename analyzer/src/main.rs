use anyhow::Context;
use clap::Parser;
use generator::profile::build_track_samples;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::AbnormalityModel;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod ingest;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Flight approach abnormality workflow driver")]
struct Args {
    /// CSV export of raw track samples
    #[arg(long)]
    input: Option<PathBuf>,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Run on synthetic approach tracks instead of a CSV
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 3)]
    flights: usize,
    #[arg(long, default_value_t = 10)]
    rows_per_flight: usize,
    #[arg(long, default_value_t = 2.5)]
    elevation_min: f64,
    #[arg(long, default_value_t = 3.5)]
    elevation_max: f64,
    #[arg(long, default_value_t = 60.0)]
    diff_vs_min: f64,
    #[arg(long, default_value_t = 180.0)]
    diff_vs_max: f64,
    /// Write the analysis result as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the GUI bridge alive for incoming payloads
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            (args.elevation_min, args.elevation_max),
            (args.diff_vs_min, args.diff_vs_max),
        )
    };

    let runner = Runner::new(workflow_config);
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    let samples = if let Some(path) = args.input.as_ref() {
        ingest::load_samples(path)
            .with_context(|| format!("loading track export {}", path.display()))?
    } else if args.synthetic {
        build_track_samples(args.flights, args.rows_per_flight, &runner.pipeline_config())?
    } else {
        Vec::new()
    };

    if !samples.is_empty() {
        let result = runner.execute(samples)?;

        println!(
            "Offline run -> flights {}, elevation abnormal {}, vertical speed abnormal {}",
            result.flights.len(),
            result.elevation_abnormal,
            result.vertical_speed_abnormal
        );

        let model = AbnormalityModel::from(&result);
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline analysis results ready.");

        if let Some(path) = args.report {
            let report = serde_json::to_string_pretty(&model)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, report)
                .with_context(|| format!("writing report {}", path.display()))?;
        }
    } else if !args.serve {
        println!("No input provided; use --input, --synthetic or --serve.");
    }

    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
