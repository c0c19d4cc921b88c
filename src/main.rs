// src/main.rs
mod drivers;
mod gui;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use drivers::{
    export_analysis, write_analysis_hints, write_report, AnalysisPipeline, CaptureError,
    CsvFileSource, DEFAULT_CAPTURE_FILE, DEFAULT_SAMPLE_RATE_HZ,
};
#[derive(Parser, Debug)]
#[command(
    name = "uma8-scope",
    about = "Rank UMA-8 capture channels by peak amplitude and plot their waveforms"
)]
struct Cli {
    /// CSV written by the capture program: a header of channel names, one row per sample
    #[arg(default_value = DEFAULT_CAPTURE_FILE)]
    input: PathBuf,
    /// Must match the rate the capture program recorded at
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    sample_rate: f64,
    /// Write channels.png, overlay.png and peak_report.json here instead of opening a window
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
fn run(cli: &Cli) -> Result<()> {
    println!("Reading audio data from '{}'...", cli.input.display());
    let mut pipeline = AnalysisPipeline::new(CsvFileSource::new(&cli.input), cli.sample_rate)?;
    let analysis = pipeline.run()?;
    {
        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        write_report(&mut stdout, &analysis.ranked)?;
    }
    match &cli.export {
        Some(dir) => {
            let written = export_analysis(&analysis, dir)
                .map_err(|err| anyhow!("failed to export plots to {}: {err}", dir.display()))?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        None => {
            println!("\nGenerating plots... Close the plot window to exit.");
            {
                let mut stdout = io::stdout().lock();
                writeln!(stdout)?;
                write_analysis_hints(&mut stdout)?;
            }
            info!("opening waveform viewer");
            gui::show(&analysis).map_err(|err| anyhow!("failed to open plot window: {err}"))?;
        }
    }
    Ok(())
}
fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<CaptureError>() {
        Some(CaptureError::NotFound { path }) => {
            eprintln!("Error: The file '{}' was not found.", path.display());
            eprintln!("Please run the capture program first to generate the data file.");
        }
        Some(err @ (CaptureError::Parse { .. } | CaptureError::Io(_))) => {
            eprintln!("An error occurred while reading the file: {err}");
        }
        _ => eprintln!("Error: {err:#}"),
    }
}
