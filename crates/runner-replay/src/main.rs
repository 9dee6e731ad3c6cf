use anyhow::Context;
use clap::Parser;
use runner_core::{GestureConfig, ThresholdConfig};
use runner_replay::{read_trace, replay, synth, write_trace, SynthConfig, TraceRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "runner-replay",
    about = "Replay pose traces through the runner gesture core"
)]
struct Cli {
    /// JSON Lines trace to replay (one frame per line)
    trace: Option<PathBuf>,

    /// Generate a synthetic trace instead of reading one
    #[arg(long, conflicts_with = "trace")]
    simulate: bool,

    /// RNG seed for --simulate
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Positional noise in pixels for --simulate
    #[arg(long, default_value_t = 1.5)]
    noise: f32,

    /// Write the synthetic trace here as well
    #[arg(long, requires = "simulate")]
    save_trace: Option<PathBuf>,

    /// Shift of the neutral line in pixels (positive is lower in the image)
    #[arg(long, allow_hyphen_values = true)]
    baseline_adjust: Option<i32>,

    /// Pixels above neutral that count as a jump
    #[arg(long)]
    jump_threshold: Option<i32>,

    /// Pixels below neutral that count as a crouch
    #[arg(long)]
    crouch_threshold: Option<i32>,

    /// Frames averaged for the baseline
    #[arg(long)]
    calibration_frames: Option<u32>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn thresholds(&self) -> ThresholdConfig {
        let defaults = ThresholdConfig::default();
        ThresholdConfig {
            baseline_adjust: self.baseline_adjust.unwrap_or(defaults.baseline_adjust),
            jump_threshold: self.jump_threshold.unwrap_or(defaults.jump_threshold),
            crouch_threshold: self.crouch_threshold.unwrap_or(defaults.crouch_threshold),
        }
    }

    fn gesture_config(&self) -> GestureConfig {
        let mut config = GestureConfig::default();
        if let Some(frames) = self.calibration_frames {
            config.calibration_frames = frames;
        }
        config
    }

    fn records(&self) -> anyhow::Result<Vec<TraceRecord>> {
        if self.simulate {
            anyhow::ensure!(
                self.noise.is_finite() && self.noise >= 0.0,
                "--noise must be a finite, non-negative pixel count, got {}",
                self.noise
            );
            let config = SynthConfig {
                seed: self.seed,
                noise_px: self.noise,
                ..SynthConfig::default()
            };
            let records = synth::generate(&config, &synth::default_script());
            log::info!("[replay] simulated {} frames (seed {})", records.len(), self.seed);
            if let Some(path) = &self.save_trace {
                let file = File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                write_trace(file, &records)?;
                log::info!("[replay] trace written to {}", path.display());
            }
            return Ok(records);
        }
        let path = self
            .trace
            .as_ref()
            .context("pass a trace file or --simulate")?;
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let records = read_trace(BufReader::new(file))
            .with_context(|| format!("reading {}", path.display()))?;
        log::info!("[replay] loaded {} frames from {}", records.len(), path.display());
        Ok(records)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let records = cli.records()?;
    let report = replay(&records, cli.gesture_config(), cli.thresholds())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    for ev in &report.events {
        match ev.scored {
            Some(scored) => println!("{:>9.1} ms  {} (scored: {})", ev.t, ev.action, scored),
            None => println!("{:>9.1} ms  {}", ev.t, ev.action),
        }
    }
    println!(
        "{} frames, {} jumps, {} crouches, ended in {}",
        report.frames, report.jumps, report.crouches, report.final_mode
    );
    Ok(())
}
