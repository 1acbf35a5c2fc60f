//! Headless host for the lane runner
//!
//! Usage:
//!   lane-host run --config run.json --script inputs.json --seconds 30
//!   lane-host check-config run.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use lane_host::{GameRunner, InputScript};
use lane_runner::{GameEvent, RunnerConfig, RunnerGame};

#[derive(Parser)]
#[command(name = "lane-host")]
#[command(about = "Drive a lane runner session without a window")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session, replaying scripted input, and log its events
    Run {
        /// Runner config (JSON). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Input timeline (JSON list of {at, input})
        #[arg(long)]
        script: Option<PathBuf>,
        /// Simulated seconds to run
        #[arg(long, default_value_t = 10.0)]
        seconds: f32,
        /// Ticks per simulated second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print the event report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Validate a config and print it with defaults filled in
    CheckConfig {
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, script, seconds, fps, json } => {
            run(config.as_deref(), script.as_deref(), seconds, fps, json)
        }
        Commands::CheckConfig { config } => check_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    let Some(path) = path else {
        return Ok(RunnerConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    RunnerConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

fn load_script(path: Option<&Path>) -> Result<InputScript> {
    let Some(path) = path else {
        return Ok(InputScript::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    InputScript::from_json(&json).with_context(|| format!("Invalid script {}", path.display()))
}

fn run(config: Option<&Path>, script: Option<&Path>, seconds: f32, fps: u32, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let mut script = load_script(script)?;
    info!("{} scripted inputs", script.len());

    let game = RunnerGame::new(config).context("Failed to build runner session")?;
    let mut runner = GameRunner::new(game);
    let report = lane_host::run(&mut runner, &mut script, seconds, fps);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for timed in &report.events {
            info!("t={:>7.3}  {}", timed.time, describe(&timed.event));
        }
    }

    let game = runner.game();
    info!(
        "finished: {} frames, speed {:.2}, lane {}",
        report.frames,
        game.speed(),
        game.player().map_or(0, |p| p.current_lane()),
    );
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::LaneChanged { lane } => format!("lane -> {}", lane),
        GameEvent::Jumped => "jump".to_string(),
        GameEvent::Landed { airtime } => format!("landed after {:.2}s", airtime),
        GameEvent::JumpReady => "jump ready".to_string(),
        GameEvent::SpeedChanged { speed } => format!("speed {:.2}", speed),
        GameEvent::SectionRecycled { section } => format!("section {} recycled", section.0),
    }
}
