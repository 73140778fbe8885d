use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_core::{Vector3, DEFAULT_BOID_COUNT};
use boid_demo::{load_settings, parse_point, Host, DEFAULT_CONTACT_RANGE_SQUARED};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flock runner", long_about = None)]
struct Args {
    /// Scene settings JSON (flock tuning, spawn region, frame delta, seed)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Frame delta in seconds, overriding the settings file
    #[arg(long)]
    dt: Option<f32>,

    /// Spawn seed, overriding the settings file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Report boids touching a ball at this point every tick, given as x,y,z
    #[arg(long, value_parser = parse_point)]
    ball: Option<Vector3>,

    /// Squared contact distance for --ball
    #[arg(long, default_value_t = DEFAULT_CONTACT_RANGE_SQUARED)]
    contact_range_sq: f32,

    /// Log a status line every N ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Print the final frame as JSON on stdout
    #[arg(long)]
    dump: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(dt) = args.dt {
        settings.delta_time = dt;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    log::info!("Boid demo starting...");
    log::info!("Ticks: {} at {}s", args.ticks, settings.delta_time);
    log::debug!("Flock tuning: {:?}", settings.flock);

    let mut host = Host::<DEFAULT_BOID_COUNT>::from_settings(&settings)
        .context("Failed to initialize flock")?;

    for _ in 0..args.ticks {
        host.tick()?;

        if let Some(point) = args.ball {
            let hits = host.contacts(point, args.contact_range_sq);
            if !hits.is_empty() {
                log::info!(
                    "Tick {}: boids {:?} touched the ball",
                    host.ticks_elapsed(),
                    hits
                );
            }
        }

        if args.report_every > 0 && host.ticks_elapsed() % args.report_every == 0 {
            let status = host.status();
            log::info!(
                "Tick {}: mean speed {:.2}, height {:.1}..{:.1}",
                status.tick,
                status.mean_speed,
                status.min_y,
                status.max_y
            );
        }
    }

    if args.dump {
        let frame = serde_json::to_string_pretty(&host.frame())?;
        println!("{}", frame);
    }

    log::info!("Done after {} ticks (seed {})", host.ticks_elapsed(), host.seed());
    Ok(())
}
