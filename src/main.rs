use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

use skytrack::config::Config;
use skytrack::render::{cardinal_direction, TrackGeometry};
use skytrack::track::{Crossing, TrackConfigOverrides};
use skytrack::{compute_track, Location, SatelliteProvider, Track, TrackConfig, TrackPoint};

#[derive(Parser)]
#[command(name = "skytrack")]
#[command(about = "Sampled sky tracks of a satellite for a ground observer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file
    Validate { config: String },
    /// Compute the track around an instant
    Track {
        config: String,
        /// Center of the window (RFC3339), defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Sampling interval, e.g. "10m"
        #[arg(long)]
        interval: Option<String>,
        /// Window on each side of the center, e.g. "12h"
        #[arg(long)]
        window: Option<String>,
        /// Sky dome radius for projected geometry
        #[arg(long)]
        radius: Option<f64>,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    satellite: Option<&'a str>,
    norad_id: u64,
    observer: Location,
    center: DateTime<Utc>,
    config: TrackConfig,
    track: &'a Track,
    crossings: Vec<Crossing>,
    geometry: TrackGeometry,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Track {
            config,
            at,
            interval,
            window,
            radius,
            json,
        } => track(&config, at, interval, window, radius, json),
    }
}

fn validate(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.tle().map(|tle| SatelliteProvider::from_tle(&tle)) {
        Ok(Ok(provider)) => {
            println!(
                "Config is valid: {} ({}) from {:.4}, {:.4}",
                provider.name().unwrap_or("unnamed"),
                provider.norad_id(),
                config.observer.latitude_deg,
                config.observer.longitude_deg
            );
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("TLE error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn track(
    path: &str,
    at: Option<String>,
    interval: Option<String>,
    window: Option<String>,
    radius: Option<f64>,
    json: bool,
) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let center = match at.as_deref().map(parse_datetime).transpose() {
        Ok(t) => t.unwrap_or_else(Utc::now),
        Err(e) => {
            eprintln!("Invalid --at: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let overrides = match build_overrides(interval.as_deref(), window.as_deref()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let track_config = overrides.apply_to(config.track);

    let provider = match config
        .tle()
        .map_err(|e| e.to_string())
        .and_then(|tle| SatelliteProvider::from_tle(&tle).map_err(|e| e.to_string()))
    {
        Ok(p) => p.with_observer_altitude(config.observer.altitude_m),
        Err(e) => {
            eprintln!("Satellite error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let location = config.observer.location();
    let track = match compute_track(&provider, center, location, track_config.into()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Track error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "computed {} samples around {} for {}",
        track.points().len(),
        center,
        provider.name().unwrap_or("unnamed")
    );

    let radius = radius.unwrap_or(config.render.radius);
    if json {
        let report = Report {
            satellite: provider.name(),
            norad_id: provider.norad_id(),
            observer: location,
            center,
            config: track_config,
            track: &track,
            crossings: track.crossings(),
            geometry: TrackGeometry::from_track(&track, radius),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&track, provider.name(), config.observer.name.as_deref());
    }

    ExitCode::SUCCESS
}

fn print_summary(track: &Track, satellite: Option<&str>, observer: Option<&str>) {
    let points = track.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        println!("No samples");
        return;
    };
    println!(
        "{} seen from {}: {} samples, {} to {}",
        satellite.unwrap_or("unnamed"),
        observer.unwrap_or("observer"),
        points.len(),
        first.timestamp(),
        last.timestamp()
    );

    for (label, point) in [
        ("rise", track.rise_point()),
        ("transit", track.transit_point()),
        ("set", track.set_point()),
    ] {
        match point {
            Some(p) => println!("  {:<8}{}", label, describe(p)),
            None => println!("  {:<8}--", label),
        }
    }

    let segments = track.segments();
    println!(
        "  {} above-horizon run(s), {} below-horizon run(s)",
        segments.above_runs.len(),
        segments.below_runs.len()
    );
}

fn describe(point: &TrackPoint) -> String {
    format!(
        "{}  alt {:>6.2}  az {:>6.2} ({})",
        point.timestamp().format("%Y-%m-%d %H:%M UTC"),
        point.altitude_deg(),
        point.azimuth_deg(),
        cardinal_direction(point.azimuth_deg())
    )
}

fn build_overrides(
    interval: Option<&str>,
    window: Option<&str>,
) -> Result<TrackConfigOverrides, String> {
    let interval_minutes = interval
        .map(|s| parse_duration_secs(s).map(|secs| secs / 60.0))
        .transpose()
        .map_err(|e| format!("Invalid --interval: {}", e))?;
    let window_hours_each_side = window
        .map(|s| parse_duration_secs(s).map(|secs| secs / 3600.0))
        .transpose()
        .map_err(|e| format!("Invalid --window: {}", e))?;
    Ok(TrackConfigOverrides {
        interval_minutes,
        window_hours_each_side,
    })
}

fn parse_duration_secs(s: &str) -> Result<f64, String> {
    humantime::parse_duration(s.trim())
        .map(|d| d.as_secs_f64())
        .map_err(|e| e.to_string())
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}
