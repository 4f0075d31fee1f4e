//! Terminal front end for the proximity radar.
//!
//! Draws the radar as a single line that is redrawn at the render rate: `P` is the player,
//! digits are nearby cars (last digit of the slot) and `!` marks a car inside the danger
//! threshold. `X` replaces `P` while a car is alongside. Behind is on the left.

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use futures::StreamExt;
use overlap::config::DEFAULT_POLL_RATE_HZ;
use overlap::{
    Overlap, ProviderKind, ProximityEngine, RadarConfig, RadarView, SettingsStore, UpdateRate,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Half-width of the drawn strip in characters
const STRIP_HALF_WIDTH: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "overlap-radar", version, about = "Sim-racing proximity radar")]
struct Cli {
    /// Telemetry source
    #[arg(long, value_enum, default_value_t = ProviderKind::Auto)]
    provider: ProviderKind,

    /// Maximum number of cars shown
    #[arg(long, default_value_t = ProximityEngine::DEFAULT_MAX_CARS)]
    max_cars: usize,

    /// Telemetry polls per second
    #[arg(long, default_value_t = DEFAULT_POLL_RATE_HZ)]
    poll_hz: u32,

    /// Redraws per second; 0 redraws on every poll
    #[arg(long, default_value_t = 30)]
    render_hz: u32,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Directory holding Overlap/settings.json, defaults to the platform config directory
    #[arg(long)]
    settings_dir: Option<PathBuf>,

    /// Change the overlay scale by this many steps before saving
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    nudge_scale: i32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let store = SettingsStore::new(cli.settings_dir.clone());
    let mut settings = store.load().clamped();
    info!(
        x = settings.x,
        y = settings.y,
        scale = settings.scale,
        opacity = settings.opacity,
        "Overlay placement"
    );

    let config =
        RadarConfig { max_cars: cli.max_cars, poll_rate_hz: cli.poll_hz, provider: cli.provider };
    let connection = Overlap::start(&config).context("failed to start radar host")?;
    let mut views = connection.subscribe(UpdateRate::Max(cli.render_hz));

    let duration_secs = cli.duration_secs;
    let deadline = async move {
        match duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(deadline, interrupted);

    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = &mut interrupted => {
                info!("Interrupted");
                break;
            }
            _ = &mut deadline => break,
            view = views.next() => {
                let Some(view) = view else { break };
                write!(stdout, "\r{}", draw(&view))?;
                stdout.flush()?;
            }
        }
    }
    writeln!(stdout)?;

    connection.shutdown().await.context("radar host did not stop cleanly")?;

    if cli.nudge_scale != 0 {
        settings.nudge_scale(cli.nudge_scale);
    }
    if let Err(e) = store.save(&settings) {
        warn!("Could not save overlay settings: {}", e);
    }

    Ok(())
}

fn draw(view: &RadarView) -> String {
    if view.is_waiting() {
        return format!("{:<width$}", "Waiting for iRacing...", width = STRIP_HALF_WIDTH * 2 + 12);
    }

    let mut strip = vec!['-'; STRIP_HALF_WIDTH * 2 + 1];
    strip[STRIP_HALF_WIDTH] = 'P';

    // Draw farthest first so closer cars win shared cells
    for car in view.cars.iter().rev() {
        let column = (STRIP_HALF_WIDTH as f32 * (1.0 + car.normalized_offset())).round() as usize;
        let column = column.min(strip.len() - 1);
        strip[column] = if column == STRIP_HALF_WIDTH {
            'X'
        } else if car.is_danger {
            '!'
        } else {
            char::from_digit((car.car_idx % 10) as u32, 10).unwrap_or('?')
        };
    }

    let closest = view.cars.first().map(|car| car.delta_meters.abs()).unwrap_or(f32::INFINITY);
    let strip: String = strip.into_iter().collect();
    if closest.is_finite() {
        format!("[{}] {:>5.1} m", strip, closest)
    } else {
        format!("[{}]   clear", strip)
    }
}
