use std::error::Error;
use std::process::ExitCode;

use bike_routes::traits::MapViewport;
use bike_routes::{Bounds, GoogleMapsConfig, PipelineOrchestrator, RouteSet, TravelMode};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Find alternative bike routes between two places
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start location, e.g. "Los Angeles, CA"
    #[arg(short, long)]
    from: String,

    /// End location, e.g. "Santa Monica, CA"
    #[arg(short, long)]
    to: String,

    /// Travel mode
    #[arg(long, value_enum, default_value_t = Mode::Bicycle)]
    mode: Mode,

    /// Alternative to highlight (0 is the service's top pick)
    #[arg(long, default_value_t = 0)]
    select: usize,

    /// Print the route set as JSON
    #[arg(long)]
    json: bool,

    /// Google Maps Platform API key; defaults to $GOOGLE_MAPS_API_KEY
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Bicycle,
    Drive,
    Walk,
    TwoWheeler,
}

impl From<Mode> for TravelMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Bicycle => TravelMode::Bicycle,
            Mode::Drive => TravelMode::Drive,
            Mode::Walk => TravelMode::Walk,
            Mode::TwoWheeler => TravelMode::TwoWheeler,
        }
    }
}

/// Stands in for the map widget: remembers where it was asked to look.
#[derive(Debug, Default)]
struct TerminalViewport {
    bounds: Option<Bounds>,
}

impl MapViewport for TerminalViewport {
    fn fit_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();

    let mut config = GoogleMapsConfig::from_env();
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }

    let pipeline = PipelineOrchestrator::from_config(config)?.with_mode(cli.mode.into());

    if let Err(err) = pipeline.run(&cli.from, &cli.to) {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    if !pipeline.select(cli.select) {
        tracing::warn!(index = cli.select, "no such alternative, keeping the first");
    }

    let Some(set) = pipeline.route_set() else {
        return Ok(ExitCode::FAILURE);
    };

    let mut viewport = TerminalViewport::default();
    pipeline.fit_viewport(set.selected_index(), &mut viewport)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print_summary(&set, viewport.bounds);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(set: &RouteSet, viewport: Option<Bounds>) {
    for (index, route) in set.routes().iter().enumerate() {
        let marker = if set.is_selected(index) { "*" } else { " " };
        println!(
            "{marker} [{index}] {:>7.2} km  {:>5.0} min  {} points",
            route.distance_meters as f64 / 1000.0,
            route.duration_seconds as f64 / 60.0,
            route.points().len(),
        );
    }

    if let Some(bounds) = viewport {
        let center = bounds.center();
        println!(
            "viewport: lat {:.5}..{:.5}, lng {:.5}..{:.5} (center {:.5}, {:.5})",
            bounds.min_lat,
            bounds.max_lat,
            bounds.min_lng,
            bounds.max_lng,
            center.latitude,
            center.longitude,
        );
    }
}
