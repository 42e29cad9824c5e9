mod input;
mod print;

use std::io::IsTerminal;

use clap::{Args, Parser, Subcommand};
use nearby_app::{CategoryFilter, Locator, LocatorOptions, SortKey, ViewMode};
use nearby_core::{AppConfig, Coordinate, Preferences, YamlPreferenceStore, MAX_RADIUS_M};
use nearby_providers::{FixedPosition, GeoError, GeoProvider, GooglePlacesClient, IpGeolocator};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::print::Style;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Find ATMs and pharmacies near you")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    find: FindArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum PrefsCommands {
    /// Print the stored theme and contrast mode
    Show,
    /// Switch between light and dark theme
    ToggleTheme,
    /// Switch between normal and high contrast
    ToggleContrast,
}

#[derive(Debug, Args)]
struct FindArgs {
    /// Latitude to search around; resolved from the network when omitted
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude to search around
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
    /// Which categories to show: all, atm or pharmacy
    #[arg(long, default_value = "all")]
    filter: CategoryFilter,
    /// Ordering: distance, rating or name
    #[arg(long, default_value = "distance")]
    sort: SortKey,
    /// Only show places whose name or address contains this text
    #[arg(long)]
    search: Option<String>,
    /// Search radius in meters when not sorting by distance
    #[arg(long)]
    radius: Option<u32>,
    /// Output surface: list or map
    #[arg(long, default_value = "list")]
    view: ViewMode,
    /// Keep reading commands from stdin after the first result
    #[arg(long)]
    interactive: bool,
}

/// Position source picked from the command line.
enum Position {
    Fixed(FixedPosition),
    Network(IpGeolocator),
}

impl GeoProvider for Position {
    async fn resolve_current_position(&self) -> Result<Coordinate, GeoError> {
        match self {
            Position::Fixed(fixed) => fixed.resolve_current_position().await,
            Position::Network(ip) => ip.resolve_current_position().await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prefs { command }) => {
            init_tracing(&nearby_core::load_log_level())?;
            run_prefs(&command)
        }
        None => {
            let config = nearby_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "loaded configuration");
            run_find(&config, cli.find).await
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_prefs(command: &PrefsCommands) -> anyhow::Result<()> {
    let mut store = YamlPreferenceStore::new(nearby_core::load_preferences_path());
    let mut preferences = Preferences::load(&store)?;

    match command {
        PrefsCommands::Show => {}
        PrefsCommands::ToggleTheme => {
            preferences.toggle_theme(&mut store)?;
        }
        PrefsCommands::ToggleContrast => {
            preferences.toggle_contrast(&mut store)?;
        }
    }

    println!("theme:    {}", preferences.theme.as_str());
    println!("contrast: {}", preferences.contrast.as_str());
    Ok(())
}

async fn run_find(config: &AppConfig, args: FindArgs) -> anyhow::Result<()> {
    let preferences = Preferences::load(&YamlPreferenceStore::new(
        config.preferences_path.clone(),
    ))?;
    let style = Style::new(preferences, std::io::stdout().is_terminal());

    let geo = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Position::Fixed(FixedPosition(Coordinate::new(lat, lng))),
        _ => Position::Network(IpGeolocator::new(
            &config.geo_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?),
    };
    let places = GooglePlacesClient::with_base_url(
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.details_concurrency,
        &config.places_base_url,
    )?;

    let mut locator = Locator::new(geo, places, &LocatorOptions::from_config(config));
    apply_initial_view(&mut locator, &args)?;

    if args.interactive {
        locator.view_mut().subscribe(move |snapshot| {
            println!("{}", print::render_snapshot(snapshot, style, now()));
        });
    }

    if let Err(e) = locator.initialize().await {
        tracing::warn!(error = %e, "initial load incomplete");
    }

    if !args.interactive {
        println!(
            "{}",
            print::render_snapshot(&locator.view().snapshot(), style, now())
        );
        return Ok(());
    }

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(input::forward_stdin(tx));
    locator.run(rx).await;
    Ok(())
}

fn apply_initial_view<G, P>(locator: &mut Locator<G, P>, args: &FindArgs) -> anyhow::Result<()>
where
    G: GeoProvider,
    P: nearby_providers::PlacesProvider,
{
    let view = locator.view_mut();
    view.set_filter(args.filter);
    view.set_view_mode(args.view);
    if let Some(radius) = args.radius {
        view.set_radius(radius.clamp(1, MAX_RADIUS_M));
    }
    if let Some(search) = &args.search {
        view.set_search(search.as_str());
    }
    // Distance is already the default and needs a position first.
    if args.sort != SortKey::Distance {
        view.set_sort(args.sort)?;
    }
    Ok(())
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
