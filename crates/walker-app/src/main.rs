use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use walker_app::gpx::{write_gpx, DEFAULT_GPX_FILE};
use walker_app::preferences::{load_preferences, save_preferences, DEFAULT_PREFERENCES_FILE};
use walker_app::route_file::{ensure_traversable, load_route, parse_waypoint};
use walker_app::state::parse_key_command;
use walker_app::{spawn_nav_loop, LocationSink, LoopOptions};
use walker_core::commands::NavigatorCommand;
use walker_core::constants::TURN_STEP_DEGREES;
use walker_core::enums::Speed;
use walker_core::{Route, Waypoint};
use walker_geo::heading::normalize_heading;
use walker_geo::nudge;
use walker_sim::directions::{DirectProvider, FallbackRouteSource};
use walker_sim::EngineConfig;

#[derive(Parser)]
#[command(name = "walker")]
#[command(about = "Simulate a device moving along a route, one tick at a time")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preferences file (last location, speed, favorites)
    #[arg(long, global = true, default_value = DEFAULT_PREFERENCES_FILE)]
    prefs: PathBuf,

    /// GPX file rewritten with every position
    #[arg(long, global = true, default_value = DEFAULT_GPX_FILE)]
    gpx: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Traverse a route file in real time
    Run {
        /// JSON route: [[lat, lon], ...] or {"points": [...]}
        #[arg(short, long)]
        route: PathBuf,

        /// walk, run, cycle, drive or race (defaults to the saved speed)
        #[arg(short, long)]
        speed: Option<Speed>,

        /// Milliseconds between ticks
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },

    /// Walk in a straight line to a coordinate or a named favorite
    Direct {
        /// Destination as LAT,LON
        #[arg(long, value_parser = parse_waypoint, conflicts_with = "favorite")]
        to: Option<Waypoint>,

        /// Destination favorite name
        #[arg(long)]
        favorite: Option<String>,

        /// Origin as LAT,LON (defaults to the saved location)
        #[arg(long, value_parser = parse_waypoint)]
        from: Option<Waypoint>,

        #[arg(short, long)]
        speed: Option<Speed>,

        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },

    /// Move the saved location a few meters along a heading
    Nudge {
        #[arg(long, allow_negative_numbers = true)]
        meters: f64,

        /// Degrees clockwise from north
        #[arg(long, default_value_t = 0.0)]
        heading: f64,

        /// Extra turns of 15 degrees added to the heading (negative turns left)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        turns: i32,
    },

    /// Show the saved location, speed and initial view span
    Status,

    /// Manage favorite locations
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// List favorites with their index
    List,
    /// Save a coordinate (defaults to the saved location)
    Add {
        #[arg(long, value_parser = parse_waypoint)]
        at: Option<Waypoint>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove the favorite at an index
    Remove { index: usize },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            route,
            speed,
            tick_ms,
        } => {
            let route = load_route(route)?;
            run_traversal(&cli, Some(route), *speed, *tick_ms)
        }
        Commands::Direct {
            to,
            favorite,
            from,
            speed,
            tick_ms,
        } => {
            let prefs = load_preferences(&cli.prefs)?;
            let destination = match (to, favorite) {
                (Some(to), _) => *to,
                (None, Some(name)) => {
                    prefs
                        .favorite_named(name)
                        .with_context(|| format!("no favorite named {name:?}"))?
                        .coordinate
                }
                (None, None) => bail!("give a destination with --to or --favorite"),
            };
            let origin = from
                .or(prefs.user_location)
                .context("no saved location, pass --from LAT,LON")?;
            let mode = speed.unwrap_or(prefs.speed).transport_mode();
            let route = FallbackRouteSource::new(DirectProvider).resolve(origin, destination, mode);
            run_traversal(&cli, route, *speed, *tick_ms)
        }
        Commands::Nudge {
            meters,
            heading,
            turns,
        } => {
            let mut prefs = load_preferences(&cli.prefs)?;
            let from = prefs
                .user_location
                .context("no saved location to move")?;
            let heading = normalize_heading(heading + f64::from(*turns) * TURN_STEP_DEGREES);
            let to = nudge(from, heading, *meters);
            prefs.user_location = Some(to);
            save_preferences(&cli.prefs, &prefs)?;
            write_gpx(&cli.gpx, to)?;
            println!("{to} (heading {heading:.0}°)");
            Ok(())
        }
        Commands::Status => {
            let prefs = load_preferences(&cli.prefs)?;
            println!("speed: {} ({} m/s)", prefs.speed, prefs.speed.meters_per_second());
            match (prefs.user_location, prefs.initial_view_span()) {
                (Some(at), Some((dlat, dlon))) => {
                    println!("location: {at}");
                    println!("view span: {dlat:.6}° lat x {dlon:.6}° lon");
                }
                _ => println!("location: unknown"),
            }
            println!("favorites: {}", prefs.favorites.len());
            Ok(())
        }
        Commands::Favorites { action } => manage_favorites(&cli, action),
    }
}

/// Run one traversal on the navigation loop, reading key commands from stdin.
fn run_traversal(
    cli: &Cli,
    route: Option<Route>,
    speed: Option<Speed>,
    tick_ms: u64,
) -> anyhow::Result<()> {
    let route = ensure_traversable(route)?;
    if tick_ms == 0 {
        bail!("--tick-ms must be positive");
    }

    let mut prefs = load_preferences(&cli.prefs)?;
    let speed = speed.unwrap_or(prefs.speed);
    if prefs.speed != speed {
        prefs.speed = speed;
        save_preferences(&cli.prefs, &prefs)?;
    }

    let options = LoopOptions {
        config: EngineConfig {
            tick_interval: Duration::from_millis(tick_ms),
        },
        exit_on_complete: true,
    };
    let gpx = cli.gpx.clone();
    let prefs_path = cli.prefs.clone();
    let handle = spawn_nav_loop(options, move || {
        LocationSink::new()
            .with_gpx(gpx.clone())
            .with_preferences(prefs_path.clone())
    })
    .context("failed to spawn navigation loop")?;

    handle.send(NavigatorCommand::Start { route, speed });

    // Keyboard commands; the reader thread is left behind when the loop exits
    let keys = handle.sender();
    std::thread::Builder::new()
        .name("walker-keys".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if let Some(command) = parse_key_command(&line) {
                    if keys.send(command).is_err() {
                        break;
                    }
                }
            }
        })
        .context("failed to spawn keyboard reader")?;

    if let Some(last) = handle.join() {
        println!(
            "{} at {}",
            last.phase,
            last.current_position
                .map_or_else(|| "-".to_string(), |p| p.to_string())
        );
    }
    Ok(())
}

fn manage_favorites(cli: &Cli, action: &FavoriteAction) -> anyhow::Result<()> {
    let mut prefs = load_preferences(&cli.prefs)?;
    match action {
        FavoriteAction::List => {
            for (i, favorite) in prefs.favorites.iter().enumerate() {
                match &favorite.name {
                    Some(name) => println!("{i}: {name} ({})", favorite.coordinate),
                    None => println!("{i}: {}", favorite.coordinate),
                }
            }
            return Ok(());
        }
        FavoriteAction::Add { at, name } => {
            let at = at
                .or(prefs.user_location)
                .context("no saved location, pass --at LAT,LON")?;
            prefs.add_favorite(at, name.clone());
        }
        FavoriteAction::Remove { index } => {
            let removed = prefs.remove_favorite(*index)?;
            println!("removed {}", removed.coordinate);
        }
    }
    save_preferences(&cli.prefs, &prefs)
}
