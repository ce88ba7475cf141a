use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use patrolboard::core::geo::GeofenceStatus;
use patrolboard::{DashboardStore, MapView, Scene, Seed};

#[derive(Parser)]
#[command(name = "patrolboard")]
#[command(about = "Admin dashboard for guarded sites, field staff and live rides")]
struct Cli {
    /// JSON dataset to start from instead of the built-in demo data
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Enable debug logging for this crate
    #[arg(short, long)]
    verbose: bool,

    /// Print the geofence report and exit without opening a window
    #[arg(long)]
    report: bool,

    /// Show a back button on the dashboard that returns to sign-in
    #[arg(long)]
    allow_back: bool,

    /// Open straight on the dashboard
    #[arg(long)]
    skip_auth: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info,patrolboard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_report(store: &DashboardStore) {
    let mut view = MapView::new(Scene::new());
    view.sync(store.offices(), store.employees());

    println!("\n=== Geofence Report ===");
    println!(
        "Offices: {}  Employees: {}  Guards on map: {}",
        store.offices().len(),
        store.employees().len(),
        view.guards().len()
    );

    for guard in view.guards() {
        let office = guard.office_name.as_deref().unwrap_or("N/A");
        match guard.status {
            GeofenceStatus::Unassigned => {
                println!("  {} - no office assigned", guard.name);
            }
            GeofenceStatus::Inside { distance_m } => {
                println!("  {} - {:.0} m from {} (inside)", guard.name, distance_m, office);
            }
            GeofenceStatus::Outside { distance_m } => {
                println!(
                    "  {} - {:.0} m from {} - Outside Geofence!",
                    guard.name, distance_m, office
                );
            }
        }
    }

    let outside = view.guards().iter().filter(|g| g.status.is_outside()).count();
    println!("\nOutside geofence: {outside}");
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let seed = match &args.seed {
        Some(path) => {
            info!("Loading seed dataset: {}", path.display());
            Seed::from_path(path)?
        }
        None => Seed::default(),
    };
    // Reject a bad dataset before any window opens.
    let store = DashboardStore::from_seed(seed.clone()).context("Seed dataset rejected")?;

    #[cfg(feature = "gui")]
    if !args.report {
        let config = patrolboard::AppConfig {
            seed,
            allow_back: args.allow_back,
            skip_auth: args.skip_auth,
            ..patrolboard::AppConfig::default()
        };
        return patrolboard::gui::run(config);
    }

    print_report(&store);
    Ok(())
}
