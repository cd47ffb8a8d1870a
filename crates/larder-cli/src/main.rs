mod charities;
mod locate;
mod nearby;
mod setup;

use clap::{CommandFactory, Parser, Subcommand};
use larder_core::{Coordinate, FoodCategory};
use tracing_subscriber::EnvFilter;

use crate::charities::CharitiesCommands;

#[derive(Debug, Parser)]
#[command(name = "larder")]
#[command(about = "Find food charities near you and get directions to donate surplus food")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List charities within a radius, nearest first
    Nearby {
        /// Origin latitude; defaults to the resolved or fallback location
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Origin longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Search radius in miles (defaults to `LARDER_DEFAULT_RADIUS_MILES`)
        #[arg(long, allow_negative_numbers = true)]
        radius: Option<f64>,
        /// Only charities that accept this food category
        #[arg(long)]
        accepts: Option<FoodCategory>,
        /// Only charities that offer pickup
        #[arg(long)]
        pickup: bool,
        /// Use the built-in demo catalog instead of the configured one
        #[arg(long)]
        demo: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the current location, falling back when unavailable
    Locate {
        /// Also print an embeddable map URL (needs `LARDER_MAPS_API_KEY`)
        #[arg(long)]
        map: bool,
    },
    /// Inspect the charity catalog file
    Charities {
        #[command(subcommand)]
        command: CharitiesCommands,
    },
    /// Print a directions link to a charity
    Directions {
        /// Charity id from the catalog
        charity_id: String,
        /// Look the charity up in the built-in demo catalog
        #[arg(long)]
        demo: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = larder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Nearby {
            lat,
            lng,
            radius,
            accepts,
            pickup,
            demo,
            json,
        } => {
            let args = nearby::NearbyArgs {
                origin: lat.zip(lng).map(|(lat, lng)| Coordinate::new(lat, lng)),
                radius_miles: radius,
                accepts,
                pickup_only: pickup,
                demo,
                json,
            };
            nearby::run_nearby(&config, &args).await?;
        }
        Commands::Locate { map } => locate::run_locate(&config, map).await?,
        Commands::Charities { command } => charities::run_charities(&config, &command)?,
        Commands::Directions { charity_id, demo } => {
            charities::run_directions(&config, &charity_id, demo).await?;
        }
    }

    Ok(())
}
