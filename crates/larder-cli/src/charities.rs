//! Catalog inspection and directions command handlers.

use clap::Subcommand;
use larder_core::{load_charities, AppConfig, Charity};
use larder_locator::directions_url;

use crate::setup;

/// Sub-commands available under `charities`.
#[derive(Debug, Subcommand)]
pub enum CharitiesCommands {
    /// Print every charity in the catalog file
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the catalog file for parse and validation errors
    Validate,
}

pub(crate) fn run_charities(
    config: &AppConfig,
    command: &CharitiesCommands,
) -> anyhow::Result<()> {
    let file = load_charities(&config.charities_path)?;

    match command {
        CharitiesCommands::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(&file.charities)?);
        }
        CharitiesCommands::List { json: false } => {
            for charity in &file.charities {
                println!("{}", summary_line(charity));
            }
        }
        CharitiesCommands::Validate => {
            let unmapped = file
                .charities
                .iter()
                .filter(|c| c.coordinates.is_none())
                .count();
            println!(
                "ok: {} charities in {} ({unmapped} without coordinates)",
                file.charities.len(),
                config.charities_path.display()
            );
        }
    }

    Ok(())
}

pub(crate) async fn run_directions(
    config: &AppConfig,
    charity_id: &str,
    demo: bool,
) -> anyhow::Result<()> {
    let charities = setup::catalog(config, demo)?.list_charities().await?;
    let charity = charities
        .iter()
        .find(|c| c.id == charity_id)
        .ok_or_else(|| anyhow::anyhow!("charity '{charity_id}' not found"))?;

    println!("{}", directions_url(&charity.address));
    Ok(())
}

fn summary_line(charity: &Charity) -> String {
    let location = charity
        .coordinates
        .map_or_else(|| "unmapped".to_string(), |c| c.to_string());
    format!(
        "{:<6} {:<32} {:<22} {}",
        charity.id, charity.name, location, charity.address
    )
}
