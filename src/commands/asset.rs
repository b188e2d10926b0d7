use anyhow::{Context, Result};
use colored::*;

use crate::asset::AssetType;
use crate::cli::AssetCommand;
use crate::config::Config;
use crate::depot::{Depot, ListedAsset};

/// Run an asset subcommand
pub async fn run(config: &Config, command: AssetCommand) -> Result<()> {
    let mut depot = Depot::open(config.clone()).context("Failed to open registry")?;

    match command {
        AssetCommand::Create {
            project,
            name,
            asset_type,
            reference,
        } => {
            let asset_type: AssetType = asset_type.parse()?;
            let created = depot.create_asset(&project, &name, asset_type, reference.as_deref())?;

            if !created.registered {
                println!(
                    "Asset {} ({}) already registered in {}",
                    name.trim().bold(),
                    asset_type,
                    project
                );
                return Ok(());
            }

            println!("{} {} ({})", "Created".green(), name.trim().bold(), asset_type);
            if created.stub_written {
                println!("  {}", created.stub.display());
            } else {
                println!("  {} {}", "kept existing".yellow(), created.stub.display());
            }
            if let (Some(false), Some(reference)) = (created.reference_found, reference) {
                eprintln!(
                    "{}",
                    format!(
                        "Warning: referenced {} '{}' does not exist yet",
                        asset_type
                            .reference_type()
                            .map(|t| t.to_string())
                            .unwrap_or_default(),
                        reference.trim()
                    )
                    .yellow()
                );
            }
        }
        AssetCommand::Rename { project, old, new } => {
            if depot.rename_asset(&project, &old, &new)? {
                println!("{} {} -> {}", "Renamed".green(), old.bold(), new.trim().bold());
            } else {
                println!("Asset {} unchanged", old.bold());
            }
        }
        AssetCommand::Delete { project, name } => {
            let removed = depot.delete_asset(&project, &name)?;
            if removed == 0 {
                eprintln!("{}", format!("No asset named {} in {}", name, project).yellow());
            } else {
                println!("{} {} ({} entries)", "Deleted".red(), name.bold(), removed);
            }
        }
        AssetCommand::List { project } => {
            print_assets(&depot.list_assets(&project));
        }
        AssetCommand::References {
            project,
            asset_type,
        } => {
            let asset_type: AssetType = asset_type.parse()?;
            let Some(target) = asset_type.reference_type() else {
                println!("{} assets do not reference other assets", asset_type.category());
                return Ok(());
            };
            let candidates = depot.reference_candidates(&project, asset_type)?;
            if candidates.is_empty() {
                println!("No {} assets available to reference", target);
            }
            for name in candidates {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

/// Print a reconciled asset list as aligned columns
pub fn print_assets(assets: &[ListedAsset]) {
    if assets.is_empty() {
        println!("No assets.");
        return;
    }

    let width = assets.iter().map(|a| a.name.len()).max().unwrap_or(0);
    for asset in assets {
        println!(
            "  {:<width$}  {}",
            asset.name,
            asset.asset_type.to_string().dimmed(),
            width = width
        );
    }
}
