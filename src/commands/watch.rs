use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use std::time::Duration;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};

use crate::commands::asset::print_assets;
use crate::config::Config;
use crate::depot::{Depot, ListedAsset};
use crate::error::DepotError;

/// Re-read the registry and list the project's assets that exist on disk
pub fn refresh(depot: &mut Depot, project: &str) -> Result<Vec<ListedAsset>, DepotError> {
    depot.reload()?;
    Ok(depot.list_assets(project))
}

/// Run the watch command - poll a project's asset list until Ctrl+C
pub async fn run(config: &Config, project: String, interval_secs: Option<u64>) -> Result<()> {
    let mut depot = Depot::open(config.clone()).context("Failed to open registry")?;
    if !depot.registry().has_project(&project) {
        return Err(DepotError::UnknownProject(project).into());
    }

    let secs = interval_secs.unwrap_or(config.depot.refresh_interval).max(1);
    let mut ticker = interval(Duration::from_secs(secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!(
        "{} {} every {}s (Ctrl+C to stop)",
        "Watching".bold().green(),
        project.bold(),
        secs
    );

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<Vec<ListedAsset>> = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => {
                println!();
                println!("{}", "Stopped watching".yellow());
                return Ok(());
            }
        }

        match refresh(&mut depot, &project) {
            Ok(assets) => {
                if last.as_ref() != Some(&assets) {
                    println!();
                    println!(
                        "{} {}",
                        format!("[{}]", Local::now().format("%H:%M:%S")).dimmed(),
                        format!("{} assets in {}", assets.len(), project).cyan()
                    );
                    print_assets(&assets);
                    last = Some(assets);
                }
            }
            Err(e) => eprintln!("{}", format!("Warning: refresh failed: {}", e).yellow()),
        }
    }
}
