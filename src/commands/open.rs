use anyhow::{bail, Context, Result};
use colored::*;

use crate::asset::AssetType;
use crate::config::Config;
use crate::depot::Depot;
use crate::launcher::Launcher;

/// Run the open command - launch an asset stub in its editor
pub async fn run(config: &Config, project: String, asset: String, asset_type: Option<String>) -> Result<()> {
    let depot = Depot::open(config.clone()).context("Failed to open registry")?;
    let asset_type = asset_type.map(|t| t.parse::<AssetType>()).transpose()?;

    let stub = depot.stub_path(&project, &asset, asset_type)?;
    if !stub.is_file() {
        bail!("Stub file missing: {}", stub.display());
    }

    let launcher = Launcher::new(config.editors.clone());
    let editor = launcher.open(&stub)?;
    println!("Opened {} in {}", stub.display().to_string().cyan(), editor.name());

    Ok(())
}
