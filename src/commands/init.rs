use anyhow::{Context, Result};
use colored::*;
use std::fs;

use crate::config::Config;
use crate::paths::PathResolver;
use crate::templates::TemplateStore;

/// Run the init command - create the depot root and default templates
pub async fn run(config: &Config, force: bool) -> Result<()> {
    let paths = PathResolver::new(&config.depot.root);

    for dir in [paths.tools_dir(), paths.config_dir(), paths.projects_dir()] {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let store = TemplateStore::new(config.depot.templates_dir());
    let written = store
        .install_defaults(force)
        .context("Failed to install stub templates")?;

    println!("Initialized depot at {}", paths.root().display().to_string().cyan());
    if written.is_empty() {
        println!("Templates already present in {}", store.dir().display());
    } else {
        for path in &written {
            println!("  {} {}", "wrote".green(), path.display());
        }
    }
    println!();
    println!("Next steps:");
    println!("  1. Run '{}' to create a project", "artdepot project create <name>".cyan());
    println!(
        "  2. Run '{}' to add assets",
        "artdepot asset create <project> <name> --type Models/Props".cyan()
    );

    Ok(())
}
