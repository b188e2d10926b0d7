use anyhow::{Context, Result};
use colored::*;

use crate::cli::ProjectCommand;
use crate::config::Config;
use crate::depot::Depot;

/// Run a project subcommand
pub async fn run(config: &Config, command: ProjectCommand) -> Result<()> {
    let mut depot = Depot::open(config.clone()).context("Failed to open registry")?;

    match command {
        ProjectCommand::Create { name } => {
            let created = depot.create_project(&name)?;
            let root = depot.paths().project_root(name.trim());
            if created {
                println!("{} project {}", "Created".green(), name.trim().bold());
            } else {
                println!("Project {} already registered, tree checked", name.trim().bold());
            }
            println!("  {}", root.display());
        }
        ProjectCommand::Rename { old, new } => {
            if depot.rename_project(&old, &new)? {
                println!("{} project {} -> {}", "Renamed".green(), old.bold(), new.trim().bold());
            } else {
                println!("Project {} unchanged", old.bold());
            }
        }
        ProjectCommand::Delete { name } => {
            if depot.delete_project(&name)? {
                println!("{} project {}", "Deleted".red(), name.bold());
            } else {
                eprintln!("{}", format!("Project {} not found", name).yellow());
            }
        }
        ProjectCommand::List => {
            let projects = depot.list_projects();
            if projects.is_empty() {
                println!("No projects registered.");
                println!("Run {} to create one.", "artdepot project create <name>".cyan());
                return Ok(());
            }
            for project in projects {
                if project.on_disk {
                    println!("  {}", project.name);
                } else {
                    println!("  {} {}", project.name, "(missing on disk)".yellow());
                }
            }
        }
    }

    Ok(())
}
