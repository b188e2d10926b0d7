use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artdepot")]
#[command(version)]
#[command(about = "Scaffold and track art production projects and assets")]
#[command(long_about = "artdepot creates a standard ArtDepot directory layout for projects and \
their assets (models, rigs, animations, textures, VFX), keeps a JSON registry of what exists, \
and opens asset stubs in their editors.")]
pub struct Cli {
    /// Depot root directory (overrides the config file)
    #[arg(long, global = true, env = "ARTDEPOT_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the depot root and install the default stub templates
    Init {
        /// Overwrite existing templates
        #[arg(short, long)]
        force: bool,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage assets inside a project
    #[command(subcommand)]
    Asset(AssetCommand),

    /// Open an asset stub in its editor
    Open {
        project: String,
        asset: String,

        /// Asset type when several assets share the name, e.g. Rigs/Characters
        #[arg(short = 't', long = "type")]
        asset_type: Option<String>,
    },

    /// Re-list a project's assets on an interval until interrupted
    Watch {
        project: String,

        /// Seconds between refreshes
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Create a project and its directory tree
    Create { name: String },

    /// Rename a project and its directory
    Rename { old: String, new: String },

    /// Delete a project directory and registry entry
    Delete { name: String },

    /// List registered projects
    List,
}

#[derive(Subcommand)]
pub enum AssetCommand {
    /// Create an asset stub
    Create {
        project: String,
        name: String,

        /// Category/Subtype, e.g. Models/Props or VFX
        #[arg(short = 't', long = "type")]
        asset_type: String,

        /// Model (for rigs) or rig (for animations) to reference
        #[arg(short, long)]
        reference: Option<String>,
    },

    /// Rename an asset, its directory and stub
    Rename {
        project: String,
        old: String,
        new: String,
    },

    /// Delete every asset with this name, across all types
    Delete { project: String, name: String },

    /// List assets present on disk
    List { project: String },

    /// List assets that an asset of the given type can reference
    References {
        project: String,

        #[arg(short = 't', long = "type")]
        asset_type: String,
    },
}
