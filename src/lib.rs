//! artdepot library - project and asset scaffolding for art production
//!
//! Provides the naming rules, directory layout, registry and sync logic
//! behind the `artdepot` CLI.

pub mod asset;
pub mod cli;
pub mod commands;
pub mod config;
pub mod depot;
pub mod error;
pub mod launcher;
pub mod naming;
pub mod paths;
pub mod registry;
pub mod scaffold;
pub mod templates;

pub use depot::Depot;
pub use error::{DepotError, Result};
