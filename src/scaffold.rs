use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::asset::AssetType;
use crate::config::ToolTable;
use crate::error::{DepotError, Result};
use crate::paths::{reference_relative_path, stub_file_name, PathResolver};
use crate::templates::{project_config_document, reference_line, TemplateStore};

/// Subdirectories created under every project root
pub const PROJECT_SUBDIRS: [&str; 30] = [
    "Tools",
    "Config",
    "ArtDepot/Models/Characters/Tools",
    "ArtDepot/Models/Characters/Config",
    "ArtDepot/Models/Props/Tools",
    "ArtDepot/Models/Props/Config",
    "ArtDepot/Models/Environments/Tools",
    "ArtDepot/Models/Environments/Config",
    "ArtDepot/Rigs/Characters/Tools",
    "ArtDepot/Rigs/Characters/Config",
    "ArtDepot/Rigs/Props/Tools",
    "ArtDepot/Rigs/Props/Config",
    "ArtDepot/Animations/Characters/Tools",
    "ArtDepot/Animations/Characters/Config",
    "ArtDepot/Animations/Props/Tools",
    "ArtDepot/Animations/Props/Config",
    "ArtDepot/Textures/Characters/Tools",
    "ArtDepot/Textures/Characters/Config",
    "ArtDepot/Textures/Environments/Tools",
    "ArtDepot/Textures/Environments/Config",
    "ArtDepot/Textures/Props/Tools",
    "ArtDepot/Textures/Props/Config",
    "ArtDepot/VFX/Tools",
    "ArtDepot/VFX/Config",
    "IntermediateDepot/Characters",
    "IntermediateDepot/Props",
    "IntermediateDepot/Environments",
    "IntermediateDepot/Animations",
    "IntermediateDepot/VFX",
    "IntermediateDepot/Rigs",
];

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| DepotError::fs(path, e))
}

/// Creates project directory trees and their default config
#[derive(Debug, Clone)]
pub struct ProjectScaffolder {
    paths: PathResolver,
    tools: ToolTable,
}

impl ProjectScaffolder {
    pub fn new(paths: PathResolver, tools: ToolTable) -> Self {
        Self { paths, tools }
    }

    /// Create the global and per-project directory tree.
    ///
    /// Existing directories are left alone, so calling this twice is safe.
    pub fn create_project_tree(&self, project: &str) -> Result<PathBuf> {
        ensure_dir(&self.paths.tools_dir())?;
        ensure_dir(&self.paths.config_dir())?;

        let base = self.paths.project_root(project);
        for dir in PROJECT_SUBDIRS {
            ensure_dir(&base.join(dir))?;
        }

        Ok(base)
    }

    /// Write `<path>/Config/config.json` unless it already exists.
    ///
    /// Returns true when the file was written.
    pub fn inject_default_config(&self, path: &Path) -> Result<bool> {
        let config_dir = path.join("Config");
        let config_file = config_dir.join("config.json");
        if config_file.exists() {
            return Ok(false);
        }

        ensure_dir(&config_dir)?;
        let content = project_config_document(&self.tools)?;
        fs::write(&config_file, content).map_err(|e| DepotError::fs(&config_file, e))?;

        Ok(true)
    }
}

/// Materializes asset stubs from templates
#[derive(Debug, Clone)]
pub struct AssetScaffolder {
    templates: TemplateStore,
}

impl AssetScaffolder {
    pub fn new(templates: TemplateStore) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Copy the category template into `asset_dir` and, for rigs and
    /// animations, append a reference to `reference`.
    ///
    /// The referenced stub is not required to exist.
    pub fn create_stub(
        &self,
        asset_dir: &Path,
        asset_type: AssetType,
        asset_name: &str,
        reference: Option<&str>,
    ) -> Result<PathBuf> {
        let category = asset_type.category();
        let template = self.templates.resolve(category)?;
        let stub = asset_dir.join(stub_file_name(category, asset_name));

        fs::copy(&template, &stub).map_err(|e| DepotError::fs(&stub, e))?;

        let relative = reference.and_then(|r| {
            reference_relative_path(category, asset_type.subtype(), r).map(|path| (r, path))
        });
        if let Some((namespace, path)) = relative {
            let mut file = OpenOptions::new()
                .append(true)
                .open(&stub)
                .map_err(|e| DepotError::fs(&stub, e))?;
            writeln!(file, "\n{}", reference_line(namespace, &path))
                .map_err(|e| DepotError::fs(&stub, e))?;
        }

        Ok(stub)
    }
}
