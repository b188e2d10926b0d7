use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::AssetType;
use crate::config::Config;
use crate::error::{DepotError, Result};
use crate::naming::{is_valid_name, validate_asset_name, validate_name};
use crate::paths::{stub_file_name, PathResolver};
use crate::registry::{AssetEntry, Registry};
use crate::scaffold::{AssetScaffolder, ProjectScaffolder};
use crate::templates::TemplateStore;

/// Outcome of [`Depot::create_asset`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAsset {
    pub asset_type: AssetType,
    pub dir: PathBuf,
    pub stub: PathBuf,
    /// False when the `(name, type)` pair was already registered
    pub registered: bool,
    /// False when an existing stub was kept instead of copying the template
    pub stub_written: bool,
    /// Whether the referenced stub exists on disk; `None` without a reference
    pub reference_found: Option<bool>,
}

/// A registered asset whose directory exists on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAsset {
    pub name: String,
    pub asset_type: AssetType,
    pub dir: PathBuf,
    pub stub: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedProject {
    pub name: String,
    pub on_disk: bool,
}

/// Keeps the registry and the on-disk layout in step.
///
/// Each operation validates its input first, then touches the filesystem,
/// then the registry. Nothing is rolled back if a later step fails.
#[derive(Debug)]
pub struct Depot {
    config: Config,
    paths: PathResolver,
    projects: ProjectScaffolder,
    assets: AssetScaffolder,
    registry: Registry,
}

fn remove_tree(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| DepotError::fs(path, e))?;
    Ok(true)
}

fn rename_path(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| DepotError::fs(from, e))
}

impl Depot {
    pub fn open(config: Config) -> Result<Self> {
        let paths = PathResolver::new(&config.depot.root);
        let projects = ProjectScaffolder::new(paths.clone(), config.tools.clone());
        let assets = AssetScaffolder::new(TemplateStore::new(config.depot.templates_dir()));
        let registry = Registry::load(config.depot.registry_path())?;

        Ok(Self {
            config,
            paths,
            projects,
            assets,
            registry,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn templates(&self) -> &TemplateStore {
        self.assets.templates()
    }

    /// Re-read the registry file, picking up changes made by other processes
    pub fn reload(&mut self) -> Result<()> {
        self.registry = Registry::load(self.config.depot.registry_path())?;
        Ok(())
    }

    fn require_project(&self, project: &str) -> Result<String> {
        let project = validate_name("project", project)?;
        if !self.registry.has_project(&project) {
            return Err(DepotError::UnknownProject(project));
        }
        Ok(project)
    }

    /// Create the project tree, its default config, and its registry entry.
    ///
    /// Returns false if the project was already registered; the tree is
    /// still topped up in that case.
    pub fn create_project(&mut self, name: &str) -> Result<bool> {
        let name = validate_name("project", name)?;
        let root = self.projects.create_project_tree(&name)?;
        self.projects.inject_default_config(&root)?;
        self.registry.add_project(&name)
    }

    pub fn rename_project(&mut self, old: &str, new: &str) -> Result<bool> {
        let old = self.require_project(old)?;
        let new = validate_name("project", new)?;
        if old == new {
            return Ok(false);
        }

        let new_dir = self.paths.project_root(&new);
        if self.registry.has_project(&new) || new_dir.exists() {
            return Err(DepotError::DuplicateName {
                kind: "project",
                name: new,
            });
        }

        let old_dir = self.paths.project_root(&old);
        if old_dir.exists() {
            rename_path(&old_dir, &new_dir)?;
        }
        self.registry.rename_project(&old, &new)
    }

    /// Delete the project tree and registry entry. Returns false if neither existed.
    pub fn delete_project(&mut self, name: &str) -> Result<bool> {
        let name = validate_name("project", name)?;
        let removed_dir = remove_tree(&self.paths.project_root(&name))?;
        let removed_entry = self.registry.delete_project(&name)?;
        Ok(removed_dir || removed_entry)
    }

    /// Scaffold and register a new asset.
    ///
    /// Rigs and animations need a reference; other categories refuse one.
    /// Registering a `(name, type)` pair twice is a silent no-op.
    pub fn create_asset(
        &mut self,
        project: &str,
        name: &str,
        asset_type: AssetType,
        reference: Option<&str>,
    ) -> Result<CreatedAsset> {
        let project = self.require_project(project)?;
        let name = validate_asset_name("asset", name)?;
        let reference = match (asset_type.reference_type(), reference.map(str::trim)) {
            (Some(_), None) | (Some(_), Some("")) => {
                return Err(DepotError::ReferenceRequired(asset_type.category().to_string()))
            }
            (Some(_), Some(r)) => Some(validate_asset_name("reference", r)?),
            (None, Some(r)) if !r.is_empty() => {
                return Err(DepotError::ReferenceNotAllowed(asset_type.category().to_string()))
            }
            (None, _) => None,
        };

        let dir = self.paths.asset_dir_for(&project, asset_type, &name);
        let stub = self.paths.stub_path(&project, asset_type, &name);
        let reference_found = reference.as_deref().and_then(|r| {
            self.paths
                .reference_target_path(&project, asset_type, r)
                .map(|target| target.is_file())
        });

        if self.registry.contains_asset(&project, &name, asset_type) {
            return Ok(CreatedAsset {
                asset_type,
                dir,
                stub,
                registered: false,
                stub_written: false,
                reference_found,
            });
        }

        // Fail before creating the asset directory
        self.assets.templates().resolve(asset_type.category())?;

        fs::create_dir_all(&dir).map_err(|e| DepotError::fs(&dir, e))?;
        let stub_written = if stub.exists() {
            false
        } else {
            self.assets
                .create_stub(&dir, asset_type, &name, reference.as_deref())?;
            true
        };

        let registered = self.registry.add_asset(&project, &name, asset_type)?;

        Ok(CreatedAsset {
            asset_type,
            dir,
            stub,
            registered,
            stub_written,
            reference_found,
        })
    }

    /// Rename the first asset called `old` (any type), moving its directory
    /// and stub file.
    pub fn rename_asset(&mut self, project: &str, old: &str, new: &str) -> Result<bool> {
        let project = self.require_project(project)?;
        let new = validate_asset_name("asset", new)?;
        let old_name = validate_asset_name("asset", old)?;
        let old = old_name.as_str();
        let entry = self
            .registry
            .find_asset(&project, old)
            .cloned()
            .ok_or_else(|| DepotError::UnknownAsset {
                project: project.clone(),
                name: old.to_string(),
            })?;
        if entry.name == new {
            return Ok(false);
        }

        let asset_type = entry
            .parsed_type()
            .ok_or_else(|| DepotError::UnknownAssetType(entry.asset_type.clone()))?;
        let new_dir = self.paths.asset_dir_for(&project, asset_type, &new);
        if self.registry.contains_asset(&project, &new, asset_type) || new_dir.exists() {
            return Err(DepotError::DuplicateName {
                kind: "asset",
                name: new,
            });
        }

        let old_dir = self.paths.asset_dir_for(&project, asset_type, old);
        if old_dir.exists() {
            rename_path(&old_dir, &new_dir)?;
            let category = asset_type.category();
            let old_stub = new_dir.join(stub_file_name(category, old));
            if old_stub.exists() {
                rename_path(&old_stub, &new_dir.join(stub_file_name(category, &new)))?;
            }
        }

        self.registry.rename_asset(&project, old, &new)
    }

    /// Delete every asset named `name` in the project, whatever its type.
    /// Returns the number of registry entries removed.
    ///
    /// Entries with an unrecognised type have no known directory and are
    /// only dropped from the registry.
    pub fn delete_asset(&mut self, project: &str, name: &str) -> Result<usize> {
        let project = self.require_project(project)?;
        let name = validate_asset_name("asset", name)?;

        let types: Vec<AssetType> = self
            .registry
            .assets(&project)
            .iter()
            .filter(|a| a.name == name)
            .filter_map(AssetEntry::parsed_type)
            .collect();
        for asset_type in types {
            remove_tree(&self.paths.asset_dir_for(&project, asset_type, &name))?;
        }

        self.registry.delete_asset(&project, &name)
    }

    pub fn list_projects(&self) -> Vec<ListedProject> {
        self.registry
            .projects()
            .map(|name| ListedProject {
                name: name.to_string(),
                on_disk: self.paths.project_root(name).is_dir(),
            })
            .collect()
    }

    /// Registered assets of a project whose directory exists.
    ///
    /// Entries without a directory, with an unrecognised type or with a name
    /// that is not a valid path segment are hidden, not removed from the
    /// registry.
    pub fn list_assets(&self, project: &str) -> Vec<ListedAsset> {
        if !is_valid_name(project) {
            return Vec::new();
        }
        self.registry
            .assets(project)
            .iter()
            .filter_map(|entry| {
                let asset_type = entry.parsed_type()?;
                if !is_valid_name(&entry.name) {
                    return None;
                }
                let dir = self.paths.asset_dir_for(project, asset_type, &entry.name);
                if !dir.is_dir() {
                    return None;
                }
                Some(ListedAsset {
                    name: entry.name.clone(),
                    asset_type,
                    stub: dir.join(stub_file_name(asset_type.category(), &entry.name)),
                    dir,
                })
            })
            .collect()
    }

    /// Existing assets an asset of `asset_type` could reference, sorted by name
    pub fn reference_candidates(&self, project: &str, asset_type: AssetType) -> Result<Vec<String>> {
        let project = validate_name("project", project)?;
        let Some(dir) = self.paths.reference_target_dir(&project, asset_type) else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| DepotError::fs(&dir, e))? {
            let entry = entry.map_err(|e| DepotError::fs(&dir, e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if matches!(name.to_lowercase().as_str(), "tools" | "config") {
                continue;
            }
            if entry.path().is_dir() {
                names.push(name);
            }
        }
        names.sort();

        Ok(names)
    }

    /// Stub path of a registered asset, optionally narrowed by type
    pub fn stub_path(&self, project: &str, name: &str, asset_type: Option<AssetType>) -> Result<PathBuf> {
        let project = validate_name("project", project)?;
        let name = validate_asset_name("asset", name)?;
        let found = self.registry.assets(&project).iter().find_map(|a| {
            let parsed = a.parsed_type()?;
            let wanted = a.name == name && asset_type.map_or(true, |t| parsed == t);
            wanted.then_some(parsed)
        });
        let found = found.ok_or_else(|| DepotError::UnknownAsset {
            project: project.clone(),
            name: name.clone(),
        })?;
        Ok(self.paths.stub_path(&project, found, &name))
    }
}
